//! Controllers driven against a stub backend over HTTP

mod borrow_flow;
mod create_user_flow;
