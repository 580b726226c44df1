//! Data models exchanged with the library REST endpoints

pub mod loan;
pub mod user;

// Re-export commonly used types
pub use loan::{Availability, BookRef};
pub use user::{ConflictBody, NewUser, UserField};
