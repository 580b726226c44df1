//! Page controllers
//!
//! Each controller binds to its elements once and reacts to a single user
//! action with one request. Outcomes are reported back to the caller and
//! rendered on the page; none of them is an error.

pub mod borrow;
pub mod create_user;

use std::sync::atomic::{AtomicBool, Ordering};

pub use borrow::{BorrowBindings, BorrowController, BorrowOutcome};
pub use create_user::{CreateUserController, CreateUserOutcome, FormContext, UserFormBindings};

/// Marks a controller busy for the lifetime of one request
pub(crate) struct PendingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PendingGuard<'a> {
    /// `None` when a request is already in flight
    pub(crate) fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
