//! Book reference used by the borrow flow

use std::fmt;

/// ISBN of the book shown on a detail page.
///
/// Opaque: the value is taken from the page as-is and never validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRef(String);

impl BookRef {
    pub fn new(isbn: impl Into<String>) -> Self {
        Self(isbn.into())
    }

    pub fn isbn(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Availability of the book as displayed on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable,
}
