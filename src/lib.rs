//! Library Management page controllers
//!
//! Interaction glue for the library web frontend: the borrow button on the
//! book detail page and the user-creation form on the admin pages. Pages are
//! modelled by a headless [`dom::Document`]; requests go through
//! [`client::LibraryRestApi`].

pub mod client;
pub mod config;
pub mod controllers;
pub mod csrf;
pub mod dom;
pub mod error;
pub mod logging;
pub mod models;
pub mod page;

pub use client::{HttpLibraryRestApi, LibraryRestApi, RestResponse};
pub use config::AppConfig;
pub use controllers::{BorrowController, BorrowOutcome, CreateUserController, CreateUserOutcome, FormContext};
pub use csrf::CsrfToken;
pub use dom::{Document, Element, SharedDocument};
pub use error::{UiError, UiResult};
pub use page::LibraryPage;
