//! Error types for the library page controllers

use thiserror::Error;

/// Main error type
///
/// Binding errors (`Missing*`) surface from page setup and are meant to fail
/// fast. Request errors never leave a controller: they are turned into an
/// outcome and an alert on the page.
#[derive(Error, Debug)]
pub enum UiError {
    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Missing attribute {attribute} on {element}")]
    MissingAttribute { element: String, attribute: String },

    #[error("Missing page metadata: {0}")]
    MissingMeta(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<reqwest::Error> for UiError {
    fn from(e: reqwest::Error) -> Self {
        UiError::Transport(e.to_string())
    }
}

/// Result type alias for controller operations
pub type UiResult<T> = Result<T, UiError>;
