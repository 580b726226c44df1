//! CSRF token pair read from page metadata

use crate::{
    config::PageConfig,
    dom::Document,
    error::{UiError, UiResult},
};

/// Anti-forgery token and the header the server expects it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken {
    header_name: String,
    token: String,
}

impl CsrfToken {
    pub fn new(header_name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            header_name: header_name.into(),
            token: token.into(),
        }
    }

    /// Read the pair from the `<meta>` tags named in `config`
    pub fn from_document(document: &Document, config: &PageConfig) -> UiResult<Self> {
        let token = document
            .meta(&config.csrf_meta)
            .ok_or_else(|| UiError::MissingMeta(config.csrf_meta.clone()))?;
        let header_name = document
            .meta(&config.csrf_header_meta)
            .ok_or_else(|| UiError::MissingMeta(config.csrf_header_meta.clone()))?;

        Ok(Self::new(header_name, token))
    }

    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}
