//! REST access to the library frontend endpoints
//!
//! The controllers only need the status code and, for conflicts, the body
//! text. [`LibraryRestApi`] keeps the transport out of the controllers so
//! they can be exercised against a mock.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    csrf::CsrfToken,
    error::{UiError, UiResult},
    models::{BookRef, NewUser},
};

/// Status of a completed request, plus the body of a 409
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub body: String,
}

impl RestResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }
}

/// Endpoints the page controllers call.
///
/// `Err` means the request never completed; any HTTP status, error or not,
/// is an `Ok(RestResponse)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryRestApi: Send + Sync {
    /// `POST /library/rest/me/borrowBook/{isbn}`
    async fn borrow_book(&self, book: &BookRef, csrf: &CsrfToken) -> UiResult<RestResponse>;

    /// `POST /library/rest/admin/users`
    async fn create_user(&self, user: &NewUser, csrf: &CsrfToken) -> UiResult<RestResponse>;
}

/// reqwest-backed implementation
#[derive(Clone)]
pub struct HttpLibraryRestApi {
    client: Client,
    base_url: Url,
}

impl HttpLibraryRestApi {
    pub fn new(base_url: &str) -> UiResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> UiResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| UiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> UiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// The status decides the outcome. Only a 409 body is read, and a failed
    /// read there leaves the body empty.
    async fn read(response: reqwest::Response) -> RestResponse {
        let status = response.status().as_u16();
        if status != 409 {
            return RestResponse::new(status, "");
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read conflict body: {}", e);
                String::new()
            }
        };
        RestResponse { status, body }
    }
}

#[async_trait]
impl LibraryRestApi for HttpLibraryRestApi {
    async fn borrow_book(&self, book: &BookRef, csrf: &CsrfToken) -> UiResult<RestResponse> {
        let url = self.endpoint(&["library", "rest", "me", "borrowBook", book.isbn()])?;
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header(csrf.header_name(), csrf.token())
            .send()
            .await?;

        Ok(Self::read(response).await)
    }

    async fn create_user(&self, user: &NewUser, csrf: &CsrfToken) -> UiResult<RestResponse> {
        let url = self.endpoint(&["library", "rest", "admin", "users"])?;
        tracing::debug!("POST {} (username={})", url, user.username);

        // .json() also sets Content-Type: application/json
        let response = self
            .client
            .post(url)
            .header(csrf.header_name(), csrf.token())
            .json(user)
            .send()
            .await?;

        Ok(Self::read(response).await)
    }
}
