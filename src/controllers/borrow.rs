//! Borrow button on the book detail page

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::{
    client::LibraryRestApi,
    config::BorrowMessages,
    csrf::CsrfToken,
    dom::{Alert, Display, Document, Element, ElementHandle, SharedDocument},
    error::{UiError, UiResult},
    models::{Availability, BookRef},
};

use super::PendingGuard;

const BOOK_CARD_CLASS: &str = "book-details";
const ISBN_ATTRIBUTE: &str = "data-isbn";
const BUTTON_ID: &str = "borrow-button";
const ALERT_CONTAINER_ID: &str = "loan-alert-container";
const BADGE_AVAILABLE_ID: &str = "badge-available";
const BADGE_UNAVAILABLE_ID: &str = "badge-unavailable";

/// Result of one borrow attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowOutcome {
    Success,
    /// 409: somebody else holds the book
    Conflict,
    UnknownError(u16),
    NetworkError,
}

/// Elements the borrow controller works on, resolved once
#[derive(Debug, Clone, Copy)]
pub struct BorrowBindings {
    pub button: ElementHandle,
    pub alert_container: ElementHandle,
    pub badge_available: Option<ElementHandle>,
    pub badge_unavailable: Option<ElementHandle>,
}

impl BorrowBindings {
    /// Resolve the bindings and the book shown on the page.
    ///
    /// Returns `Ok(None)` when the page has no borrow button.
    pub fn resolve(doc: &Document) -> UiResult<Option<(Self, BookRef)>> {
        let Some(button) = doc.get_element_by_id(BUTTON_ID) else {
            return Ok(None);
        };

        let card = doc
            .query_by_class(BOOK_CARD_CLASS)
            .ok_or_else(|| UiError::MissingElement(format!(".{}", BOOK_CARD_CLASS)))?;
        let isbn = doc
            .element(card)
            .attribute(ISBN_ATTRIBUTE)
            .ok_or_else(|| UiError::MissingAttribute {
                element: format!(".{}", BOOK_CARD_CLASS),
                attribute: ISBN_ATTRIBUTE.to_string(),
            })?;
        let alert_container = doc
            .get_element_by_id(ALERT_CONTAINER_ID)
            .ok_or_else(|| UiError::MissingElement(ALERT_CONTAINER_ID.to_string()))?;

        let bindings = Self {
            button,
            alert_container,
            badge_available: doc.get_element_by_id(BADGE_AVAILABLE_ID),
            badge_unavailable: doc.get_element_by_id(BADGE_UNAVAILABLE_ID),
        };
        Ok(Some((bindings, BookRef::new(isbn))))
    }
}

/// Handles clicks on the borrow button
pub struct BorrowController {
    document: SharedDocument,
    api: Arc<dyn LibraryRestApi>,
    csrf: CsrfToken,
    messages: BorrowMessages,
    bindings: BorrowBindings,
    book: BookRef,
    pending: AtomicBool,
}

impl BorrowController {
    /// Bind to the page. `Ok(None)` if there is no borrow button.
    pub async fn bind(
        document: SharedDocument,
        api: Arc<dyn LibraryRestApi>,
        csrf: CsrfToken,
        messages: BorrowMessages,
    ) -> UiResult<Option<Self>> {
        let resolved = BorrowBindings::resolve(&*document.lock().await)?;
        let Some((bindings, book)) = resolved else {
            tracing::debug!("No borrow button on page, borrow controller not bound");
            return Ok(None);
        };

        tracing::debug!("Borrow controller bound for isbn {}", book);
        Ok(Some(Self {
            document,
            api,
            csrf,
            messages,
            bindings,
            book,
            pending: AtomicBool::new(false),
        }))
    }

    pub fn book(&self) -> &BookRef {
        &self.book
    }

    pub fn bindings(&self) -> &BorrowBindings {
        &self.bindings
    }

    /// Availability as currently displayed
    pub async fn state(&self) -> Availability {
        if self.document.lock().await.element(self.bindings.button).disabled {
            Availability::Unavailable
        } else {
            Availability::Available
        }
    }

    /// Click on the borrow button.
    ///
    /// Returns `None` without sending anything when the button is disabled or
    /// a previous click is still waiting for its response.
    pub async fn on_click(&self) -> Option<BorrowOutcome> {
        let _pending = PendingGuard::try_acquire(&self.pending)?;

        {
            let mut doc = self.document.lock().await;
            if doc.element(self.bindings.button).disabled {
                return None;
            }
            doc.element_mut(self.bindings.alert_container).alert = None;
        }

        let outcome = match self.api.borrow_book(&self.book, &self.csrf).await {
            Ok(response) if response.is_success() => {
                tracing::info!("Borrowed book {}", self.book);
                BorrowOutcome::Success
            }
            Ok(response) if response.is_conflict() => {
                tracing::warn!("Book {} is already borrowed", self.book);
                BorrowOutcome::Conflict
            }
            Ok(response) => {
                tracing::warn!("Borrowing book {} failed with status {}", self.book, response.status);
                BorrowOutcome::UnknownError(response.status)
            }
            Err(e) => {
                tracing::error!("Borrowing book {} failed: {}", self.book, e);
                BorrowOutcome::NetworkError
            }
        };

        let mut doc = self.document.lock().await;
        self.render(&mut doc, outcome);
        Some(outcome)
    }

    fn render(&self, doc: &mut Document, outcome: BorrowOutcome) {
        let alert = match outcome {
            BorrowOutcome::Success => {
                self.mark_unavailable(doc);
                Alert::success(&self.messages.success_message)
            }
            BorrowOutcome::Conflict => Alert::danger(&self.messages.conflict_message),
            BorrowOutcome::UnknownError(_) => Alert::warning(&self.messages.unknown_error_message),
            BorrowOutcome::NetworkError => Alert::danger(&self.messages.network_error_message),
        };
        doc.element_mut(self.bindings.alert_container).alert = Some(alert);
    }

    /// Available -> Unavailable. There is no way back.
    fn mark_unavailable(&self, doc: &mut Document) {
        if let Some(badge) = self.bindings.badge_available {
            doc.element_mut(badge).display = Display::Hidden;
        }

        match self.bindings.badge_unavailable {
            Some(badge) => doc.element_mut(badge).display = Display::Inline,
            None => {
                let parent = self.bindings.badge_available.and_then(|b| doc.parent(b));
                if let Some(parent) = parent {
                    doc.append(
                        Some(parent),
                        Element::new("span")
                            .with_id(BADGE_UNAVAILABLE_ID)
                            .with_class("badge bg-danger")
                            .with_text(&self.messages.borrowed_badge_label),
                    );
                }
            }
        }

        let button = doc.element_mut(self.bindings.button);
        button.disabled = true;
        button.remove_class("btn-primary");
        button.add_class("btn-secondary");
        button.text = self.messages.unavailable_label.clone();
    }
}
