//! DOM-ready bootstrap for library pages

use std::sync::Arc;

use crate::{
    client::LibraryRestApi,
    config::AppConfig,
    controllers::{BorrowController, CreateUserController, FormContext},
    csrf::CsrfToken,
    dom::SharedDocument,
    error::UiResult,
};

/// Controllers bound to one page. Each is `None` when its trigger is absent.
pub struct LibraryPage {
    pub borrow: Option<BorrowController>,
    pub create_user_modal: Option<CreateUserController>,
    pub create_user_inline: Option<CreateUserController>,
}

impl LibraryPage {
    /// Read the CSRF pair and bind every controller the page has elements for
    pub async fn on_dom_ready(
        document: SharedDocument,
        api: Arc<dyn LibraryRestApi>,
        config: &AppConfig,
    ) -> UiResult<Self> {
        let csrf = CsrfToken::from_document(&*document.lock().await, &config.page)?;

        let borrow = BorrowController::bind(
            document.clone(),
            api.clone(),
            csrf.clone(),
            config.borrow.clone(),
        )
        .await?;

        let create_user_modal = Self::bind_user_form(&document, &api, &csrf, config, FormContext::Modal).await?;
        let create_user_inline = Self::bind_user_form(&document, &api, &csrf, config, FormContext::Inline).await?;

        tracing::info!(
            "Page ready (borrow: {}, create user modal: {}, create user inline: {})",
            borrow.is_some(),
            create_user_modal.is_some(),
            create_user_inline.is_some()
        );

        Ok(Self {
            borrow,
            create_user_modal,
            create_user_inline,
        })
    }

    async fn bind_user_form(
        document: &SharedDocument,
        api: &Arc<dyn LibraryRestApi>,
        csrf: &CsrfToken,
        config: &AppConfig,
        context: FormContext,
    ) -> UiResult<Option<CreateUserController>> {
        CreateUserController::bind(
            document.clone(),
            api.clone(),
            csrf.clone(),
            context,
            config.user_creation.clone(),
            config.ui.modal_close_delay(),
        )
        .await
    }
}
