//! User-creation form, in a modal dialog or inline on the admin page

use std::collections::BTreeSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    client::LibraryRestApi,
    config::UserCreationMessages,
    csrf::CsrfToken,
    dom::{Alert, Document, ElementHandle, SharedDocument},
    error::{UiError, UiResult},
    models::{ConflictBody, NewUser, UserField},
};

use super::PendingGuard;

const INVALID_CLASS: &str = "is-invalid";

/// Fields the server may name as conflicting and that get marked invalid
const CONFLICT_FIELDS: [UserField; 2] = [UserField::Username, UserField::Email];

/// Where the form is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormContext {
    Inline,
    Modal,
}

impl FormContext {
    pub fn trigger_id(self) -> &'static str {
        match self {
            FormContext::Inline => "createUserButton",
            FormContext::Modal => "createUserModalButton",
        }
    }

    pub fn alert_container_id(self) -> &'static str {
        match self {
            FormContext::Inline => "alert-container",
            FormContext::Modal => "modal-alert-container",
        }
    }

    pub fn modal_id(self) -> Option<&'static str> {
        match self {
            FormContext::Inline => None,
            FormContext::Modal => Some("createUserModal"),
        }
    }

    pub fn field_id(self, field: UserField) -> &'static str {
        match (self, field) {
            (FormContext::Inline, UserField::Username) => "username",
            (FormContext::Inline, UserField::FirstName) => "firstName",
            (FormContext::Inline, UserField::LastName) => "lastName",
            (FormContext::Inline, UserField::Email) => "email",
            (FormContext::Inline, UserField::Password) => "password",
            (FormContext::Modal, UserField::Username) => "usernameModal",
            (FormContext::Modal, UserField::FirstName) => "firstNameModal",
            (FormContext::Modal, UserField::LastName) => "lastNameModal",
            (FormContext::Modal, UserField::Email) => "emailModal",
            (FormContext::Modal, UserField::Password) => "passwordModal",
        }
    }
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateUserOutcome {
    Success,
    /// 409 with the field names the server reported, possibly none
    Conflict { hints: BTreeSet<String> },
    UnknownError(u16),
    NetworkError,
}

/// Input elements of the five tracked fields
#[derive(Debug, Clone, Copy)]
struct FieldHandles {
    username: ElementHandle,
    first_name: ElementHandle,
    last_name: ElementHandle,
    email: ElementHandle,
    password: ElementHandle,
}

/// Elements of one form context, resolved once
#[derive(Debug, Clone, Copy)]
pub struct UserFormBindings {
    fields: FieldHandles,
    pub alert_container: ElementHandle,
    pub modal: Option<ElementHandle>,
}

impl UserFormBindings {
    /// `Ok(None)` when the context's trigger is not on the page
    pub fn resolve(doc: &Document, context: FormContext) -> UiResult<Option<Self>> {
        if doc.get_element_by_id(context.trigger_id()).is_none() {
            return Ok(None);
        }

        let require = |id: &str| {
            doc.get_element_by_id(id)
                .ok_or_else(|| UiError::MissingElement(id.to_string()))
        };

        let fields = FieldHandles {
            username: require(context.field_id(UserField::Username))?,
            first_name: require(context.field_id(UserField::FirstName))?,
            last_name: require(context.field_id(UserField::LastName))?,
            email: require(context.field_id(UserField::Email))?,
            password: require(context.field_id(UserField::Password))?,
        };
        let alert_container = require(context.alert_container_id())?;
        let modal = context.modal_id().map(require).transpose()?;

        Ok(Some(Self {
            fields,
            alert_container,
            modal,
        }))
    }

    pub fn field(&self, field: UserField) -> ElementHandle {
        match field {
            UserField::Username => self.fields.username,
            UserField::FirstName => self.fields.first_name,
            UserField::LastName => self.fields.last_name,
            UserField::Email => self.fields.email,
            UserField::Password => self.fields.password,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = ElementHandle> + '_ {
        UserField::ALL.into_iter().map(|field| self.field(field))
    }
}

/// Submits the user-creation form of one context
pub struct CreateUserController {
    document: SharedDocument,
    api: Arc<dyn LibraryRestApi>,
    csrf: CsrfToken,
    context: FormContext,
    messages: UserCreationMessages,
    modal_close_delay: Duration,
    bindings: UserFormBindings,
    pending: AtomicBool,
}

impl CreateUserController {
    /// Bind to the form of `context`. `Ok(None)` if its trigger is absent.
    pub async fn bind(
        document: SharedDocument,
        api: Arc<dyn LibraryRestApi>,
        csrf: CsrfToken,
        context: FormContext,
        messages: UserCreationMessages,
        modal_close_delay: Duration,
    ) -> UiResult<Option<Self>> {
        let resolved = UserFormBindings::resolve(&*document.lock().await, context)?;
        let Some(bindings) = resolved else {
            return Ok(None);
        };

        tracing::debug!("Create user controller bound ({:?})", context);
        Ok(Some(Self {
            document,
            api,
            csrf,
            context,
            messages,
            modal_close_delay,
            bindings,
            pending: AtomicBool::new(false),
        }))
    }

    pub fn context(&self) -> FormContext {
        self.context
    }

    pub fn bindings(&self) -> &UserFormBindings {
        &self.bindings
    }

    /// Submit the form.
    ///
    /// Returns `None` while an earlier submission is still in flight.
    pub async fn submit(&self) -> Option<CreateUserOutcome> {
        let _pending = PendingGuard::try_acquire(&self.pending)?;

        let user = {
            let mut doc = self.document.lock().await;
            self.clear_feedback(&mut doc);
            NewUser::from_fields(|field| doc.element(self.bindings.field(field)).value.clone())
        };

        let outcome = match self.api.create_user(&user, &self.csrf).await {
            Ok(response) if response.is_success() => {
                tracing::info!("Created user {}", user.username);
                CreateUserOutcome::Success
            }
            Ok(response) if response.is_conflict() => {
                let body = ConflictBody::parse(&response.body);
                tracing::warn!("User {} conflicts on {:?}", user.username, body.hints);
                CreateUserOutcome::Conflict {
                    hints: body.hints.into_iter().collect(),
                }
            }
            Ok(response) => {
                tracing::warn!("Creating user {} failed with status {}", user.username, response.status);
                CreateUserOutcome::UnknownError(response.status)
            }
            Err(e) => {
                tracing::error!("Creating user {} failed: {}", user.username, e);
                CreateUserOutcome::NetworkError
            }
        };

        let mut doc = self.document.lock().await;
        self.render(&mut doc, &outcome);
        drop(doc);

        if outcome == CreateUserOutcome::Success {
            self.schedule_modal_close();
        }
        Some(outcome)
    }

    fn clear_feedback(&self, doc: &mut Document) {
        for field in self.bindings.fields() {
            doc.element_mut(field).remove_class(INVALID_CLASS);
        }
        doc.element_mut(self.bindings.alert_container).alert = None;
    }

    fn render(&self, doc: &mut Document, outcome: &CreateUserOutcome) {
        let alert = match outcome {
            CreateUserOutcome::Success => {
                for field in self.bindings.fields() {
                    let input = doc.element_mut(field);
                    input.value.clear();
                    input.remove_class(INVALID_CLASS);
                }
                Alert::success(&self.messages.success_message)
            }
            CreateUserOutcome::Conflict { hints } => {
                for field in CONFLICT_FIELDS {
                    if hints.contains(field.as_str()) {
                        doc.element_mut(self.bindings.field(field)).add_class(INVALID_CLASS);
                    }
                }
                Alert::danger(&self.messages.conflict_message)
            }
            CreateUserOutcome::UnknownError(_) => Alert::danger(&self.messages.unknown_error_message),
            CreateUserOutcome::NetworkError => Alert::danger(&self.messages.network_error_message),
        };
        doc.element_mut(self.bindings.alert_container).alert = Some(alert);
    }

    /// Close the hosting modal once the success alert has been visible for a moment
    fn schedule_modal_close(&self) {
        let Some(modal) = self.bindings.modal else {
            return;
        };
        let document = Arc::clone(&self.document);
        let delay = self.modal_close_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if document.lock().await.hide_modal(modal) {
                tracing::debug!("Closed create user modal");
            }
        });
    }
}
