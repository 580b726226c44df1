//! User-creation modal against the stub backend

use std::sync::Arc;
use std::time::Duration;

use library_ui::{CreateUserOutcome, HttpLibraryRestApi, LibraryPage, LibraryRestApi};

use crate::support::{
    admin_page, spawn_backend, spawn_truncated_backend, test_config, unreachable_base_url, AdminPage, CSRF_TOKEN,
};

async fn ready(page: &AdminPage, base_url: &str) -> LibraryPage {
    let api: Arc<dyn LibraryRestApi> = Arc::new(HttpLibraryRestApi::new(base_url).unwrap());
    LibraryPage::on_dom_ready(page.doc.clone(), api, &test_config(base_url))
        .await
        .expect("page binds")
}

async fn field(page: &AdminPage, id: &str) -> (String, bool) {
    let doc = page.doc.lock().await;
    let element = doc.element(doc.get_element_by_id(id).unwrap());
    (element.value.clone(), element.has_class("is-invalid"))
}

#[tokio::test]
async fn test_create_user_success() {
    let backend = spawn_backend().await;
    let page = admin_page("unique-username");
    let library = ready(&page, &backend.base_url).await;
    assert!(library.borrow.is_none());
    let form = library.create_user_modal.expect("modal form");

    assert_eq!(form.submit().await, Some(CreateUserOutcome::Success));

    for id in ["usernameModal", "firstNameModal", "lastNameModal", "emailModal", "passwordModal"] {
        assert_eq!(field(&page, id).await, (String::new(), false));
    }
    let alert = page.doc.lock().await.element(page.alert_container).alert.clone().unwrap();
    assert_eq!(alert.message, "Benutzer wurde erfolgreich angelegt.");

    let request = &backend.requests()[0];
    assert_eq!(request.csrf.as_deref(), Some(CSRF_TOKEN));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    let body = request.body.as_ref().unwrap();
    assert_eq!(body["username"], "unique-username");
    assert_eq!(body["firstName"], "John");
    assert_eq!(body["lastName"], "Doe");
    assert_eq!(body["email"], "john.doe@example.com");
    assert_eq!(body["password"], "password");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!page.doc.lock().await.element(page.modal).open);
}

#[tokio::test]
async fn test_create_user_duplicate_username() {
    let backend = spawn_backend().await;
    let page = admin_page("duplicate-username");
    let form = ready(&page, &backend.base_url).await.create_user_modal.unwrap();

    assert!(matches!(
        form.submit().await,
        Some(CreateUserOutcome::Conflict { hints }) if hints.contains("username")
    ));

    assert_eq!(field(&page, "usernameModal").await, ("duplicate-username".to_string(), true));
    assert_eq!(field(&page, "emailModal").await, ("john.doe@example.com".to_string(), false));
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(page.doc.lock().await.element(page.modal).open);
}

#[tokio::test]
async fn test_create_user_duplicate_username_and_email() {
    let backend = spawn_backend().await;
    let page = admin_page("duplicate-both");
    let form = ready(&page, &backend.base_url).await.create_user_modal.unwrap();

    form.submit().await;

    assert!(field(&page, "usernameModal").await.1);
    assert!(field(&page, "emailModal").await.1);
}

#[tokio::test]
async fn test_create_user_conflict_without_json() {
    let backend = spawn_backend().await;
    let page = admin_page("garbled");
    let form = ready(&page, &backend.base_url).await.create_user_modal.unwrap();

    assert_eq!(
        form.submit().await,
        Some(CreateUserOutcome::Conflict { hints: Default::default() })
    );
    assert!(!field(&page, "usernameModal").await.1);
    let alert = page.doc.lock().await.element(page.alert_container).alert.clone().unwrap();
    assert_eq!(alert.message, "Benutzername oder E-Mail ist bereits vergeben.");
}

#[tokio::test]
async fn test_create_user_unreachable_server() {
    let base_url = unreachable_base_url().await;
    let page = admin_page("unique-username");
    let form = ready(&page, &base_url).await.create_user_modal.unwrap();

    assert_eq!(form.submit().await, Some(CreateUserOutcome::NetworkError));

    let alert = page.doc.lock().await.element(page.alert_container).alert.clone().unwrap();
    assert_eq!(alert.message, test_config(&base_url).user_creation.network_error_message);
    assert_eq!(field(&page, "usernameModal").await.0, "unique-username");
    assert_eq!(field(&page, "firstNameModal").await.0, " John");
}

#[tokio::test]
async fn test_create_user_conflict_with_truncated_body() {
    let base_url = spawn_truncated_backend("409 Conflict").await;
    let page = admin_page("unique-username");
    let form = ready(&page, &base_url).await.create_user_modal.unwrap();

    assert_eq!(
        form.submit().await,
        Some(CreateUserOutcome::Conflict { hints: Default::default() })
    );
    let alert = page.doc.lock().await.element(page.alert_container).alert.clone().unwrap();
    assert_eq!(alert.message, "Benutzername oder E-Mail ist bereits vergeben.");
}
