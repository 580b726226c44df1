//! Borrow button against the stub backend

use std::sync::Arc;

use library_ui::{BorrowOutcome, HttpLibraryRestApi, LibraryPage, LibraryRestApi};

use crate::support::{
    book_page, spawn_backend, spawn_truncated_backend, test_config, unreachable_base_url, CSRF_TOKEN,
};

async fn ready(page: &crate::support::BookPage, base_url: &str) -> LibraryPage {
    let api: Arc<dyn LibraryRestApi> = Arc::new(HttpLibraryRestApi::new(base_url).unwrap());
    LibraryPage::on_dom_ready(page.doc.clone(), api, &test_config(base_url))
        .await
        .expect("page binds")
}

#[tokio::test]
async fn test_borrow_success() {
    let backend = spawn_backend().await;
    let page = book_page("success-isbn");
    let library = ready(&page, &backend.base_url).await;
    let borrow = library.borrow.expect("borrow controller");

    assert_eq!(borrow.on_click().await, Some(BorrowOutcome::Success));

    let doc = page.doc.lock().await;
    let alert = doc.element(page.alert_container).alert.clone().unwrap();
    assert_eq!(alert.message, "Buch wurde erfolgreich ausgeliehen.");
    assert!(doc.element(page.button).disabled);
    assert_eq!(doc.element(page.button).text, "Nicht verfügbar");
    assert!(!doc.element(page.badge_available).is_visible());

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/library/rest/me/borrowBook/success-isbn");
    assert_eq!(requests[0].csrf.as_deref(), Some(CSRF_TOKEN));
}

#[tokio::test]
async fn test_borrow_conflict() {
    let backend = spawn_backend().await;
    let page = book_page("conflict-isbn");
    let borrow = ready(&page, &backend.base_url).await.borrow.unwrap();

    assert_eq!(borrow.on_click().await, Some(BorrowOutcome::Conflict));

    let doc = page.doc.lock().await;
    let alert = doc.element(page.alert_container).alert.clone().unwrap();
    assert_eq!(alert.message, "Dieses Buch ist bereits ausgeliehen.");
    assert!(!doc.element(page.button).disabled);
    assert!(doc.element(page.badge_available).is_visible());
}

#[tokio::test]
async fn test_borrow_server_error() {
    let backend = spawn_backend().await;
    let page = book_page("broken-isbn");
    let borrow = ready(&page, &backend.base_url).await.borrow.unwrap();

    assert_eq!(borrow.on_click().await, Some(BorrowOutcome::UnknownError(500)));
    assert!(!page.doc.lock().await.element(page.button).disabled);
}

#[tokio::test]
async fn test_borrow_unreachable_server() {
    let base_url = unreachable_base_url().await;
    let page = book_page("success-isbn");
    let borrow = ready(&page, &base_url).await.borrow.unwrap();

    assert_eq!(borrow.on_click().await, Some(BorrowOutcome::NetworkError));

    let doc = page.doc.lock().await;
    let alert = doc.element(page.alert_container).alert.clone().unwrap();
    assert_eq!(alert.message, "Fehler beim Verbinden mit dem Server.");
    assert!(!doc.element(page.button).disabled);
}

#[tokio::test]
async fn test_isbn_is_sent_as_single_segment() {
    let backend = spawn_backend().await;
    let page = book_page("978 3/16");
    let borrow = ready(&page, &backend.base_url).await.borrow.unwrap();

    assert_eq!(borrow.on_click().await, Some(BorrowOutcome::Success));
    assert_eq!(backend.requests()[0].path, "/library/rest/me/borrowBook/978 3/16");
}

#[tokio::test]
async fn test_borrow_success_with_truncated_body() {
    let base_url = spawn_truncated_backend("201 Created").await;
    let page = book_page("success-isbn");
    let borrow = ready(&page, &base_url).await.borrow.unwrap();

    assert_eq!(borrow.on_click().await, Some(BorrowOutcome::Success));

    let doc = page.doc.lock().await;
    assert_eq!(
        doc.element(page.alert_container).alert.clone().unwrap().message,
        "Buch wurde erfolgreich ausgeliehen."
    );
    assert!(doc.element(page.button).disabled);
}
