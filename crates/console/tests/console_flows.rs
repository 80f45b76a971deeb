use std::cell::Cell;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use portal_cms_api::config::AppConfig;
use portal_cms_api::state::AppState;
use portal_cms_console::forms::{BlogForm, CareerForm, FileUpload, NewsForm};
use portal_cms_console::{load_dashboard, ApiClient, ClientError, FetchState, ResourcePage};
use portal_cms_core::resources::{Blog, Career, Inquiry, News, PartnerRequest, PartnerStatus};
use portal_cms_core::DocumentStore;
use serde_json::json;
use tempfile::TempDir;

async fn serve(app: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    ApiClient::new(format!("http://{addr}"))
}

async fn spawn_api() -> (ApiClient, TempDir) {
    let uploads = tempfile::tempdir().expect("upload dir");
    let config = AppConfig {
        upload_dir: uploads.path().to_path_buf(),
        ..AppConfig::default()
    };
    let app = portal_cms_api::app(AppState::new(DocumentStore::memory(), config));
    (serve(app).await, uploads)
}

#[tokio::test]
async fn blog_page_reloads_after_each_mutation() {
    let (client, _uploads) = spawn_api().await;
    let mut page = ResourcePage::<Blog>::new(client);
    assert!(page.state().is_loading());

    page.load().await;
    assert!(page.items().is_empty());

    let form = BlogForm {
        title: "Forex basics".to_string(),
        content: "<p>Body</p>".to_string(),
        tags: "Visa, UK, Travel".to_string(),
        author_name: "Desk".to_string(),
        published_at: "2024-04-01".to_string(),
        ..BlogForm::default()
    };
    let created = page.create(&form.payload()).await.expect("create");
    assert_eq!(created.body.tags, vec!["Visa", "UK", "Travel"]);
    assert!(!page.is_saving());
    assert_eq!(page.items().len(), 1);

    let edit = BlogForm::from_document(&created);
    assert_eq!(edit.tags, "Visa, UK, Travel");
    assert_eq!(edit.published_at, "2024-04-01");

    let id = created.id.to_string();
    page.update(&id, &json!({ "title": "Forex for students" }))
        .await
        .expect("update");
    assert_eq!(page.items()[0].body.title, "Forex for students");

    let ack = page.delete(&id, &|_: &str| true).await.expect("delete");
    assert!(ack.is_some_and(|ack| ack.deleted));
    assert!(page.items().is_empty());
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    // Nothing listens here, so any request would fail.
    let client = ApiClient::new("http://127.0.0.1:9");
    let mut page = ResourcePage::<Career>::new(client);

    let asked = Cell::new(0);
    let decline = |_: &str| {
        asked.set(asked.get() + 1);
        false
    };
    let outcome = page
        .delete("0190a5b0-0000-7000-8000-000000000000", &decline)
        .await
        .expect("declined delete is not an error");
    assert!(outcome.is_none());
    assert_eq!(asked.get(), 1);
    assert!(page.last_error().is_none());
}

#[tokio::test]
async fn failed_mutation_is_reported() {
    let (client, _uploads) = spawn_api().await;
    let mut page = ResourcePage::<Career>::new(client);
    page.load().await;

    let err = page
        .update("0190a5b0-0000-7000-8000-000000000000", &json!({ "title": "x" }))
        .await
        .expect_err("missing career");
    assert!(err.is_not_found());
    assert!(page.last_error().is_some());

    let err = page
        .create(&CareerForm::default().payload())
        .await
        .expect_err("title required");
    assert!(matches!(err, ClientError::Api { status: 400, .. }));
}

#[tokio::test]
async fn news_form_uploads_its_image() {
    let (client, uploads) = spawn_api().await;

    let form = NewsForm {
        title: "Branch opening".to_string(),
        date_published: "2024-07-15".to_string(),
        description: "New branch in Pune".to_string(),
        image: Some(FileUpload::new("opening.jpg", b"jpeg".to_vec())),
        ..NewsForm::default()
    };
    let news = client.create_news(form.into_multipart()).await.expect("create");
    let url = news.body.image_url.clone().expect("image url");
    let stored = uploads.path().join(url.trim_start_matches("/uploads/"));
    assert!(stored.exists());

    let edit = NewsForm::from_document(&news);
    assert_eq!(edit.date_published, "2024-07-15");
    assert_eq!(edit.description, "New branch in Pune");

    let page = client
        .list::<News>(&Default::default())
        .await
        .expect("list");
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn clearing_news_fields_on_edit_removes_them() {
    let (client, uploads) = spawn_api().await;

    let form = NewsForm {
        title: "Branch opening".to_string(),
        date_published: "2024-07-15".to_string(),
        description: "New branch in Pune".to_string(),
        link: "https://example.com/pune".to_string(),
        image: Some(FileUpload::new("opening.jpg", b"jpeg".to_vec())),
    };
    let news = client.create_news(form.into_multipart()).await.expect("create");
    assert_eq!(news.body.link.as_deref(), Some("https://example.com/pune"));

    let mut edit = NewsForm::from_document(&news);
    edit.description.clear();
    edit.link.clear();
    let id = news.id.to_string();
    let updated = client
        .update_news(&id, edit.into_multipart())
        .await
        .expect("update");

    assert_eq!(updated.body.title, "Branch opening");
    assert_eq!(updated.body.description, None);
    assert_eq!(updated.body.link, None);
    assert_eq!(updated.body.image_url, news.body.image_url);
    let url = updated.body.image_url.clone().expect("image kept");
    assert!(uploads.path().join(url.trim_start_matches("/uploads/")).exists());
}

#[tokio::test]
async fn dashboard_merges_all_stats() {
    let (client, _uploads) = spawn_api().await;

    client
        .create::<Inquiry>(&json!({
            "fullName": "Visitor",
            "email": "v@example.com",
            "message": "Hello"
        }))
        .await
        .expect("inquiry");
    let partner = client
        .create::<PartnerRequest>(&json!({ "fullName": "Agent", "email": "a@example.com" }))
        .await
        .expect("partner");
    client
        .set_partner_status(&partner.id.to_string(), PartnerStatus::Rejected)
        .await
        .expect("status");

    let view = load_dashboard(&client).await.expect("dashboard");
    assert_eq!(view.cards.len(), 7);
    assert_eq!(view.card("Today's Queries"), Some(1));
    assert_eq!(view.card("Total Queries"), Some(1));
    assert_eq!(view.card("Partner Requests"), Some(1));
    assert_eq!(view.card("Investor Reports"), Some(0));
    assert!(view.recent_reports.is_empty());
}

#[tokio::test]
async fn dashboard_fails_when_any_source_fails() {
    let app = Router::new()
        .route(
            "/api/investor/stats",
            get(|| async {
                Json(json!({
                    "counts": { "reports": 2, "categories": 1, "officeTypes": 1, "locations": 3 },
                    "recentReports": []
                }))
            }),
        )
        .route(
            "/api/contact/stats",
            get(|| async { Json(json!({ "total": 4, "today": 1 })) }),
        )
        .route(
            "/api/partner/stats",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": {
                            "type": "internalError",
                            "message": "An internal error occurred",
                            "statusCode": 500
                        }
                    })),
                )
            }),
        );
    let client = serve(app).await;

    let err = load_dashboard(&client).await.expect_err("partner stats fail");
    assert_eq!(err.status(), Some(500));

    let state = portal_cms_console::dashboard::dashboard_state(&client).await;
    assert!(matches!(state, FetchState::Failed(_)));
}
