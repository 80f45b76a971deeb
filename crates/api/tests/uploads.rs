mod common;

use common::TestServer;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;

fn image(name: &str, bytes: &'static [u8]) -> Part {
    Part::bytes(bytes).file_name(name.to_string())
}

#[tokio::test]
async fn news_image_is_stored_and_served() {
    let server = TestServer::spawn().await;

    let form = Form::new()
        .text("title", "Quarterly results")
        .text("datePublished", "2024-05-01")
        .text("discription", "Strong quarter")
        .part("image", image("cover.png", b"png-bytes"));
    let response = server
        .client
        .post(server.url("/api/news"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let news: Value = response.json().await.unwrap();
    assert_eq!(news["discription"], "Strong quarter");
    let image_url = news["imageUrl"].as_str().unwrap().to_string();
    assert!(image_url.starts_with("/uploads/news/"));

    let response = server.client.get(server.url(&image_url)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(&response.bytes().await.unwrap()[..], b"png-bytes");

    // Text-only edit keeps the image.
    let id = news["_id"].as_str().unwrap();
    let response = server
        .client
        .put(server.url(&format!("/api/news/{id}")))
        .multipart(Form::new().text("title", "Q1 results"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["title"], "Q1 results");
    assert_eq!(updated["imageUrl"], image_url.as_str());
}

#[tokio::test]
async fn replacing_an_image_removes_the_old_file() {
    let server = TestServer::spawn().await;

    let form = Form::new()
        .text("title", "Launch")
        .text("date", "2024-03-10")
        .part("image", image("a.jpg", b"first"));
    let event: Value = server
        .client
        .post(server.url("/api/events"))
        .multipart(form)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = event["_id"].as_str().unwrap();
    let first = event["imageUrl"].as_str().unwrap().to_string();
    let first_path = server.uploads.path().join(first.trim_start_matches("/uploads/"));
    assert!(first_path.exists());

    let updated: Value = server
        .client
        .put(server.url(&format!("/api/events/{id}")))
        .multipart(Form::new().part("image", image("b.jpg", b"second")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_ne!(updated["imageUrl"], first.as_str());
    assert!(!first_path.exists());
}

#[tokio::test]
async fn event_gallery_accepts_many_images() {
    let server = TestServer::spawn().await;

    let event: Value = server
        .client
        .post(server.url("/api/events"))
        .multipart(Form::new().text("title", "Expo").text("date", "2024-02-01"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = event["_id"].as_str().unwrap();

    let form = Form::new()
        .part("images", image("1.jpg", b"one"))
        .part("images", image("2.jpg", b"two"));
    let response = server
        .client
        .post(server.url(&format!("/api/events/{id}/images")))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created.as_array().unwrap().len(), 2);

    let listed: Value = server
        .client
        .get(server.url(&format!("/api/events/{id}/images")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["total"], 2);

    let by_query: Value = server
        .client
        .get(server.url(&format!("/api/gallery?eventId={id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_query["total"], 2);

    let response = server
        .client
        .get(server.url("/api/events/0190a5b0-0000-7000-8000-000000000000/images"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn gallery_upload_requires_an_image() {
    let server = TestServer::spawn().await;
    let response = server
        .client
        .post(server.url("/api/gallery"))
        .multipart(Form::new().text("caption", "Nothing attached"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejected_application_leaves_no_resume_behind() {
    let server = TestServer::spawn().await;

    let form = Form::new()
        .text("fullName", "Applicant")
        .text("email", "")
        .part("resume", image("cv.pdf", b"%PDF"));
    let response = server
        .client
        .post(server.url("/api/applicants"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let resumes = server.uploads.path().join("resumes");
    let leftover = std::fs::read_dir(&resumes)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftover, 0);
}

#[tokio::test]
async fn event_gallery_upload_requires_images() {
    let server = TestServer::spawn().await;

    let event: Value = server
        .client
        .post(server.url("/api/events"))
        .multipart(Form::new().text("title", "Expo").text("date", "2024-02-01"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = event["_id"].as_str().unwrap();

    let response = server
        .client
        .post(server.url(&format!("/api/events/{id}/images")))
        .multipart(Form::new().text("caption", "No files"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["type"], "validationFailed");

    let listed: Value = server
        .client
        .get(server.url(&format!("/api/events/{id}/images")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["total"], 0);
}

#[tokio::test]
async fn investor_report_file_follows_the_record() {
    let server = TestServer::spawn().await;
    let on_disk = |url: &str| server.uploads.path().join(url.trim_start_matches("/uploads/"));

    let category: Value = server
        .client
        .post(server.url("/api/investor/categories"))
        .json(&serde_json::json!({ "name": "Annual Reports" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let category_id = category["_id"].as_str().unwrap();

    let form = Form::new()
        .text("title", "FY 2023")
        .text("categoryId", category_id.to_string())
        .text("uploadedDate", "2024-04-30")
        .part("file", image("fy2023.pdf", b"%PDF-1"));
    let response = server
        .client
        .post(server.url("/api/investor/report"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let report: Value = response.json().await.unwrap();
    let id = report["_id"].as_str().unwrap().to_string();
    let first = report["fileUrl"].as_str().unwrap().to_string();
    assert!(first.starts_with("/uploads/investor/"));
    assert!(on_disk(&first).exists());
    assert_eq!(report["isVisible"], true);

    let response = server
        .client
        .put(server.url(&format!("/api/investor/report/{id}")))
        .multipart(
            Form::new()
                .text("title", "FY 2023 (revised)")
                .part("file", image("fy2023-r.pdf", b"%PDF-2")),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    let second = updated["fileUrl"].as_str().unwrap().to_string();
    assert_eq!(updated["title"], "FY 2023 (revised)");
    assert_ne!(second, first);
    assert!(!on_disk(&first).exists());
    assert_eq!(std::fs::read(on_disk(&second)).unwrap(), b"%PDF-2");

    let response = server
        .client
        .delete(server.url(&format!("/api/investor/report/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!on_disk(&second).exists());

    let response = server
        .client
        .get(server.url(&format!("/api/investor/report/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn report_without_a_file_is_rejected() {
    let server = TestServer::spawn().await;

    let category: Value = server
        .client
        .post(server.url("/api/investor/categories"))
        .json(&serde_json::json!({ "name": "Notices" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let form = Form::new()
        .text("title", "No attachment")
        .text("categoryId", category["_id"].as_str().unwrap().to_string());
    let response = server
        .client
        .post(server.url("/api/investor/report"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
