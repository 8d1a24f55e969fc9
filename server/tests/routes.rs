use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use claims::assert_ok;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{
    matchers::{method, query_param},
    Mock, MockServer, ResponseTemplate,
};

use anothersky::{app_state::AppState, render::Templates, routes};
use anothersky_core::{backend::Backend, config::parse_config};

fn app(config_toml: &str, backend_url: Option<String>) -> Router {
    let config = assert_ok!(parse_config(config_toml, backend_url));
    let backend = assert_ok!(Backend::from_config(&config.backend));
    let templates = assert_ok!(Templates::new(&config.display));
    routes::router().with_state(Arc::new(AppState {
        backend,
        display: config.display,
        templates,
    }))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = assert_ok!(app.oneshot(request).await);
    let status = response.status();
    let body = assert_ok!(axum::body::to_bytes(response.into_body(), usize::MAX).await);
    (status, assert_ok!(String::from_utf8(body.to_vec())))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    send(app, assert_ok!(Request::get(uri).body(Body::empty()))).await
}

fn trip_body() -> Value {
    json!({
        "tripId": "t1",
        "tripName": "Hokkaido",
        "items": [
            {"timestamp": "2024-05-01 09:00:00", "author": "Aki", "type": "text", "content": "first day"},
            {"timestamp": "2024-05-02 09:00:00", "type": "image", "content": "https://drive.google.com/file/d/IMG1/view", "comment": "lake"},
            {"timestamp": "2024-05-02 18:00:00", "type": "text", "content": "dinner, see https://example.com/menu"}
        ]
    })
}

async fn mock_trip(server: &MockServer) {
    Mock::given(method("GET"))
        .and(query_param("tripId", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trip_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn index_lists_albums_with_drive_thumbnails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("mode", "list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "albums": [
                {"id": "t1", "name": "Hokkaido", "status": "active", "thumbnails": ["https://drive.google.com/open?id=ABC"]},
                {"id": "t2", "name": "Oslo", "status": "done", "thumbnails": []}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, page) = get(app("", Some(server.uri())), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<title>ANOTHER SKY</title>"));
    assert!(page.contains(r#"src="https://drive.google.com/thumbnail?id=ABC&amp;sz=h400""#));
    assert!(page.contains(r#"href="/?tripId=t1""#));
    assert!(page.contains("● Recording"));
    assert!(page.contains("Archive"));
    assert!(page.contains("No Photos"));
}

#[tokio::test]
async fn trip_page_filters_by_date() {
    let server = MockServer::start().await;
    mock_trip(&server).await;

    let (status, page) = get(
        app("", Some(server.uri())),
        "/?tripId=t1&date=2024-05-02&sort=asc",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<h1>Hokkaido</h1>"));
    assert!(!page.contains("first day"));
    assert!(page.contains(r#"src="https://drive.google.com/thumbnail?id=IMG1&amp;sz=w2000""#));
    let lake = page.find("lake").unwrap();
    let dinner = page.find("dinner").unwrap();
    assert!(lake < dinner, "oldest first");
    assert!(page.contains(r#"<a href="https://example.com/menu" target="_blank""#));
    assert!(page.contains(r#"<option value="2024-05-01">2024/05/01</option>"#));
    assert!(page.contains(r#"<option value="2024-05-02" selected>2024/05/02</option>"#));
    assert!(!page.contains("by Aki"));
    assert!(page.contains("by User"));
}

#[tokio::test]
async fn trip_page_by_path_newest_first() {
    let server = MockServer::start().await;
    mock_trip(&server).await;

    let (status, page) = get(app("", Some(server.uri())), "/trips/t1").await;
    assert_eq!(status, StatusCode::OK);
    let first = page.find("first day").unwrap();
    let dinner = page.find("dinner").unwrap();
    assert!(dinner < first);
    assert!(page.contains("by Aki"));
}

#[tokio::test]
async fn date_without_moments_shows_empty_state() {
    let server = MockServer::start().await;
    mock_trip(&server).await;

    let (_, page) = get(app("", Some(server.uri())), "/?tripId=t1&date=2023-01-01").await;
    assert!(page.contains("No results for this date"));
}

#[tokio::test]
async fn delete_removes_the_moment() {
    let server = MockServer::start().await;
    mock_trip(&server).await;
    Mock::given(method("GET"))
        .and(query_param("action", "deleteContent"))
        .and(query_param("timestamp", "2024-05-01 09:00:00"))
        // whatever the script answers, the moment counts as deleted
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let request = assert_ok!(Request::post("/moments/delete")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "tripId=t1&timestamp=2024-05-01+09%3A00%3A00&sort=desc&date=",
        )));
    let (status, page) = send(app("", Some(server.uri())), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!page.contains("first day"));
    assert!(page.contains("dinner"));
    assert!(!page.contains("Could not delete"));
}

#[tokio::test]
async fn delete_transport_failure_keeps_the_moment() {
    let server = MockServer::start().await;
    mock_trip(&server).await;
    Mock::given(method("GET"))
        .and(query_param("action", "deleteContent"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let request = assert_ok!(Request::post("/moments/delete")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("tripId=t1&timestamp=2024-05-01+09%3A00%3A00")));
    let (_, page) = send(
        app("[Backend]\ntimeout_secs = 1\n", Some(server.uri())),
        request,
    )
    .await;
    assert!(page.contains("Could not delete the moment"));
    assert!(page.contains("first day"));
}

#[tokio::test]
async fn unconfigured_backend() {
    let (status, page) = get(app("", None), "/").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(page.contains("Backend not configured"));

    let (status, body) = get(app("", None), "/api/feed?tripId=t1").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = assert_ok!(serde_json::from_str(&body));
    assert_eq!(body, json!({"error": "Backend URL is not configured"}));
}

#[tokio::test]
async fn backend_error_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "sheet missing"})))
        .mount(&server)
        .await;

    let (status, page) = get(app("", Some(server.uri())), "/?tripId=t1").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(page.contains(r#"<div class="panel error">"#));
    assert!(page.contains("sheet missing"));

    let (status, body) = get(app("", Some(server.uri())), "/api/feed?tripId=t1").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let body: Value = assert_ok!(serde_json::from_str(&body));
    assert_eq!(body, json!({"error": "sheet missing"}));
}

#[tokio::test]
async fn api_feed_trip() {
    let server = MockServer::start().await;
    mock_trip(&server).await;

    let (status, body) = get(
        app("", Some(server.uri())),
        "/api/feed?tripId=t1&date=2024-05-02",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = assert_ok!(serde_json::from_str(&body));
    assert_eq!(body["type"], "trip");
    assert_eq!(body["tripId"], "t1");
    assert_eq!(body["sort"], "desc");
    assert_eq!(body["availableDates"], json!(["2024-05-02", "2024-05-01"]));
    let moments = body["days"][0]["moments"].as_array().unwrap();
    assert_eq!(moments.len(), 2);
    assert_eq!(moments[0]["type"], "text");
    assert_eq!(
        moments[0]["text"][1],
        json!({"type": "link", "label": "https://example.com/menu", "url": "https://example.com/menu"})
    );
    assert_eq!(
        moments[1]["media"]["url"],
        "https://drive.google.com/thumbnail?id=IMG1&sz=w2000"
    );
}
