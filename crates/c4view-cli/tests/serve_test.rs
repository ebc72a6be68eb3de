//! Viewer server tests against a local mock of the C4 API.

use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use c4view::{Viewer, config::AppConfig};
use c4view_cli::serve::router;

async fn get_container(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    match id.as_str() {
        "Containers" => Ok(Json(json!({
            "id": "Containers",
            "name": "Containers",
            "elements": [
                {"id": "web", "name": "Web Application", "viewUrl": "/component/Components"},
                {"id": "db", "name": "Database"}
            ],
            "relationships": [
                {"id": "r1", "sourceId": "web", "destinationId": "db", "description": "Reads from"}
            ]
        }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Starts a mock backend and a viewer in front of it; returns the viewer URL.
async fn spawn_viewer() -> String {
    let backend = spawn(Router::new().route("/containers/:id", get(get_container))).await;

    let viewer = Viewer::new(AppConfig::default().with_base_url(backend));
    let client = viewer.client().unwrap();
    spawn(router(viewer, client)).await
}

async fn fetch(url: String) -> (u16, Option<String>, String) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    (status, content_type, response.text().await.unwrap())
}

#[tokio::test]
async fn test_list_page() {
    let viewer = spawn_viewer().await;
    let (status, _, body) = fetch(format!("{viewer}/")).await;

    assert_eq!(status, 200);
    assert!(body.contains("href=\"/container/Containers\""));
    assert!(body.contains("System Landscape"));
}

#[tokio::test]
async fn test_view_page() {
    let viewer = spawn_viewer().await;
    let (status, content_type, body) = fetch(format!("{viewer}/container/Containers")).await;

    assert_eq!(status, 200);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains("Web Application"));
    assert!(body.contains("href=\"/component/Components\""));
}

#[tokio::test]
async fn test_diagram() {
    let viewer = spawn_viewer().await;
    let (status, content_type, body) =
        fetch(format!("{viewer}/container/Containers/diagram.svg")).await;

    assert_eq!(status, 200);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
    assert!(body.contains("<svg"));
    assert!(body.contains("Reads from"));
}

#[tokio::test]
async fn test_failed_fetch_shows_error_page() {
    let viewer = spawn_viewer().await;
    let (status, _, body) = fetch(format!("{viewer}/container/Unknown")).await;

    assert_eq!(status, 502);
    assert!(body.contains("Error :("));
}

#[tokio::test]
async fn test_unknown_routes_are_not_found() {
    let viewer = spawn_viewer().await;

    for path in ["/deployment/x", "/containers/Containers", "/container", "/a/b/c/d"] {
        let (status, _, body) = fetch(format!("{viewer}{path}")).await;
        assert_eq!(status, 404, "{path}");
        assert!(body.contains("No view at"));
    }
}
