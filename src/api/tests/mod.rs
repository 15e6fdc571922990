use super::*;
use crate::types::NewRecord;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tempfile::tempdir;
use tower::ServiceExt;


/// Fresh store in a temp dir, with the default config
async fn create_test_state() -> (Arc<Database>, Arc<Config>, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();
    let db = Database::new(&temp_dir.path().join("foli.db"))
        .await
        .unwrap();
    (Arc::new(db), Arc::new(Config::default()), temp_dir)
}

fn sample_record(title: &str, filename: &str) -> NewRecord {
    NewRecord {
        title: title.to_string(),
        description: format!("about {}", title),
        filename: filename.to_string(),
        source_url: format!("https://cdn.example.com/projects/original/{}", filename),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post_query(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/q")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_api_server_serves_and_shuts_down() {
    let (db, config, _temp_dir) = create_test_state().await;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(serve_with_shutdown(listener, db, config, async move {
        shutdown_rx.await.ok();
    }));

    let response = reqwest::get(format!("http://{}/health", address))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    shutdown_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_cors_enabled() {
    let (db, config, _temp_dir) = create_test_state().await;
    let app = create_router(db, config);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let (db, config, _temp_dir) = create_test_state().await;
    let mut config = (*config).clone();
    config.server.cors_enabled = false;
    let app = create_router(db, Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}

#[tokio::test]
async fn test_cors_specific_origin() {
    let (db, config, _temp_dir) = create_test_state().await;
    let mut config = (*config).clone();
    config.server.cors_origins = vec!["http://allowed.example".to_string()];
    let app = create_router(db, Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://allowed.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://allowed.example"
    );
}
