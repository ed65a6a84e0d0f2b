//! HTTP surface tests driving the router directly

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use image::{DynamicImage, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::Arc;
use tower::ServiceExt;
use ursine_classifier::{ImageClassifier, Prediction, Result};
use ursine_demo::server::build_app;
use ursine_demo::state::AppState;

struct FixedClassifier {
    labels: Vec<String>,
}

impl FixedClassifier {
    fn new() -> Self {
        Self {
            labels: vec!["grizzly".to_string(), "teddy".to_string()],
        }
    }
}

impl ImageClassifier for FixedClassifier {
    fn predict(&self, _image: &DynamicImage) -> Result<Prediction> {
        Ok(Prediction {
            label: "grizzly".to_string(),
            probability: 0.97,
            probabilities: vec![
                ("grizzly".to_string(), 0.97),
                ("teddy".to_string(), 0.03),
            ],
        })
    }

    fn name(&self) -> &str {
        "fixed"
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

fn test_app() -> axum::Router {
    build_app(AppState::new(Arc::new(FixedClassifier::new())))
}

fn png_bytes() -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([140, 90, 40])));
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

const BOUNDARY: &str = "ursine-test-boundary";

fn multipart_request(path: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn classify_before_upload_reports_null_image() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/classify")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "image is null");
}

#[tokio::test]
async fn upload_rejects_unsupported_extension() {
    let response = test_app()
        .oneshot(multipart_request("/api/upload", "bear.gif", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn upload_rejects_undecodable_bytes() {
    let response = test_app()
        .oneshot(multipart_request("/api/upload", "bear.png", b"not an image"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_then_classify_scenario() {
    let app = test_app();

    // Upload a valid jpg-named PNG payload; decode is sniffed from bytes
    let response = app
        .clone()
        .oneshot(multipart_request("/api/upload", "bear.jpg", &png_bytes()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let uploaded = body_json(response).await;
    assert_eq!(uploaded["phase"], "image_loaded");
    assert_eq!(uploaded["filename"], "bear.jpg");

    // Preview is now available
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/preview")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "image/png"
    );

    // Classify
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/classify")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let verdict = body_json(response).await;
    assert_eq!(verdict["label"], "grizzly");
    let probability = verdict["probability"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&probability));
    let message = verdict["message"].as_str().unwrap();
    assert!(message.contains("grizzly"));
    assert!(message.contains("(Prob: 0.9700)"));

    // Session reflects the classified phase
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let session = body_json(response).await;
    assert_eq!(session["phase"], "classified");
    assert_eq!(session["verdict"]["label"], "grizzly");
}

#[tokio::test]
async fn preview_before_upload_is_not_found() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/preview")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn index_page_is_served() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8_lossy(&bytes);
    assert!(page.contains("Classify"));
}
