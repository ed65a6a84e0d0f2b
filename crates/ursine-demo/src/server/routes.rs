use crate::confidence::Verdict;
use crate::session::{SelectedImage, SessionError, SessionPhase};
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use image::DynamicImage;
use serde::Serialize;
use std::io::Cursor;
use std::path::Path;

/// File extensions accepted by the upload surface
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpeg", "jpg"];

const PREVIEW_MAX_DIM: u32 = 300;

// ============================================================================
// Health endpoint
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================================
// Session endpoints
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub filename: Option<String>,
    pub verdict: Option<Verdict>,
}

pub async fn session_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    Json(snapshot(&state))
}

fn snapshot(state: &AppState) -> SessionSnapshot {
    let session = state.session.read();
    SessionSnapshot {
        phase: session.phase(),
        filename: session.selected().map(|s| s.filename.clone()),
        verdict: session.verdict().cloned(),
    }
}

// ============================================================================
// Upload endpoint
// ============================================================================

pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return error_json(StatusCode::BAD_REQUEST, "no file field in upload"),
            Err(e) => {
                return error_json(
                    StatusCode::BAD_REQUEST,
                    &format!("malformed multipart body: {e}"),
                )
            }
        };

        // Skip non-file fields
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        if !extension_allowed(&filename) {
            return error_json(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "only png, jpeg and jpg uploads are accepted",
            );
        }

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return error_json(
                    StatusCode::BAD_REQUEST,
                    &format!("failed to read upload: {e}"),
                )
            }
        };

        let image = match image::load_from_memory(&bytes) {
            Ok(image) => image,
            Err(e) => {
                return error_json(
                    StatusCode::BAD_REQUEST,
                    &format!("could not decode image: {e}"),
                )
            }
        };

        let preview_png = match render_preview(&image) {
            Ok(preview) => preview,
            Err(e) => {
                return error_json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &format!("could not render preview: {e}"),
                )
            }
        };

        tracing::info!(
            %filename,
            width = image.width(),
            height = image.height(),
            "image uploaded"
        );

        state.session.write().upload(SelectedImage {
            filename,
            image,
            preview_png,
        });

        return (StatusCode::OK, Json(snapshot(&state))).into_response();
    }
}

fn extension_allowed(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn render_preview(image: &DynamicImage) -> image::ImageResult<Vec<u8>> {
    let thumbnail = image.thumbnail(PREVIEW_MAX_DIM, PREVIEW_MAX_DIM);
    let mut buf = Cursor::new(Vec::new());
    thumbnail.write_to(&mut buf, image::ImageFormat::Png)?;
    Ok(buf.into_inner())
}

// ============================================================================
// Classify endpoint
// ============================================================================

pub async fn classify(State(state): State<AppState>) -> Response {
    let result = {
        let mut session = state.session.write();
        session.classify(state.classifier.as_ref())
    };

    match result {
        Ok(verdict) => {
            tracing::info!(
                label = %verdict.label,
                probability = verdict.probability as f64,
                "image classified"
            );
            (StatusCode::OK, Json(verdict)).into_response()
        }
        Err(SessionError::NoImageSelected) => error_json(StatusCode::CONFLICT, "image is null"),
        Err(SessionError::Classifier(e)) => error_json(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("classification failed: {e}"),
        ),
    }
}

// ============================================================================
// Preview endpoint
// ============================================================================

pub async fn preview(State(state): State<AppState>) -> Response {
    let session = state.session.read();
    match session.selected() {
        Some(selected) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/png")],
            selected.preview_png.clone(),
        )
            .into_response(),
        None => error_json(StatusCode::NOT_FOUND, "no image selected"),
    }
}

fn error_json(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
