use axum::{
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "web/dist"]
struct WebAssets;

/// Serve the embedded single-page UI
pub async fn serve_static(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    // Try exact path first
    if let Some(content) = <WebAssets as Embed>::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.as_ref())],
            content.data.into_owned(),
        )
            .into_response();
    }

    // Serve index.html for any unmatched route
    if let Some(content) = <WebAssets as Embed>::get("index.html") {
        return Html(String::from_utf8_lossy(&content.data).to_string()).into_response();
    }

    // Fallback: a bare-bones page if the embedded UI is missing
    Html(FALLBACK_HTML.to_string()).into_response()
}

const FALLBACK_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Ursine</title>
</head>
<body>
    <h1>Ursine</h1>
    <p>Upload an image, then classify it.</p>
    <input type="file" id="file" accept=".png,.jpeg,.jpg">
    <button id="classify">Classify</button>
    <p id="result"></p>
    <script>
        document.getElementById('file').addEventListener('change', async (e) => {
            const form = new FormData();
            form.append('file', e.target.files[0]);
            await fetch('/api/upload', { method: 'POST', body: form });
        });
        document.getElementById('classify').addEventListener('click', async () => {
            const res = await fetch('/api/classify', { method: 'POST' });
            const data = await res.json();
            document.getElementById('result').textContent = data.message || data.error;
        });
    </script>
</body>
</html>
"#;
