//! Embedded PWA shell
//!
//! Only an explicit list of files is served; every other path is a plain
//! 404 so nothing else under `web/` leaks out.

use axum::{
    body::Body,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "web"]
pub struct Assets;

/// Request paths that map to embedded files
const SERVED_FILES: &[&str] = &[
    "index.html",
    "manifest.json",
    "service-worker.js",
    "static/js/app.js",
    "icon.svg",
];

// The service worker owns offline caching, so the browser should revalidate
const CACHE_REVALIDATE: &str = "public, max-age=0, must-revalidate";

fn not_found() -> Response<Body> {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

pub async fn serve_assets(uri: Uri) -> Response<Body> {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    if !SERVED_FILES.contains(&path) {
        tracing::debug!(path, "Static file not in the served list");
        return not_found();
    }

    let Some(file) = Assets::get(path) else {
        tracing::warn!(path, "Listed static file is missing from the build");
        return not_found();
    };

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let etag = hex::encode(file.metadata.sha256_hash());

    (
        [
            (header::CONTENT_TYPE, mime.as_ref().to_string()),
            (header::CACHE_CONTROL, CACHE_REVALIDATE.to_string()),
            (header::ETAG, format!("\"{}\"", etag)),
        ],
        file.data.into_owned(),
    )
        .into_response()
}
