//! Static asset serving for the browser battery.
//!
//! Requested paths are vetted with the same sanitization function used for
//! uploaded filenames; any path the sanitizer would alter is treated as a
//! traversal attempt and reported as not found.

use axum::extract::{Path as AxumPath, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use cogkit_files::sanitize_filename;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Serves the battery's entry page from `<public_dir>/index.html`.
pub async fn index_handler(State(state): State<AppState>) -> ApiResult<Response> {
    serve_public_file(&state, "index.html").await
}

/// Serves one file from the public asset root.
///
/// The requested path must already be in sanitized form; if sanitization
/// would change it (separators, traversal sequences, hidden-file prefixes,
/// non-ASCII), the request is answered with 404 rather than an error that
/// would confirm the path exists.
pub async fn static_handler(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> ApiResult<Response> {
    if path.is_empty() || sanitize_filename(&path) != path {
        tracing::debug!(requested = %path, "rejected unsanitary static path");
        return Err(not_found());
    }

    serve_public_file(&state, &path).await
}

async fn serve_public_file(state: &AppState, name: &str) -> ApiResult<Response> {
    let path = state.server.public_dir().join(name);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to read static asset");
            return Err(not_found());
        }
    };

    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.as_ref().to_string())],
        bytes,
    )
        .into_response())
}

fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
