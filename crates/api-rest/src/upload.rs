//! CSV result upload endpoint.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;

use cogkit_files::{sanitize_filename, StoreError};

use crate::error::{ApiError, ApiResult, ResponseEnvelope};
use crate::AppState;

/// Multipart form field the browser battery submits its results under.
pub const UPLOAD_FIELD: &str = "csvFile";

#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "One result file in the `csvFile` field"
    ),
    responses(
        (status = 201, description = "File stored", body = ResponseEnvelope),
        (status = 400, description = "Missing field or rejected file type", body = ResponseEnvelope),
        (status = 409, description = "A file with this name already exists", body = ResponseEnvelope),
        (status = 413, description = "Body exceeds the configured size cap"),
        (status = 500, description = "File could not be saved", body = ResponseEnvelope)
    )
)]
/// Accepts one uploaded result file and persists it.
///
/// The file must arrive in the `csvFile` multipart field with an allowed
/// extension and the exact required MIME type. The stored name is the
/// sanitized form of the client filename; an existing file of that name is
/// never overwritten.
///
/// # Errors
/// - `400` if the field is absent or the file fails the allow-list
/// - `409` if the sanitized name is already taken
/// - `500` if the write fails (detail logged server-side only)
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ResponseEnvelope>)> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(ApiError::from_multipart)?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_owned);
        let mime = field.content_type().map(str::to_owned);
        let payload = field.bytes().await.map_err(ApiError::from_multipart)?;
        upload = Some((filename, mime, payload));
        break;
    }

    let Some((filename, mime, payload)) = upload else {
        return Err(ApiError::bad_request("No file part in the request"));
    };

    if !state
        .policy
        .is_allowed_file(filename.as_deref(), mime.as_deref())
    {
        return Err(ApiError::bad_request(
            "Invalid file. The server rejected the file type.",
        ));
    }

    // is_allowed_file guarantees a filename is present
    let name = sanitize_filename(filename.as_deref().unwrap_or_default());
    if name.is_empty() {
        return Err(ApiError::bad_request(
            "Invalid file. The server rejected the file type.",
        ));
    }

    match state.store.save(&name, &payload) {
        Ok(()) => {
            tracing::info!(filename = %name, bytes = payload.len(), "stored uploaded file");
            Ok((
                StatusCode::CREATED,
                Json(ResponseEnvelope::success(
                    format!("File '{name}' uploaded successfully."),
                    name,
                )),
            ))
        }
        Err(StoreError::DuplicateFile(_)) => Err(ApiError::conflict(format!(
            "File '{name}' already exists on the server."
        ))),
        Err(e) => {
            tracing::error!(filename = %name, error = %e, "failed to save uploaded file");
            Err(ApiError::internal("Could not save file to server."))
        }
    }
}
