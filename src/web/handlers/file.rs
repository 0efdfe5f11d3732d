//! File upload and download handlers.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, HeaderMap},
    response::Response,
    Json,
};

use super::AppState;
use crate::auth::Capability;
use crate::file::{sanitize_filename, Subtree};
use crate::web::dto::{ApiResponse, UploadResponse};
use crate::web::error::ApiError;
use crate::web::middleware::RequestCredentials;
use crate::web::router::is_reserved_filename;

/// Header selecting the upload subtree. Only `public` selects the public one.
pub const TARGET_DIR_HEADER: &str = "x-target-dir";

/// Generate a safe Content-Disposition header value.
///
/// Control characters, quotes and backslashes never reach the plain
/// `filename` parameter. Non-ASCII names are also sent RFC 5987 encoded.
pub(crate) fn content_disposition_header(filename: &str) -> String {
    let needs_encoding = !filename.is_ascii()
        || filename
            .chars()
            .any(|c| c.is_control() || c == '"' || c == '\\');

    if !needs_encoding {
        return format!("attachment; filename=\"{filename}\"");
    }

    let fallback: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            c if !c.is_ascii() => '_',
            c => c,
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(filename)
    )
}

/// Build a download response for file content.
pub(crate) fn file_response(filename: &str, content: Vec<u8>) -> Result<Response<Body>, ApiError> {
    let content_type = mime_guess::from_path(filename)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(filename),
        )
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}

fn target_subtree(headers: &HeaderMap) -> Subtree {
    let public = headers
        .get(TARGET_DIR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().eq_ignore_ascii_case("public"))
        .unwrap_or(false);

    if public {
        Subtree::Public
    } else {
        Subtree::Private
    }
}

/// POST /upload - Upload a file.
///
/// Requires an upload key. The multipart field `file` carries the content;
/// files go to the private subtree unless `X-Target-Dir: public` is sent.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    RequestCredentials(credentials): RequestCredentials,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    state
        .authorizer
        .require(&credentials, Capability::Upload)
        .await?;

    let subtree = target_subtree(&headers);

    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| ApiError::bad_request("File field has no filename"))?;
        let content = field.bytes().await.map_err(|e| {
            tracing::debug!("Failed to read file content: {}", e);
            ApiError::bad_request("Failed to read file")
        })?;
        upload = Some((filename, content.to_vec()));
    }

    let (filename, content) = upload.ok_or_else(|| ApiError::bad_request("Missing file field"))?;

    let safe_name = sanitize_filename(&filename)?;
    if is_reserved_filename(&safe_name) {
        return Err(ApiError::bad_request(format!(
            "Filename {safe_name:?} is reserved"
        )));
    }

    if content.len() > state.max_upload_size {
        return Err(ApiError::payload_too_large(format!(
            "File exceeds the {} byte upload limit",
            state.max_upload_size
        )));
    }

    let stored_name = state.storage.save(subtree, &safe_name, &content)?;

    tracing::info!(
        "Stored {} ({} bytes) in {} subtree",
        stored_name,
        content.len(),
        subtree
    );

    Ok(Json(ApiResponse::new(UploadResponse {
        download_path: format!("/{}", urlencoding::encode(&stored_name)),
        is_private: subtree.is_private(),
        filename: stored_name,
    })))
}

/// GET /:filename - Download a file.
///
/// Public files are served to anyone. Anything else needs a download key
/// before the private subtree is even consulted, so callers without one
/// cannot probe which private files exist.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    RequestCredentials(credentials): RequestCredentials,
    Path(filename): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let filename = sanitize_filename(&filename)?;

    if state.storage.exists(Subtree::Public, &filename) {
        let content = state.storage.load(Subtree::Public, &filename)?;
        return file_response(&filename, content);
    }

    state
        .authorizer
        .require(&credentials, Capability::Download)
        .await?;

    let content = state.storage.load(Subtree::Private, &filename)?;
    file_response(&filename, content)
}
