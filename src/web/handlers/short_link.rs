//! Short link handlers.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    response::Response,
    Json,
};

use super::file::file_response;
use super::AppState;
use crate::auth::{Capability, CredentialSources};
use crate::db::EnableOutcome;
use crate::web::dto::{ApiResponse, MessageResponse, ShortLinkResponse, ShortenRequest};
use crate::web::error::ApiError;
use crate::web::middleware::RequestCredentials;

/// POST /shorten - Create a short link for a stored file.
///
/// The link is private iff the file is found only in the private subtree.
pub async fn create_short_link(
    State(state): State<Arc<AppState>>,
    RequestCredentials(credentials): RequestCredentials,
    Json(req): Json<ShortenRequest>,
) -> Result<Json<ApiResponse<ShortLinkResponse>>, ApiError> {
    state
        .authorizer
        .require(&credentials, Capability::Shorten)
        .await?;

    let link = state
        .registry
        .allocate_for_file(&state.storage, &req.filename)
        .await?;

    Ok(Json(ApiResponse::new(ShortLinkResponse {
        short_url_path: format!("/s/{}", link.code),
        short_code: link.code,
        filename: link.target_filename,
        is_private: link.private,
    })))
}

/// GET /s/:code - Download the file behind a short link.
///
/// Disabled and unknown codes are both 404. Private links need a download
/// key. The file is read only from the subtree recorded on the link.
pub async fn resolve_short_link(
    State(state): State<Arc<AppState>>,
    RequestCredentials(credentials): RequestCredentials,
    Path(code): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let link = state.registry.resolve(&code).await?;

    if link.private {
        state
            .authorizer
            .require(&credentials, Capability::Download)
            .await?;
    }

    let content = state
        .storage
        .load(link.subtree(), &link.target_filename)
        .map_err(|e| {
            tracing::warn!("Short link target unavailable: {}", e);
            ApiError::not_found("Original file not found")
        })?;

    file_response(&link.target_filename, content)
}

/// DELETE /shorten/:code - Disable a short link.
pub async fn disable_short_link(
    State(state): State<Arc<AppState>>,
    RequestCredentials(credentials): RequestCredentials,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    set_link_enabled(&state, &credentials, &code, false).await
}

/// POST /shorten/:code/enable - Re-enable a short link.
pub async fn enable_short_link(
    State(state): State<Arc<AppState>>,
    RequestCredentials(credentials): RequestCredentials,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    set_link_enabled(&state, &credentials, &code, true).await
}

async fn set_link_enabled(
    state: &AppState,
    credentials: &CredentialSources,
    code: &str,
    enabled: bool,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .authorizer
        .require(credentials, Capability::Shorten)
        .await?;

    let outcome = state.registry.set_enabled(code, enabled).await?;

    let message = match (outcome, enabled) {
        (EnableOutcome::Changed, true) => "Short link enabled",
        (EnableOutcome::Changed, false) => "Short link disabled",
        (EnableOutcome::Unchanged, true) => "Short link already enabled",
        (EnableOutcome::Unchanged, false) => "Short link already disabled",
    };

    Ok(Json(ApiResponse::new(MessageResponse::new(message))))
}
