//! API key administration handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::AppState;
use crate::auth::{Capability, CredentialSources};
use crate::db::EnableOutcome;
use crate::web::dto::{ApiKeyResponse, ApiResponse, CreateApiKeyRequest, MessageResponse};
use crate::web::error::ApiError;
use crate::web::middleware::RequestCredentials;

/// POST /api-keys - Issue a new API key.
pub async fn create_api_key(
    State(state): State<Arc<AppState>>,
    RequestCredentials(credentials): RequestCredentials,
    Json(req): Json<CreateApiKeyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ApiKeyResponse>>), ApiError> {
    state
        .authorizer
        .require(&credentials, Capability::Administer)
        .await?;

    let capability = Capability::parse(&req.key_type)
        .ok_or_else(|| ApiError::bad_request("Invalid API key type"))?;

    let key = state.keys.issue(capability).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(ApiKeyResponse::from(key))),
    ))
}

/// DELETE /api-keys/:key - Disable an API key.
pub async fn disable_api_key(
    State(state): State<Arc<AppState>>,
    RequestCredentials(credentials): RequestCredentials,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    set_key_enabled(&state, &credentials, &key, false).await
}

/// POST /api-keys/:key/enable - Re-enable an API key.
pub async fn enable_api_key(
    State(state): State<Arc<AppState>>,
    RequestCredentials(credentials): RequestCredentials,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    set_key_enabled(&state, &credentials, &key, true).await
}

async fn set_key_enabled(
    state: &AppState,
    credentials: &CredentialSources,
    key: &str,
    enabled: bool,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .authorizer
        .require(credentials, Capability::Administer)
        .await?;

    let outcome = state.keys.set_enabled(key, enabled).await?;

    let message = match (outcome, enabled) {
        (EnableOutcome::Changed, true) => "API key enabled",
        (EnableOutcome::Changed, false) => "API key disabled",
        (EnableOutcome::Unchanged, true) => "API key already enabled",
        (EnableOutcome::Unchanged, false) => "API key already disabled",
    };

    Ok(Json(ApiResponse::new(MessageResponse::new(message))))
}
