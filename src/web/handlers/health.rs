//! Liveness and utility handlers.

use axum::Json;

use crate::web::dto::{ApiResponse, HealthResponse, UuidResponse};

/// GET /health - Liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}

/// GET /uuid - Generate a random UUIDv4.
pub async fn random_uuid() -> Json<ApiResponse<UuidResponse>> {
    Json(ApiResponse::new(UuidResponse {
        uuid: uuid::Uuid::new_v4().to_string(),
    }))
}
