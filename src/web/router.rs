//! Router configuration for the fileshare HTTP surface.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_api_key, create_short_link, disable_api_key, disable_short_link, download_file,
    enable_api_key, enable_short_link, health_check, random_uuid, resolve_short_link,
    upload_file, AppState,
};
use super::middleware::security_headers;

/// Single-segment paths taken by fixed routes.
///
/// `GET /{filename}` can never reach a file with one of these names, so
/// uploads refuse them.
pub const RESERVED_FILENAMES: [&str; 5] = ["health", "uuid", "upload", "shorten", "api-keys"];

/// Whether `name` collides with a fixed route.
pub fn is_reserved_filename(name: &str) -> bool {
    RESERVED_FILENAMES.contains(&name)
}

/// Allowance for multipart framing on top of the upload limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the main router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let body_limit = app_state.max_upload_size.saturating_add(MULTIPART_OVERHEAD);

    let upload_routes = Router::new()
        .route("/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(body_limit));

    let short_link_routes = Router::new()
        .route("/shorten", post(create_short_link))
        .route("/shorten/:code", delete(disable_short_link))
        .route("/shorten/:code/enable", post(enable_short_link))
        .route("/s/:code", get(resolve_short_link));

    let api_key_routes = Router::new()
        .route("/api-keys", post(create_api_key))
        .route("/api-keys/:key", delete(disable_api_key))
        .route("/api-keys/:key/enable", post(enable_api_key));

    Router::new()
        .route("/health", get(health_check))
        .route("/uuid", get(random_uuid))
        .merge(upload_routes)
        .merge(short_link_routes)
        .merge(api_key_routes)
        .route("/:filename", get(download_file))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}
