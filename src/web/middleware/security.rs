//! Response hardening headers.

use axum::{
    body::Body,
    http::{
        header::{self, HeaderValue},
        Request,
    },
    middleware::Next,
    response::Response,
};

/// Adds hardening headers to every response.
///
/// - `X-Content-Type-Options: nosniff`, so served files are never sniffed
///   into an executable type
/// - `X-Frame-Options: DENY`
/// - `Referrer-Policy: no-referrer`, since download URLs may carry `?token=`
/// - `Cache-Control: no-store` unless the handler set its own
pub async fn security_headers(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));

    if !headers.contains_key(header::CACHE_CONTROL) {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, middleware, routing::get, Router};
    use tower::util::ServiceExt;

    async fn plain() -> &'static str {
        "OK"
    }

    async fn cached() -> ([(header::HeaderName, &'static str); 1], &'static str) {
        ([(header::CACHE_CONTROL, "public, max-age=60")], "OK")
    }

    fn app() -> Router {
        Router::new()
            .route("/", get(plain))
            .route("/cached", get(cached))
            .layer(middleware::from_fn(security_headers))
    }

    #[tokio::test]
    async fn test_security_headers_added() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
        assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
        assert_eq!(headers.get("Referrer-Policy").unwrap(), "no-referrer");
        assert_eq!(headers.get("Cache-Control").unwrap(), "no-store");
    }

    #[tokio::test]
    async fn test_handler_cache_control_kept() {
        let response = app()
            .oneshot(Request::builder().uri("/cached").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("Cache-Control").unwrap(),
            "public, max-age=60"
        );
    }

    #[tokio::test]
    async fn test_headers_on_not_found() {
        let response = app()
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("X-Content-Type-Options").unwrap(),
            "nosniff"
        );
    }
}
