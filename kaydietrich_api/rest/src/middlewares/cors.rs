use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use tower_http::cors::CorsLayer;

/// Scopes the API to a single origin. The layer also answers pre-flight
/// requests before any body parsing happens.
pub fn add<S: Clone + Send + Sync + 'static>(
    allowed_origin: HeaderValue,
) -> impl FnOnce(Router<S>) -> Router<S> {
    move |router| {
        router.layer(
            CorsLayer::new()
                .allow_origin(allowed_origin)
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE]),
        )
    }
}
