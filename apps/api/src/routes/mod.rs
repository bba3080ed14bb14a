use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::post,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use crate::analysis::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found() -> Result<(), AppError> {
    Err(AppError::NotFound)
}

/// Headers stamped on every response, errors and 404s included.
const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, GET, OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

pub fn build_router(state: AppState) -> Router {
    // OPTIONS is answered here with 2xx so browser preflights let cross-origin POSTs
    // through; it is the one method besides POST that does not fall back to 404.
    // The header layers below cover every other response.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let mut router = Router::new()
        .route(
            "/api/analyze",
            post(handlers::handle_analyze).fallback(not_found),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(cors);

    for (name, value) in CORS_HEADERS {
        router = router.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }
    router
}
