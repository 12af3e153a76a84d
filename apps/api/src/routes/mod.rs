pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue},
    response::Redirect,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::render::handlers;
use crate::state::AppState;
use crate::templates::handlers::handle_list_templates;

/// Headers attached to every response.
const SECURITY_HEADERS: [(&str, &str); 7] = [
    ("x-dns-prefetch-control", "on"),
    (
        "strict-transport-security",
        "max-age=63072000; includeSubDomains; preload",
    ),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-content-type-options", "nosniff"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "origin-when-cross-origin"),
    (
        "permissions-policy",
        "camera=(), microphone=(), geolocation=()",
    ),
];

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/home", get(|| async { Redirect::permanent("/health") }))
        .route("/api/v1/templates", get(handle_list_templates))
        // Render API
        .route(
            "/api/v1/render/sections",
            post(handlers::handle_section_plan),
        )
        .route("/api/v1/render/html", post(handlers::handle_render_html))
        .route(
            "/api/v1/render/pdf/status",
            get(handlers::handle_pdf_status),
        )
        .route(
            "/api/v1/render/pdf/prepare",
            post(handlers::handle_pdf_prepare),
        )
        .route("/api/v1/render/pdf", post(handlers::handle_render_pdf))
        .with_state(state)
}

/// Router plus the HTTP middleware stack: body limit, security headers,
/// gzip, tracing, CORS.
pub fn build_app(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    let mut app = build_router(state).layer(DefaultBodyLimit::max(max_body_bytes));
    for (name, value) in SECURITY_HEADERS {
        app = app.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }

    app.layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // TODO: restrict origins once the editor's deploy domain is fixed
}
