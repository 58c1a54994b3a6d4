use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::handlers;
use crate::AppState;

pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let auth_routes = Router::new()
        .route("/api/auth/signup", post(handlers::auth::signup))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/refresh", post(handlers::auth::refresh))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/api/session", get(handlers::session::get_session))
        .merge(auth_routes);

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::auth::me))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        // Mood
        .route("/api/mood/entries", get(handlers::mood::list_entries))
        .route("/api/mood/today", get(handlers::mood::get_today))
        .route("/api/mood/check-in", post(handlers::mood::check_in))
        .route("/api/mood/calendar", get(handlers::mood::get_calendar))
        .route("/api/mood/summary", get(handlers::mood::get_summary))
        .route("/api/mood/taxonomy", get(handlers::mood::get_taxonomy))
        // Financial
        .route(
            "/api/financial/entries",
            get(handlers::financial::list_entries).post(handlers::financial::create_entry),
        )
        .route(
            "/api/financial/summary",
            get(handlers::financial::get_summary),
        )
        .route(
            "/api/financial/categories",
            get(handlers::financial::list_categories),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let cors = cors_layer(&state.config.frontend_url, &state.config.cors_extra_origins)?;

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors_layer(frontend_url: &str, extra: &[String]) -> anyhow::Result<CorsLayer> {
    let mut origins = vec![frontend_url.parse::<HeaderValue>()?];
    // extra origins are best effort, e.g. LAN testing from another device
    for origin in extra {
        match origin.parse::<HeaderValue>() {
            Ok(hv) => origins.push(hv),
            Err(_) => tracing::warn!(origin = %origin, "Ignoring invalid CORS origin"),
        }
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true))
}
