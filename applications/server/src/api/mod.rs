/// API route modules
pub mod auth;
pub mod expenses;
pub mod health;

use crate::{middleware, services::IdentityResolver, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full `/api` router.
///
/// Every expense route sits behind the auth middleware, which resolves the
/// bearer token through `resolver`.
pub fn create_router(app_state: AppState, resolver: Arc<dyn IdentityResolver>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/expenses", get(expenses::list_expenses))
        .route("/expenses/add", post(expenses::add_expense))
        .route(
            "/expenses/:id",
            get(expenses::get_expense)
                .put(expenses::update_expense)
                .delete(expenses::delete_expense),
        )
        .layer(axum_middleware::from_fn_with_state(
            resolver,
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
