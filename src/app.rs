use std::time::Duration;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full application router with global middleware applied
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(config.api.request_timeout_secs)))
        .layer(RequestBodyLimitLayer::new(config.api.max_request_size_bytes));

    match cors_layer(&config.security) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        .route("/auth/register", post(public::auth::register))
        .route("/auth/login", post(public::auth::login))
        .route("/help-center/topics", get(public::topics::list_topics))
        .route("/help-center/topics/:id", get(public::topics::get_topic))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(protected::users::list_users))
        .route("/users/deactivate", patch(protected::users::deactivate_account))
        .route(
            "/users/:id",
            get(protected::users::get_user).patch(protected::users::update_user),
        )
        .route("/help-center/topics", post(protected::topics::create_topic))
        .route(
            "/help-center/topics/:id",
            patch(protected::topics::update_topic).delete(protected::topics::delete_topic),
        )
        .route_layer(from_fn_with_state(state.jwt.clone(), jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
