use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, main_lib::AppState};

pub mod config;
pub mod donations;
pub mod gifs;
pub mod health;
pub mod stats;
pub mod stream;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    // The SSE route is merged after the timeout layer so long-lived
    // streams are not cut off at the request deadline.
    let api = Router::new()
        .merge(health::router())
        .merge(donations::router())
        .merge(config::router())
        .merge(stats::router())
        .merge(gifs::router())
        .layer(TimeoutLayer::new(config.request_timeout))
        .merge(stream::router());

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
