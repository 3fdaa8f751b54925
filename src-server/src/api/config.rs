use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use menorah_core::config::{CampaignConfig, ConfigUpdate};

use crate::{error::ApiResult, events::ServerEvent, main_lib::AppState};

async fn get_config(State(state): State<Arc<AppState>>) -> ApiResult<Json<CampaignConfig>> {
    let config = state.config_service.get()?;
    Ok(Json(config))
}

async fn update_config(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ConfigUpdate>,
) -> ApiResult<Json<CampaignConfig>> {
    let config = state.config_service.update(payload).await?;
    // A goal or segment change moves the derived numbers, so the event
    // carries freshly computed stats alongside the new config.
    let stats = state.donation_service.get_stats()?;
    state.event_bus.publish(ServerEvent::ConfigUpdated {
        config: config.clone(),
        stats,
    });
    Ok(Json(config))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/config", get(get_config).put(update_config))
}
