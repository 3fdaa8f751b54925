use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use menorah_core::stats::DonationStats;

use crate::{error::ApiResult, main_lib::AppState};

async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<DonationStats>> {
    let stats = state.donation_service.get_stats()?;
    Ok(Json(stats))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(get_stats))
}
