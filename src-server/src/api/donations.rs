use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use menorah_core::{
    donations::{
        CreateDonationRequest, Donation, DonationUpdate, PremiumTier, PremiumWordStatus,
        PREMIUM_TIERS,
    },
    stats::DonationStats,
};

use crate::{error::ApiResult, events::ServerEvent, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DonationListResponse {
    donations: Vec<Donation>,
    stats: DonationStats,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DonationResponse {
    donation: Donation,
    stats: DonationStats,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PremiumWordsResponse {
    words: Vec<PremiumWordStatus>,
    tiers: &'static [PremiumTier],
}

async fn list_donations(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DonationListResponse>> {
    let donations = state.donation_service.get_all()?;
    let stats = state.donation_service.get_stats()?;
    Ok(Json(DonationListResponse { donations, stats }))
}

async fn get_donation(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Donation>> {
    let donation = state.donation_service.get_by_id(id)?;
    Ok(Json(donation))
}

async fn create_donation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateDonationRequest>,
) -> ApiResult<(StatusCode, Json<DonationResponse>)> {
    let donation = state.donation_service.create(payload).await?;
    let stats = state.donation_service.get_stats()?;
    state.event_bus.publish(ServerEvent::DonationNew {
        donation: donation.clone(),
        stats: stats.clone(),
    });
    Ok((StatusCode::CREATED, Json(DonationResponse { donation, stats })))
}

async fn update_donation(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DonationUpdate>,
) -> ApiResult<Json<DonationResponse>> {
    let donation = state.donation_service.update(id, payload).await?;
    let stats = state.donation_service.get_stats()?;
    state.event_bus.publish(ServerEvent::DonationUpdated {
        donation: donation.clone(),
        stats: stats.clone(),
    });
    Ok(Json(DonationResponse { donation, stats }))
}

async fn delete_donation(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DonationResponse>> {
    let donation = state.donation_service.delete(id).await?;
    let stats = state.donation_service.get_stats()?;
    state.event_bus.publish(ServerEvent::DonationDeleted {
        donation_id: donation.id,
        donation: donation.clone(),
        stats: stats.clone(),
    });
    Ok(Json(DonationResponse { donation, stats }))
}

async fn premium_words(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PremiumWordsResponse>> {
    let words = state.donation_service.get_premium_words()?;
    Ok(Json(PremiumWordsResponse {
        words,
        tiers: &PREMIUM_TIERS,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/donations", get(list_donations).post(create_donation))
        .route("/donations/premium-words", get(premium_words))
        .route(
            "/donations/{id}",
            get(get_donation)
                .put(update_donation)
                .delete(delete_donation),
        )
}
