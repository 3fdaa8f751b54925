use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::{config::Config, events::EventBus};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use menorah_core::{
    config::{ConfigRepository, ConfigService, ConfigServiceTrait},
    db::{self, write_actor},
    donations::{DonationRepository, DonationService, DonationServiceTrait},
};

pub struct AppState {
    pub donation_service: Arc<dyn DonationServiceTrait + Send + Sync>,
    pub config_service: Arc<dyn ConfigServiceTrait + Send + Sync>,
    pub event_bus: EventBus,
    /// Maps uploaded gif filenames to their paired audio filenames.
    /// Kept in memory only; associations reset on restart.
    pub gif_audio: RwLock<HashMap<String, String>>,
    pub upload_dir: PathBuf,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let config_repo = Arc::new(ConfigRepository::new(pool.clone(), writer.clone()));
    let config_service = Arc::new(ConfigService::new(config_repo));
    config_service.initialize().await?;

    let donation_repo = Arc::new(DonationRepository::new(pool.clone(), writer.clone()));
    let donation_service = Arc::new(DonationService::new(donation_repo, config_service.clone()));

    let upload_dir = PathBuf::from(&config.upload_dir);
    std::fs::create_dir_all(upload_dir.join("gifs"))?;
    std::fs::create_dir_all(upload_dir.join("audio"))?;

    let event_bus = EventBus::new(256);

    Ok(Arc::new(AppState {
        donation_service,
        config_service,
        event_bus,
        gif_audio: RwLock::new(HashMap::new()),
        upload_dir,
    }))
}
