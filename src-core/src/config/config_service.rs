use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::config::config_model::{CampaignConfig, ConfigUpdate};
use crate::config::config_traits::{ConfigRepositoryTrait, ConfigServiceTrait};
use crate::errors::Result;

pub struct ConfigService {
    repository: Arc<dyn ConfigRepositoryTrait>,
}

impl ConfigService {
    pub fn new(repository: Arc<dyn ConfigRepositoryTrait>) -> Self {
        ConfigService { repository }
    }
}

#[async_trait]
impl ConfigServiceTrait for ConfigService {
    fn get(&self) -> Result<CampaignConfig> {
        self.repository.get()
    }

    /// Top-level fields validate all-or-nothing; the display-settings patch
    /// is merged per-key best-effort at write time.
    async fn update(&self, update: ConfigUpdate) -> Result<CampaignConfig> {
        let validated = update.validated()?;
        debug!("Updating campaign configuration");
        self.repository.update(validated).await
    }

    /// Seeds the singleton row on first boot; a no-op afterwards.
    async fn initialize(&self) -> Result<()> {
        self.repository.ensure_exists().await
    }
}
