use crate::config::config_model::{CampaignConfig, ConfigUpdate, ValidatedConfigUpdate};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for configuration repository operations
#[async_trait]
pub trait ConfigRepositoryTrait: Send + Sync {
    fn get(&self) -> Result<CampaignConfig>;
    async fn update(&self, update: ValidatedConfigUpdate) -> Result<CampaignConfig>;
    async fn ensure_exists(&self) -> Result<()>;
}

/// Trait for configuration service operations
#[async_trait]
pub trait ConfigServiceTrait: Send + Sync {
    fn get(&self) -> Result<CampaignConfig>;
    async fn update(&self, update: ConfigUpdate) -> Result<CampaignConfig>;
    async fn initialize(&self) -> Result<()>;
}
