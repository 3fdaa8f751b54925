use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;

use crate::config::config_model::{
    merge_display_settings, CampaignConfig, ConfigRow, ValidatedConfigUpdate, CONFIG_ROW_ID,
};
use crate::config::config_traits::ConfigRepositoryTrait;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{Error, Result};
use crate::schema::campaign_config;
use crate::schema::campaign_config::dsl::*;

pub struct ConfigRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ConfigRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ConfigRepository { pool, writer }
    }
}

#[async_trait]
impl ConfigRepositoryTrait for ConfigRepository {
    fn get(&self) -> Result<CampaignConfig> {
        let mut conn = get_connection(&self.pool)?;
        let row: Option<ConfigRow> = campaign_config
            .find(CONFIG_ROW_ID)
            .first(&mut conn)
            .optional()?;

        match row {
            Some(row) => row.into_config(),
            // Unreachable after bootstrap, kept as a defensive fallback.
            None => Ok(CampaignConfig::default()),
        }
    }

    async fn update(&self, update: ValidatedConfigUpdate) -> Result<CampaignConfig> {
        self.writer
            .exec(move |conn| {
                let mut row: ConfigRow = campaign_config
                    .find(CONFIG_ROW_ID)
                    .first(conn)
                    .optional()?
                    .ok_or_else(|| Error::NotFound("campaign configuration".to_string()))?;

                if let Some(goal) = update.goal_amount {
                    row.goal_amount = goal;
                }
                if let Some(presets) = update.preset_amounts {
                    row.preset_amounts = serde_json::to_string(&presets)?;
                }
                if let Some(segments) = update.menorah_segments {
                    row.menorah_segments = serde_json::to_string(&segments)?;
                }
                if let Some(ref patch) = update.display_settings {
                    let stored: serde_json::Value = serde_json::from_str(&row.display_settings)?;
                    let previous = merge_display_settings(Default::default(), &stored);
                    let merged = merge_display_settings(previous, patch);
                    row.display_settings = serde_json::to_string(&merged)?;
                }
                row.updated_at = Utc::now().naive_utc();

                diesel::update(campaign_config.find(CONFIG_ROW_ID))
                    .set(&row)
                    .execute(conn)?;

                row.into_config()
            })
            .await
    }

    async fn ensure_exists(&self) -> Result<()> {
        self.writer
            .exec(|conn| {
                diesel::insert_or_ignore_into(campaign_config::table)
                    .values(id.eq(CONFIG_ROW_ID))
                    .execute(conn)?;
                Ok(())
            })
            .await
    }
}
