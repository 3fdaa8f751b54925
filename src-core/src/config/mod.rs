//! Campaign configuration module - singleton goal, presets, segments, and
//! display settings.

mod config_model;
mod config_repository;
mod config_service;
mod config_traits;

#[cfg(test)]
mod config_model_tests;

pub use config_model::{
    merge_display_settings, CampaignConfig, ConfigRow, ConfigUpdate, DisplaySettings,
    MenorahSegment, SegmentInput, ValidatedConfigUpdate, CONFIG_ROW_ID, DEFAULT_GOAL_AMOUNT,
    DEFAULT_PRESET_AMOUNTS,
};
pub use config_repository::ConfigRepository;
pub use config_service::ConfigService;
pub use config_traits::{ConfigRepositoryTrait, ConfigServiceTrait};
