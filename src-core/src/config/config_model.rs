use chrono::NaiveDateTime;
use diesel::prelude::*;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ValidationError};

/// Fixed identity of the singleton configuration row.
pub const CONFIG_ROW_ID: i32 = 1;

pub const DEFAULT_GOAL_AMOUNT: i64 = 10_000_000;
pub const DEFAULT_PRESET_AMOUNTS: [i64; 5] = [1_800, 3_600, 18_000, 36_000, 100_000];

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

/// One milestone marker on the menorah visualization. `order` controls
/// visual stacking only; lighting is evaluated from `threshold_percent`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenorahSegment {
    pub id: String,
    pub threshold_percent: f64,
    pub order: i32,
}

/// Presentation knobs for the display pages. Updates merge key-by-key over
/// the previous value; invalid keys are dropped, never rejected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    pub primary_color: String,
    pub background_color: String,
    pub background_image_url: Option<String>,
    pub sound: Option<String>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            primary_color: "#f59e0b".to_string(),
            background_color: "#0b1020".to_string(),
            background_image_url: None,
            sound: None,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignConfig {
    pub goal_amount: i64,
    pub preset_amounts: Vec<i64>,
    pub menorah_segments: Vec<MenorahSegment>,
    pub display_settings: DisplaySettings,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            goal_amount: DEFAULT_GOAL_AMOUNT,
            preset_amounts: DEFAULT_PRESET_AMOUNTS.to_vec(),
            menorah_segments: Vec::new(),
            display_settings: DisplaySettings::default(),
        }
    }
}

/// Database row format: list-valued fields are stored as JSON text.
#[derive(Queryable, Identifiable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::campaign_config)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ConfigRow {
    pub id: i32,
    pub goal_amount: i64,
    pub preset_amounts: String,
    pub menorah_segments: String,
    pub display_settings: String,
    pub updated_at: NaiveDateTime,
}

impl ConfigRow {
    pub fn into_config(self) -> Result<CampaignConfig> {
        let stored: Value = serde_json::from_str(&self.display_settings)?;
        let display_settings = merge_display_settings(DisplaySettings::default(), &stored);
        Ok(CampaignConfig {
            goal_amount: self.goal_amount,
            preset_amounts: serde_json::from_str(&self.preset_amounts)?,
            menorah_segments: serde_json::from_str(&self.menorah_segments)?,
            display_settings,
        })
    }
}

/// Partial configuration update as received from the caller. Numbers arrive
/// as JSON numbers and are floored; `display_settings` stays untyped so
/// unknown or mistyped keys can be dropped per-field instead of failing the
/// whole request.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigUpdate {
    pub goal_amount: Option<f64>,
    pub preset_amounts: Option<Vec<f64>>,
    pub menorah_segments: Option<Vec<SegmentInput>>,
    pub display_settings: Option<Value>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SegmentInput {
    pub id: Option<String>,
    pub threshold_percent: Option<f64>,
    pub order: Option<f64>,
}

/// Fully validated update, ready to persist. Top-level validation is
/// all-or-nothing; the display patch is merged best-effort at write time.
#[derive(Debug, Clone, Default)]
pub struct ValidatedConfigUpdate {
    pub goal_amount: Option<i64>,
    pub preset_amounts: Option<Vec<i64>>,
    pub menorah_segments: Option<Vec<MenorahSegment>>,
    pub display_settings: Option<Value>,
}

impl ConfigUpdate {
    pub fn validated(self) -> Result<ValidatedConfigUpdate> {
        let goal_amount = match self.goal_amount {
            Some(goal) if goal > 0.0 => Some(goal.floor() as i64),
            Some(_) => {
                return Err(ValidationError::InvalidInput(
                    "goalAmount must be a positive number".to_string(),
                )
                .into())
            }
            None => None,
        };

        let preset_amounts = match self.preset_amounts {
            Some(amounts) => {
                if amounts.iter().any(|a| *a <= 0.0) {
                    return Err(ValidationError::InvalidInput(
                        "presetAmounts must contain positive numbers".to_string(),
                    )
                    .into());
                }
                Some(amounts.into_iter().map(|a| a.floor() as i64).collect())
            }
            None => None,
        };

        let menorah_segments = match self.menorah_segments {
            Some(segments) => Some(
                segments
                    .into_iter()
                    .map(validate_segment)
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };

        Ok(ValidatedConfigUpdate {
            goal_amount,
            preset_amounts,
            menorah_segments,
            display_settings: self.display_settings,
        })
    }
}

fn validate_segment(input: SegmentInput) -> Result<MenorahSegment> {
    let id = match input.id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Err(ValidationError::MissingField("segment id".to_string()).into()),
    };

    let threshold_percent = match input.threshold_percent {
        Some(t) if (0.0..=100.0).contains(&t) => t,
        _ => {
            return Err(ValidationError::InvalidInput(
                "thresholdPercent must be between 0 and 100".to_string(),
            )
            .into())
        }
    };

    let order = match input.order {
        Some(o) if o >= 1.0 => o.floor() as i32,
        _ => {
            return Err(
                ValidationError::InvalidInput("order must be a positive integer".to_string())
                    .into(),
            )
        }
    };

    Ok(MenorahSegment {
        id,
        threshold_percent,
        order,
    })
}

/// Merges a display-settings patch over the previous value, key by key.
/// Every key is validated individually; an invalid or mistyped value keeps
/// the previous one.
pub fn merge_display_settings(previous: DisplaySettings, patch: &Value) -> DisplaySettings {
    let mut merged = previous;
    let Some(map) = patch.as_object() else {
        return merged;
    };

    if let Some(color) = map.get("primaryColor").and_then(Value::as_str) {
        if HEX_COLOR.is_match(color) {
            merged.primary_color = color.to_string();
        }
    }

    if let Some(color) = map.get("backgroundColor").and_then(Value::as_str) {
        if HEX_COLOR.is_match(color) {
            merged.background_color = color.to_string();
        }
    }

    if let Some(url) = map.get("backgroundImageUrl") {
        match url {
            Value::String(s) => merged.background_image_url = Some(s.clone()),
            Value::Null => merged.background_image_url = None,
            _ => {}
        }
    }

    if let Some(sound) = map.get("sound") {
        match sound {
            Value::String(s) => merged.sound = Some(s.clone()),
            Value::Null => merged.sound = None,
            _ => {}
        }
    }

    merged
}
