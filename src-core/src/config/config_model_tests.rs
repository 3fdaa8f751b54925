use serde_json::json;

use crate::config::config_model::*;
use crate::errors::Error;

fn default_display() -> DisplaySettings {
    DisplaySettings::default()
}

#[test]
fn goal_amount_is_floored() {
    let update = ConfigUpdate {
        goal_amount: Some(5_000_000.9),
        ..Default::default()
    };
    let validated = update.validated().unwrap();
    assert_eq!(validated.goal_amount, Some(5_000_000));
}

#[test]
fn non_positive_goal_is_rejected() {
    let update = ConfigUpdate {
        goal_amount: Some(0.0),
        ..Default::default()
    };
    assert!(matches!(
        update.validated(),
        Err(Error::Validation(_))
    ));
}

#[test]
fn preset_amounts_validate_all_or_nothing() {
    let update = ConfigUpdate {
        preset_amounts: Some(vec![1800.0, -5.0]),
        ..Default::default()
    };
    assert!(matches!(update.validated(), Err(Error::Validation(_))));
}

#[test]
fn segments_require_id_threshold_and_order() {
    let missing_id = ConfigUpdate {
        menorah_segments: Some(vec![SegmentInput {
            id: None,
            threshold_percent: Some(25.0),
            order: Some(1.0),
        }]),
        ..Default::default()
    };
    assert!(matches!(missing_id.validated(), Err(Error::Validation(_))));

    let out_of_range = ConfigUpdate {
        menorah_segments: Some(vec![SegmentInput {
            id: Some("a".to_string()),
            threshold_percent: Some(150.0),
            order: Some(1.0),
        }]),
        ..Default::default()
    };
    assert!(matches!(out_of_range.validated(), Err(Error::Validation(_))));

    let valid = ConfigUpdate {
        menorah_segments: Some(vec![SegmentInput {
            id: Some("a".to_string()),
            threshold_percent: Some(25.0),
            order: Some(2.9),
        }]),
        ..Default::default()
    };
    let validated = valid.validated().unwrap();
    assert_eq!(
        validated.menorah_segments,
        Some(vec![MenorahSegment {
            id: "a".to_string(),
            threshold_percent: 25.0,
            order: 2,
        }])
    );
}

#[test]
fn invalid_display_color_keeps_previous_value() {
    let previous = default_display();
    let merged = merge_display_settings(
        previous.clone(),
        &json!({ "backgroundColor": "not-a-color" }),
    );
    assert_eq!(merged.background_color, previous.background_color);
}

#[test]
fn valid_display_keys_are_applied_individually() {
    let merged = merge_display_settings(
        default_display(),
        &json!({
            "primaryColor": "#112233",
            "backgroundColor": 42,
            "backgroundImageUrl": "https://example.org/bg.png"
        }),
    );
    assert_eq!(merged.primary_color, "#112233");
    assert_eq!(merged.background_color, default_display().background_color);
    assert_eq!(
        merged.background_image_url,
        Some("https://example.org/bg.png".to_string())
    );
}

#[test]
fn null_clears_optional_display_fields() {
    let mut previous = default_display();
    previous.background_image_url = Some("https://example.org/old.png".to_string());
    previous.sound = Some("shofar".to_string());

    let merged = merge_display_settings(
        previous,
        &json!({ "backgroundImageUrl": null, "sound": null }),
    );
    assert_eq!(merged.background_image_url, None);
    assert_eq!(merged.sound, None);
}

#[test]
fn non_object_patch_is_ignored() {
    let merged = merge_display_settings(default_display(), &json!("nonsense"));
    assert_eq!(merged, default_display());
}
