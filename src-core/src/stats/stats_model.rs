use serde::{Deserialize, Serialize};

use crate::config::MenorahSegment;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationStats {
    pub total_amount: i64,
    pub donation_count: i64,
    pub percent_complete: f64,
    pub lit_segments: Vec<String>,
}

/// Builds the stats payload from ledger totals and configuration.
///
/// Deterministic and side-effect free: the read path and the post-mutation
/// broadcast path both call this, so they can never diverge.
pub fn build_stats(
    total_amount: i64,
    donation_count: i64,
    goal_amount: i64,
    segments: &[MenorahSegment],
) -> DonationStats {
    let percent_complete = if goal_amount > 0 {
        (total_amount as f64 / goal_amount as f64 * 100.0).min(100.0)
    } else {
        0.0
    };

    DonationStats {
        total_amount,
        donation_count,
        percent_complete,
        lit_segments: lit_segment_ids(percent_complete, segments),
    }
}

/// Ids of every segment whose threshold has been reached.
///
/// Sorted by `order` ascending for a stable traversal; the result set itself
/// is order-independent since this is a filter, not a fold.
pub fn lit_segment_ids(percent_complete: f64, segments: &[MenorahSegment]) -> Vec<String> {
    let mut sorted: Vec<&MenorahSegment> = segments.iter().collect();
    sorted.sort_by_key(|seg| seg.order);

    sorted
        .into_iter()
        .filter(|seg| percent_complete >= seg.threshold_percent)
        .map(|seg| seg.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: &str, threshold: f64, order: i32) -> MenorahSegment {
        MenorahSegment {
            id: id.to_string(),
            threshold_percent: threshold,
            order,
        }
    }

    #[test]
    fn percent_complete_is_clamped_at_100() {
        let stats = build_stats(15_000_000, 42, 10_000_000, &[]);
        assert_eq!(stats.percent_complete, 100.0);
        assert_eq!(stats.total_amount, 15_000_000);
        assert_eq!(stats.donation_count, 42);
    }

    #[test]
    fn percent_complete_for_empty_ledger_is_zero() {
        let stats = build_stats(0, 0, 10_000_000, &[]);
        assert_eq!(stats.percent_complete, 0.0);
        assert!(stats.lit_segments.is_empty());
    }

    #[test]
    fn partial_progress_is_a_plain_ratio() {
        let stats = build_stats(2_500_000, 10, 10_000_000, &[]);
        assert_eq!(stats.percent_complete, 25.0);
    }

    #[test]
    fn zero_goal_does_not_divide() {
        let stats = build_stats(1_000, 1, 0, &[]);
        assert_eq!(stats.percent_complete, 0.0);
    }

    #[test]
    fn lit_segments_follow_thresholds() {
        let segments = vec![segment("a", 25.0, 1), segment("b", 75.0, 2)];

        assert_eq!(lit_segment_ids(50.0, &segments), vec!["a"]);
        assert_eq!(lit_segment_ids(80.0, &segments), vec!["a", "b"]);
        assert!(lit_segment_ids(10.0, &segments).is_empty());
    }

    #[test]
    fn lit_segments_ignore_input_order() {
        let segments = vec![segment("b", 75.0, 2), segment("a", 25.0, 1)];
        assert_eq!(lit_segment_ids(80.0, &segments), vec!["a", "b"]);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let segments = vec![segment("a", 50.0, 1)];
        assert_eq!(lit_segment_ids(50.0, &segments), vec!["a"]);
    }
}
