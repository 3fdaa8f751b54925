//! Derived campaign statistics. Never persisted; recomputed from the ledger
//! totals and the campaign configuration on every read and every mutation.

mod stats_model;

pub use stats_model::{build_stats, lit_segment_ids, DonationStats};
