use menorah_core::{config::CampaignConfig, donations::Donation, stats::DonationStats};
use serde::Serialize;
use tokio::sync::broadcast;

/// One state-change event, pushed to every connected display client.
///
/// Each successful mutation produces exactly one event, built *after* the
/// mutation was durably committed and carrying stats recomputed from
/// post-mutation state, so a pushed event never diverges from what an
/// immediate read would return.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    #[serde(rename = "donation:new", rename_all = "camelCase")]
    DonationNew {
        donation: Donation,
        stats: DonationStats,
    },
    #[serde(rename = "donation:updated", rename_all = "camelCase")]
    DonationUpdated {
        donation: Donation,
        stats: DonationStats,
    },
    #[serde(rename = "donation:deleted", rename_all = "camelCase")]
    DonationDeleted {
        donation_id: i32,
        donation: Donation,
        stats: DonationStats,
    },
    #[serde(rename = "config:updated", rename_all = "camelCase")]
    ConfigUpdated {
        config: CampaignConfig,
        stats: DonationStats,
    },
    /// Ephemeral display cue; carries no ledger state and is never stored.
    #[serde(rename = "gif:trigger", rename_all = "camelCase")]
    GifTrigger {
        gif_url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        audio_url: Option<String>,
    },
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::DonationNew { .. } => "donation:new",
            ServerEvent::DonationUpdated { .. } => "donation:updated",
            ServerEvent::DonationDeleted { .. } => "donation:deleted",
            ServerEvent::ConfigUpdated { .. } => "config:updated",
            ServerEvent::GifTrigger { .. } => "gif:trigger",
        }
    }
}

/// Lightweight broadcast bus that fans out events to any connected clients.
///
/// Delivery is best-effort: subscribers that join later get no replay and
/// must bootstrap with a full read first.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ServerEvent) {
        // Lagging or absent listeners are ignored to avoid blocking
        // producers; the mutation behind the event is already committed.
        let _ = self.sender.send(event);
    }
}
