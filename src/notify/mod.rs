// src/notify/mod.rs
pub mod discord;

use anyhow::Result;

use crate::category::EventCategory;

/// Outbound alert payload, transport-agnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventAlert {
    pub title: String,
    pub color: u32,
    pub description: String,
    pub footer: String,
}

impl EventAlert {
    /// Render the alert for one (event, occurrence, lead) combination.
    /// `<t:epoch:F>` is Discord's absolute-timestamp markup; the reader's
    /// client localizes it, so no display timezone lives here.
    pub fn for_occurrence(
        event_name: &str,
        category: EventCategory,
        occurrence_epoch: i64,
        lead_minutes: u32,
        region: &str,
    ) -> Self {
        Self {
            title: format!("{} {}", category.symbol(), event_name),
            color: category.color(),
            description: format!(
                "**Starts:** <t:{occurrence_epoch}:F>\n**T-{lead_minutes}m alert**"
            ),
            footer: format!("{region} · Game Event Alert"),
        }
    }
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, alert: &EventAlert) -> Result<()>;
}
