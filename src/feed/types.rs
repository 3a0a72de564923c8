// src/feed/types.rs
use std::fmt;

use anyhow::Result;

/// Feed event ids show up as numbers or strings depending on the source
/// revision; accept both and normalize through `Display`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Num(i64),
    Str(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Num(n) => write!(f, "{n}"),
            EventId::Str(s) => f.write_str(s),
        }
    }
}

/// One scheduled slot of an event, region-scoped. `days` absent means
/// every day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeEntry {
    pub time: String, // "HH:MM:SS"
    #[serde(default)]
    pub days: Option<Vec<String>>,
    #[serde(default)]
    pub region: String,
}

/// One event record from the schedule feed. Only the fields the alerter
/// consumes are modeled; everything else in the feed is ignored.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub times: Vec<TimeEntry>,
}

impl EventRecord {
    /// Slots for the given region, in feed order.
    pub fn times_for_region<'a>(
        &'a self,
        region: &'a str,
    ) -> impl Iterator<Item = &'a TimeEntry> + 'a {
        self.times.iter().filter(move |t| t.region == region)
    }
}

#[async_trait::async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<EventRecord>>;
    fn name(&self) -> &'static str;
}
