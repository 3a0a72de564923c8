// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod alert;
pub mod category;
pub mod config;
pub mod feed;
pub mod metrics;
pub mod notify;
pub mod predict;
pub mod tick;

// ---- Re-exports for stable public API ----
pub use crate::alert::{due_leads, AlertKey, AlertLedger};
pub use crate::category::{classify, default_targets, EventCategory, TargetRule};
pub use crate::config::AlerterConfig;
pub use crate::feed::http::HttpFeedProvider;
pub use crate::feed::types::{EventRecord, FeedProvider, TimeEntry};
pub use crate::notify::{discord::DiscordNotifier, EventAlert, Notifier};
pub use crate::predict::{select_earliest, TimeSpec};
pub use crate::tick::{run_tick, TickReport};
