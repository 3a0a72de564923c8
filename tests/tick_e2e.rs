// tests/tick_e2e.rs
//
// End-to-end tick cycles over a fixture feed with a recording notifier.

use anyhow::{anyhow, Result};
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;

use game_event_alerter::{
    run_tick, AlertLedger, AlerterConfig, EventAlert, HttpFeedProvider, Notifier,
};

struct RecordingNotifier {
    sent: Mutex<Vec<EventAlert>>,
}

impl RecordingNotifier {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    fn alerts(&self) -> Vec<EventAlert> {
        self.sent.lock().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, alert: &EventAlert) -> Result<()> {
        self.sent.lock().push(alert.clone());
        Ok(())
    }
}

struct FailingNotifier;

#[async_trait::async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _alert: &EventAlert) -> Result<()> {
        Err(anyhow!("webhook down"))
    }
}

const FEED: &str = r#"[
    {"id": 101, "name": "Kraken Invasion",
     "times": [{"time": "14:00:00", "region": "NA"},
               {"time": "14:00:00", "region": "EU"}]},
    {"id": 102, "name": "Golden Plains Battle", "disabled": true,
     "times": [{"time": "14:00:00", "region": "NA"}]},
    {"id": 103, "name": "Fishing Tournament",
     "times": [{"time": "14:00:00", "region": "NA"}]},
    {"id": 104, "name": "Black Dragon",
     "times": [{"time": "not-a-time", "region": "NA"}]}
]"#;

fn test_cfg() -> AlerterConfig {
    let mut cfg = AlerterConfig::default();
    cfg.normalize();
    cfg
}

fn ledger_for(cfg: &AlerterConfig) -> AlertLedger {
    AlertLedger::new(cfg.max_lead_minutes(), cfg.ledger_safety_margin_secs as i64)
}

fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, h, m, s).unwrap()
}

#[tokio::test]
async fn leads_fire_separately_and_exactly_once() {
    let provider = HttpFeedProvider::from_fixture_str(FEED);
    let notifier = RecordingNotifier::new();
    let cfg = test_cfg();
    let mut ledger = ledger_for(&cfg);

    // T-10m window for the 14:00 occurrence.
    let report = run_tick(&provider, &notifier, &cfg, &mut ledger, at(13, 50, 0))
        .await
        .unwrap();
    assert_eq!(report.events_seen, 4);
    assert_eq!(report.events_tracked, 2); // Kraken + Black Dragon
    assert_eq!(report.alerts_sent, 1);
    assert!(notifier.alerts()[0].description.contains("T-10m"));

    // Same window again: deduped, nothing new.
    let report = run_tick(&provider, &notifier, &cfg, &mut ledger, at(13, 50, 30))
        .await
        .unwrap();
    assert_eq!(report.alerts_sent, 0);

    // T-1m window fires its own distinct alert.
    let report = run_tick(&provider, &notifier, &cfg, &mut ledger, at(13, 59, 0))
        .await
        .unwrap();
    assert_eq!(report.alerts_sent, 1);

    let alerts = notifier.alerts();
    assert_eq!(alerts.len(), 2);
    assert!(alerts[1].description.contains("T-1m"));
    // Both alerts reference the same occurrence instant.
    let start_ts = format!("<t:{}:F>", at(14, 0, 0).timestamp());
    assert!(alerts.iter().all(|a| a.description.contains(&start_ts)));
}

#[tokio::test]
async fn tracked_event_gets_category_styling() {
    let provider = HttpFeedProvider::from_fixture_str(FEED);
    let notifier = RecordingNotifier::new();
    let cfg = test_cfg();
    let mut ledger = ledger_for(&cfg);

    run_tick(&provider, &notifier, &cfg, &mut ledger, at(13, 50, 0))
        .await
        .unwrap();

    // "Kraken Invasion" matched the "kraken" rule case-insensitively.
    let alert = &notifier.alerts()[0];
    assert_eq!(alert.title, "🐙 Kraken Invasion");
    assert_eq!(alert.color, 0xe74c3c);
    assert_eq!(alert.footer, "NA · Game Event Alert");
}

#[tokio::test]
async fn disabled_untracked_and_unparseable_events_send_nothing() {
    let provider = HttpFeedProvider::from_fixture_str(FEED);
    let notifier = RecordingNotifier::new();
    let cfg = test_cfg();
    let mut ledger = ledger_for(&cfg);

    // Outside any alert window nothing fires at all.
    let report = run_tick(&provider, &notifier, &cfg, &mut ledger, at(9, 0, 0))
        .await
        .unwrap();
    assert_eq!(report.alerts_sent, 0);
    assert!(notifier.alerts().is_empty());
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn region_filter_excludes_foreign_slots() {
    // Only an EU slot: with region NA the event has no schedulable
    // occurrence and is skipped silently.
    let provider = HttpFeedProvider::from_fixture_str(
        r#"[{"id": 1, "name": "Kraken",
             "times": [{"time": "14:00:00", "region": "EU"}]}]"#,
    );
    let notifier = RecordingNotifier::new();
    let cfg = test_cfg();
    let mut ledger = ledger_for(&cfg);

    let report = run_tick(&provider, &notifier, &cfg, &mut ledger, at(13, 50, 0))
        .await
        .unwrap();
    assert_eq!(report.events_tracked, 1);
    assert_eq!(report.alerts_sent, 0);
}

#[tokio::test]
async fn feed_failure_aborts_tick_without_marking_keys() {
    let provider = HttpFeedProvider::from_fixture_str("definitely not json");
    let notifier = RecordingNotifier::new();
    let cfg = test_cfg();
    let mut ledger = ledger_for(&cfg);

    assert!(run_tick(&provider, &notifier, &cfg, &mut ledger, at(13, 50, 0))
        .await
        .is_err());
    assert!(notifier.alerts().is_empty());
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn send_failure_is_at_most_once() {
    let provider = HttpFeedProvider::from_fixture_str(FEED);
    let cfg = test_cfg();
    let mut ledger = ledger_for(&cfg);

    // Key is marked before the send attempt, so the failed alert is lost
    // rather than retried.
    let report = run_tick(&provider, &FailingNotifier, &cfg, &mut ledger, at(13, 50, 0))
        .await
        .unwrap();
    assert_eq!(report.alerts_sent, 0);
    assert_eq!(report.send_failures, 1);
    assert_eq!(ledger.len(), 1);

    let recorder = RecordingNotifier::new();
    let report = run_tick(&provider, &recorder, &cfg, &mut ledger, at(13, 50, 30))
        .await
        .unwrap();
    assert_eq!(report.alerts_sent, 0);
    assert!(recorder.alerts().is_empty());
}
