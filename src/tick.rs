// src/tick.rs
//
// One fetch-predict-evaluate-notify cycle. Ticks never overlap: the runner
// awaits each one to completion before the next interval fires. The dedup
// ledger is the only state carried between ticks.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use metrics::{counter, gauge};

use crate::alert::{due_leads, AlertKey, AlertLedger};
use crate::category::classify;
use crate::config::AlerterConfig;
use crate::feed::types::FeedProvider;
use crate::notify::{EventAlert, Notifier};
use crate::predict::{select_earliest, TimeSpec};

/// Per-tick counts, logged by the runner.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub events_seen: usize,
    pub events_tracked: usize,
    pub alerts_sent: usize,
    pub send_failures: usize,
    pub keys_pruned: usize,
}

/// Run one tick at `now`.
///
/// A feed failure aborts the whole tick before anything is marked; the next
/// tick retries with a fresh fetch. A failed webhook send does NOT unmark
/// its key: the key is recorded before the send attempt, so delivery is
/// at-most-once and a transport failure loses that alert rather than
/// duplicating it.
pub async fn run_tick(
    provider: &dyn FeedProvider,
    notifier: &dyn Notifier,
    cfg: &AlerterConfig,
    ledger: &mut AlertLedger,
    now: DateTime<Utc>,
) -> Result<TickReport> {
    crate::metrics::ensure_metrics_described();

    let records = provider
        .fetch_latest()
        .await
        .with_context(|| format!("fetching schedule feed ({})", provider.name()))?;

    let now_epoch = now.timestamp();
    let mut report = TickReport {
        keys_pruned: ledger.prune(now_epoch),
        ..TickReport::default()
    };

    for rec in &records {
        report.events_seen += 1;
        if rec.disabled {
            continue;
        }
        let Some(rule) = classify(&rec.name, &cfg.targets) else {
            continue;
        };
        report.events_tracked += 1;

        let specs: Vec<TimeSpec> = rec
            .times_for_region(&cfg.region)
            .filter_map(TimeSpec::from_entry)
            .collect();
        let Some(occurrence) = select_earliest(&specs, now) else {
            continue;
        };
        let occurrence_epoch = occurrence.timestamp();

        for lead in due_leads(occurrence_epoch, &cfg.leads_min, now_epoch, cfg.window_secs()) {
            let key = AlertKey {
                event_id: rec.id.to_string(),
                occurrence_epoch,
                lead_minutes: lead,
            };
            if ledger.already_sent(&key) {
                continue;
            }
            ledger.mark_sent(key);

            let alert =
                EventAlert::for_occurrence(&rec.name, rule.category, occurrence_epoch, lead, &cfg.region);
            match notifier.send(&alert).await {
                Ok(()) => {
                    report.alerts_sent += 1;
                    counter!("alerts_sent_total").increment(1);
                    tracing::info!(
                        event = %rec.name,
                        lead_minutes = lead,
                        occurrence_epoch,
                        "alert sent"
                    );
                }
                Err(e) => {
                    report.send_failures += 1;
                    counter!("alert_send_errors_total").increment(1);
                    tracing::warn!(error = ?e, event = %rec.name, lead_minutes = lead, "alert send failed");
                }
            }
        }
    }

    counter!("ticks_total").increment(1);
    gauge!("tick_last_run_ts").set(now_epoch.max(0) as f64);
    gauge!("ledger_size").set(ledger.len() as f64);

    Ok(report)
}
