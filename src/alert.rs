// src/alert.rs
//
// Alert-window evaluation and the in-process dedup ledger. The window width
// equals the polling interval, so a lead that is due is visible on exactly
// one tick of a correctly paced poller.

use std::collections::HashSet;

/// Identifies one required notification. Two predicted occurrences of the
/// same event never collide because the occurrence epoch differs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertKey {
    pub event_id: String,
    pub occurrence_epoch: i64,
    pub lead_minutes: u32,
}

/// Which of the configured leads are due right now for an occurrence.
///
/// A lead is due iff `now` falls in the half-open window
/// `[occurrence - lead*60, occurrence - lead*60 + window_secs)`. Pure
/// function of its inputs; out-of-range leads simply never match.
pub fn due_leads(
    occurrence_epoch: i64,
    leads_min: &[u32],
    now_epoch: i64,
    window_secs: i64,
) -> Vec<u32> {
    leads_min
        .iter()
        .copied()
        .filter(|&lead| {
            let alert_epoch = occurrence_epoch - i64::from(lead) * 60;
            now_epoch >= alert_epoch && now_epoch < alert_epoch + window_secs
        })
        .collect()
}

/// Set of alerts already fired, held for the process lifetime only.
///
/// Rebuilt empty on restart, so an alert whose window is still open across
/// a restart can refire once. Keys whose occurrence is older than the
/// largest lead plus a safety margin can never match a future window and
/// are pruned each tick instead of accumulating forever.
#[derive(Debug)]
pub struct AlertLedger {
    sent: HashSet<AlertKey>,
    horizon_secs: i64,
}

impl AlertLedger {
    pub fn new(max_lead_minutes: u32, safety_margin_secs: i64) -> Self {
        Self {
            sent: HashSet::new(),
            horizon_secs: i64::from(max_lead_minutes) * 60 + safety_margin_secs,
        }
    }

    pub fn already_sent(&self, key: &AlertKey) -> bool {
        self.sent.contains(key)
    }

    /// Record a key as sent. Idempotent; returns `true` only on the first
    /// logical transition for that key.
    pub fn mark_sent(&mut self, key: AlertKey) -> bool {
        self.sent.insert(key)
    }

    /// Drop keys no future tick can match. Returns how many were removed.
    pub fn prune(&mut self, now_epoch: i64) -> usize {
        let threshold = now_epoch - self.horizon_secs;
        let before = self.sent.len();
        self.sent.retain(|k| k.occurrence_epoch >= threshold);
        before - self.sent.len()
    }

    pub fn len(&self) -> usize {
        self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }
}
