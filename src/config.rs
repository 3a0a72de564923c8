// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::category::{default_targets, TargetRule};

const ENV_CONFIG_PATH: &str = "ALERTER_CONFIG_PATH";
const ENV_WEBHOOK_URL: &str = "WEBHOOK_URL";
const ENV_FEED_URL: &str = "FEED_URL";

const DEFAULT_FEED_URL: &str =
    "https://raw.githubusercontent.com/Archey6/archeage-tools/data/static/service/eventsNoDST.json";

/// Startup configuration, loaded once and immutable for the process
/// lifetime. File values come from TOML; `WEBHOOK_URL` and `FEED_URL`
/// env vars win over the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlerterConfig {
    pub feed_url: String,
    pub region: String,
    pub targets: Vec<TargetRule>,
    pub leads_min: Vec<u32>,
    /// Polling cadence. Also the alert window width, so a due lead is
    /// always visible on at least one tick.
    pub poll_interval_secs: u64,
    /// Extra slack before sent-alert keys for past occurrences are pruned.
    pub ledger_safety_margin_secs: u64,
    #[serde(skip)]
    pub webhook_url: String,
}

impl Default for AlerterConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            region: "NA".to_string(),
            targets: default_targets(),
            leads_min: vec![10, 1],
            poll_interval_secs: 60,
            ledger_safety_margin_secs: 300,
            webhook_url: String::new(),
        }
    }
}

impl AlerterConfig {
    /// Alert window width: derived from the poll interval, never a
    /// separate knob (a narrower window would silently drop alerts).
    pub fn window_secs(&self) -> i64 {
        self.poll_interval_secs as i64
    }

    pub fn max_lead_minutes(&self) -> u32 {
        self.leads_min.iter().copied().max().unwrap_or(0)
    }

    /// Trim and lowercase keywords, drop empty rules, dedup leads
    /// (largest first), clamp the poll interval to at least one second.
    pub fn normalize(&mut self) {
        for rule in &mut self.targets {
            rule.keyword = rule.keyword.trim().to_lowercase();
        }
        self.targets.retain(|r| !r.keyword.is_empty());

        let leads: BTreeSet<u32> = self.leads_min.iter().copied().collect();
        self.leads_min = leads.into_iter().rev().collect();

        self.poll_interval_secs = self.poll_interval_secs.max(1);
    }
}

/// Load config from a TOML file.
pub fn from_file(path: &Path) -> Result<AlerterConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading alerter config from {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn config_file_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        return Some(PathBuf::from(p));
    }
    let fallback = PathBuf::from("config/alerter.toml");
    fallback.exists().then_some(fallback)
}

/// Full startup load:
/// 1) $ALERTER_CONFIG_PATH, else config/alerter.toml, else defaults;
/// 2) FEED_URL env override;
/// 3) WEBHOOK_URL env, required.
pub fn load() -> Result<AlerterConfig> {
    let mut cfg = match config_file_path() {
        Some(p) => from_file(&p)?,
        None => AlerterConfig::default(),
    };
    if let Ok(url) = std::env::var(ENV_FEED_URL) {
        cfg.feed_url = url;
    }
    cfg.webhook_url =
        std::env::var(ENV_WEBHOOK_URL).map_err(|_| anyhow!("WEBHOOK_URL must be set"))?;
    cfg.normalize();
    Ok(cfg)
}
