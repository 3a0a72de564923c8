//! Game Event Alerter — Binary Entrypoint
//! Polls the schedule feed on a fixed interval, predicts upcoming event
//! occurrences, and fires Discord webhook alerts ahead of each one.

use chrono::Utc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use game_event_alerter::alert::AlertLedger;
use game_event_alerter::notify::discord::DiscordNotifier;
use game_event_alerter::{config, feed::http::HttpFeedProvider, metrics, tick};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = config::load()?;
    metrics::install_exporter()?;

    let provider = HttpFeedProvider::from_url(cfg.feed_url.clone());
    let notifier = DiscordNotifier::new(cfg.webhook_url.clone());
    let mut ledger = AlertLedger::new(cfg.max_lead_minutes(), cfg.ledger_safety_margin_secs as i64);

    tracing::info!(
        feed = %cfg.feed_url,
        region = %cfg.region,
        interval_secs = cfg.poll_interval_secs,
        leads = ?cfg.leads_min,
        "game event alerter started"
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(cfg.poll_interval_secs));
    // A slow tick delays the next one rather than stacking ticks.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match tick::run_tick(&provider, &notifier, &cfg, &mut ledger, Utc::now()).await {
            Ok(report) => {
                tracing::info!(
                    seen = report.events_seen,
                    tracked = report.events_tracked,
                    sent = report.alerts_sent,
                    failed = report.send_failures,
                    pruned = report.keys_pruned,
                    "tick complete"
                );
            }
            Err(e) => {
                // Next tick retries with a fresh fetch; nothing was marked.
                tracing::error!(error = ?e, "tick aborted");
            }
        }
    }
}
