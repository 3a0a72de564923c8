// src/metrics.rs
use anyhow::{Context, Result};
use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::OnceCell;
use std::net::SocketAddr;

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ticks_total", "Tick cycles completed (including aborted).");
        describe_counter!(
            "feed_fetch_errors_total",
            "Schedule feed fetch/parse failures."
        );
        describe_counter!("alerts_sent_total", "Alerts delivered to the webhook.");
        describe_counter!(
            "alert_send_errors_total",
            "Alerts lost to webhook delivery failure."
        );
        describe_gauge!("tick_last_run_ts", "Unix ts when the last tick ran.");
        describe_gauge!("ledger_size", "AlertKeys currently held in the dedup ledger.");
    });
}

/// Install the Prometheus exporter on `$METRICS_ADDR` if set; no-op
/// otherwise. The exporter serves /metrics on its own listener.
pub fn install_exporter() -> Result<()> {
    let Ok(addr) = std::env::var("METRICS_ADDR") else {
        return Ok(());
    };
    let addr: SocketAddr = addr.parse().context("parsing METRICS_ADDR")?;
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("prometheus: install exporter")?;
    tracing::info!(%addr, "prometheus exporter listening");
    Ok(())
}
