// src/feed/http.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;
use std::time::Duration;

use crate::feed::types::{EventRecord, FeedProvider};

/// Schedule feed provider. Fetches the live JSON over HTTP in production;
/// tests feed it a fixture string instead.
pub struct HttpFeedProvider {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http {
        url: String,
        client: reqwest::Client,
        timeout: Duration,
    },
}

impl HttpFeedProvider {
    pub fn from_url(url: String) -> Self {
        Self {
            mode: Mode::Http {
                url,
                client: reqwest::Client::new(),
                timeout: Duration::from_secs(10),
            },
        }
    }

    pub fn from_fixture_str(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        if let Mode::Http { timeout, .. } = &mut self.mode {
            *timeout = Duration::from_secs(secs);
        }
        self
    }

    fn parse_records(s: &str) -> Result<Vec<EventRecord>> {
        serde_json::from_str(s).context("parsing schedule feed json")
    }
}

#[async_trait]
impl FeedProvider for HttpFeedProvider {
    async fn fetch_latest(&self) -> Result<Vec<EventRecord>> {
        match &self.mode {
            Mode::Fixture(s) => Self::parse_records(s),

            Mode::Http {
                url,
                client,
                timeout,
            } => {
                let resp = client
                    .get(url)
                    .header(reqwest::header::CACHE_CONTROL, "no-store")
                    .timeout(*timeout)
                    .send()
                    .await;
                let resp = match resp {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::warn!(error = ?e, url = %url, "feed http error");
                        counter!("feed_fetch_errors_total").increment(1);
                        return Err(e).context("schedule feed get()");
                    }
                };
                if let Err(e) = resp.error_for_status_ref() {
                    counter!("feed_fetch_errors_total").increment(1);
                    return Err(e).context("schedule feed non-2xx");
                }
                let body = resp.text().await.context("schedule feed .text()")?;
                Self::parse_records(&body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "schedule-feed"
    }
}
