// src/notify/discord.rs
use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::{EventAlert, Notifier};

#[derive(Clone)]
pub struct DiscordNotifier {
    webhook: String,
    client: Client,
    timeout: Duration,
    max_retries: u8,
}

impl DiscordNotifier {
    pub fn new(webhook: String) -> Self {
        Self {
            webhook,
            client: Client::new(),
            timeout: Duration::from_secs(5),
            max_retries: 3,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }
}

#[async_trait::async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, alert: &EventAlert) -> Result<()> {
        let payload = DiscordWebhookPayload::embed(alert);

        let mut attempt: u8 = 0;
        loop {
            attempt += 1;
            let res = self
                .client
                .post(&self.webhook)
                .timeout(self.timeout)
                .json(&payload)
                .send()
                .await;

            match res {
                Ok(rsp) => {
                    if let Err(e) = rsp.error_for_status_ref() {
                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1)))
                                .await;
                            continue;
                        }
                        return Err(anyhow!("Discord webhook HTTP error: {e}"));
                    }
                    return Ok(());
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1))).await;
                        continue;
                    }
                    return Err(anyhow!("Discord webhook request failed: {e}"));
                }
            }
        }
    }
}

#[derive(Serialize)]
struct EmbedFooter {
    text: String,
}

#[derive(Serialize)]
struct DiscordEmbed {
    title: String,
    description: String,
    color: u32,
    footer: EmbedFooter,
}

#[derive(Serialize)]
struct DiscordWebhookPayload {
    content: Option<String>,
    embeds: Vec<DiscordEmbed>,
}

impl DiscordWebhookPayload {
    fn embed(alert: &EventAlert) -> Self {
        Self {
            content: None,
            embeds: vec![DiscordEmbed {
                title: alert.title.clone(),
                description: alert.description.clone(),
                color: alert.color,
                footer: EmbedFooter {
                    text: alert.footer.clone(),
                },
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::EventCategory;

    #[test]
    fn payload_serializes_discord_embed_shape() {
        let alert =
            EventAlert::for_occurrence("Black Dragon", EventCategory::BlackDragon, 1_000, 1, "NA");
        let payload = DiscordWebhookPayload::embed(&alert);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["embeds"][0]["title"], "🐉 Black Dragon");
        assert_eq!(json["embeds"][0]["color"], 0xe74c3c);
        assert_eq!(json["embeds"][0]["footer"]["text"], "NA · Game Event Alert");
    }
}
