use std::env;

use crate::notify::message::SenderProfile;

const DEFAULT_SOURCE_URL: &str = "http://test-hub.kys.gay/api/stock/bloxfruit";
const DEFAULT_WEBHOOK_PREFIX: &str = "https://discord.com/api/webhooks/";
const DEFAULT_SENDER_NAME: &str = "BloxFruit Monitor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub source_url: String,
    pub webhook_prefix: String,
    pub sender: SenderProfile,
}

impl MonitorConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let source_url = value("STOCK_SOURCE_URL").unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
        url::Url::parse(&source_url)
            .map_err(|e| anyhow::anyhow!("STOCK_SOURCE_URL is not a valid URL: {e}"))?;

        let webhook_prefix =
            value("WEBHOOK_URL_PREFIX").unwrap_or_else(|| DEFAULT_WEBHOOK_PREFIX.to_string());

        Ok(Self {
            source_url,
            webhook_prefix,
            sender: SenderProfile {
                name: value("MONITOR_SENDER_NAME")
                    .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
                avatar_url: value("MONITOR_AVATAR_URL"),
            },
        })
    }
}
