use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_UPSTREAM_URL: &str = "https://223.5.5.5/dns-query";

/// The single DoH resolver every query is relayed to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Applies to the whole exchange: connect, send and body read.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn is_http_url(&self) -> bool {
        self.url.starts_with("https://") || self.url.starts_with("http://")
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}
