//! DNS-over-HTTPS transport (RFC 8484)
//!
//! Sends DNS queries as HTTP POST requests with `application/dns-message` content type.
//! The request body is the raw DNS wire format message, and the response body
//! contains the raw DNS wire format response.
//!
//! Wire format (HTTP):
//! ```text
//! POST /dns-query HTTP/2
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//!
//! <raw DNS message bytes>
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_application::ports::DnsUpstream;
use ferrous_doh_domain::config::UpstreamConfig;
use ferrous_doh_domain::{DomainError, DNS_MESSAGE_CONTENT_TYPE};
use std::error::Error as StdError;
use std::io;
use std::time::Duration;
use tracing::debug;

/// DNS-over-HTTPS transport (RFC 8484)
///
/// Holds one pooled client; every exchange shares its connections.
pub struct HttpsTransport {
    url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpsTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| {
                DomainError::ConfigError(format!("Failed to build DoH client for {}: {}", url, e))
            })?;

        Ok(Self {
            url,
            client,
            timeout,
        })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, DomainError> {
        Self::new(config.url.clone(), config.timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, error: reqwest::Error) -> DomainError {
        if error.is_timeout() {
            return DomainError::TransportTimeout {
                server: self.url.clone(),
            };
        }

        if is_connection_refused(&error) {
            return DomainError::TransportConnectionRefused {
                server: self.url.clone(),
            };
        }

        DomainError::Transport {
            server: self.url.clone(),
            reason: error.to_string(),
        }
    }

    async fn post(&self, message_bytes: Bytes) -> Result<Bytes, DomainError> {
        // POST with application/dns-message (RFC 8484 §4.1)
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
            .header(reqwest::header::ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
            .body(message_bytes)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamStatus {
                server: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response.bytes().await.map_err(|e| self.classify(e))
    }
}

#[async_trait]
impl DnsUpstream for HttpsTransport {
    async fn exchange(&self, query: Bytes) -> Result<Bytes, DomainError> {
        debug!(
            url = %self.url,
            message_len = query.len(),
            "Sending DoH query"
        );

        let response_bytes = tokio::time::timeout(self.timeout, self.post(query))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.url.clone(),
            })??;

        debug!(
            url = %self.url,
            response_len = response_bytes.len(),
            "DoH response received"
        );

        Ok(response_bytes)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

fn is_connection_refused(error: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = error.source();
    while let Some(err) = source {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = err.source();
    }
    false
}
