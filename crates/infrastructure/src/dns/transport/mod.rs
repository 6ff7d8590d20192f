pub mod https;

use ferrous_doh_application::ports::DnsUpstream;
use ferrous_doh_domain::config::UpstreamConfig;
use ferrous_doh_domain::DomainError;
use std::sync::Arc;

pub use https::HttpsTransport;

pub fn create_upstream(config: &UpstreamConfig) -> Result<Arc<dyn DnsUpstream>, DomainError> {
    if !config.is_http_url() {
        return Err(DomainError::ConfigError(format!(
            "Unsupported upstream '{}': only DNS-over-HTTPS endpoints are supported",
            config.url
        )));
    }

    Ok(Arc::new(HttpsTransport::from_config(config)?))
}
