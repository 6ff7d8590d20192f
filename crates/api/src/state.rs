use axum::http::HeaderName;
use ferrous_doh_application::use_cases::ForwardDnsQueryUseCase;
use ferrous_doh_domain::config::EcsConfig;
use ferrous_doh_domain::DomainError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub forward_query: Arc<ForwardDnsQueryUseCase>,
    pub ecs: EcsSettings,
}

/// How the client subnet is read from inbound requests.
#[derive(Debug, Clone)]
pub struct EcsSettings {
    pub enabled: bool,
    pub client_ip_header: HeaderName,
    pub ipv4_prefix: u8,
}

impl EcsSettings {
    pub fn from_config(config: &EcsConfig) -> Result<Self, DomainError> {
        let client_ip_header = HeaderName::from_bytes(config.client_ip_header.as_bytes())
            .map_err(|e| {
                DomainError::ConfigError(format!(
                    "Invalid client IP header '{}': {}",
                    config.client_ip_header, e
                ))
            })?;

        Ok(Self {
            enabled: config.enabled,
            client_ip_header,
            ipv4_prefix: config.ipv4_prefix,
        })
    }
}

impl Default for EcsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            client_ip_header: HeaderName::from_static("x-forwarded-for"),
            ipv4_prefix: ferrous_doh_domain::DEFAULT_IPV4_PREFIX,
        }
    }
}
