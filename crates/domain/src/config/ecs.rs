use serde::{Deserialize, Serialize};

use crate::client_subnet::DEFAULT_IPV4_PREFIX;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EcsConfig {
    /// When false, outbound queries never carry a Client-Subnet option.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Header holding the caller's origin address, set by the fronting proxy.
    #[serde(default = "default_client_ip_header")]
    pub client_ip_header: String,

    #[serde(default = "default_ipv4_prefix")]
    pub ipv4_prefix: u8,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            client_ip_header: default_client_ip_header(),
            ipv4_prefix: default_ipv4_prefix(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_client_ip_header() -> String {
    "X-Forwarded-For".to_string()
}

fn default_ipv4_prefix() -> u8 {
    DEFAULT_IPV4_PREFIX
}
