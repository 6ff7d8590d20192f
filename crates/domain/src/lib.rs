//! Ferrous DoH Domain Layer
pub mod client_subnet;
pub mod config;
pub mod dns_request;
pub mod errors;

pub use client_subnet::{EcsSubnet, DEFAULT_IPV4_PREFIX};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_request::{DohRequest, DNS_MESSAGE_CONTENT_TYPE};
pub use errors::{DomainError, ErrorKind};
