use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    #[error("Malformed DNS query: {0}")]
    MalformedQuery(String),

    #[error("Malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Failed to encode DNS message: {0}")]
    Encode(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Upstream {server} returned HTTP {status}")]
    UpstreamStatus { server: String, status: u16 },

    #[error("Invalid CIDR format: {0}")]
    InvalidCidr(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Coarse classification used by logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BodyRead,
    Decode,
    Encode,
    Network,
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BodyRead => "body_read",
            Self::Decode => "decode",
            Self::Encode => "encode",
            Self::Network => "network",
            Self::Config => "config",
        }
    }
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BodyRead(_) => ErrorKind::BodyRead,
            Self::MalformedQuery(_) | Self::MalformedUpstreamResponse(_) => ErrorKind::Decode,
            Self::Encode(_) => ErrorKind::Encode,
            Self::TransportTimeout { .. }
            | Self::TransportConnectionRefused { .. }
            | Self::Transport { .. }
            | Self::UpstreamStatus { .. } => ErrorKind::Network,
            Self::InvalidCidr(_) | Self::ConfigError(_) => ErrorKind::Config,
        }
    }

    /// Only an undecodable inbound query is the caller's fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MalformedQuery(_))
    }
}
