use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use ferrous_doh_domain::DomainError;
use tracing::warn;

pub enum ApiError {
    Domain(DomainError),
    /// The GET form arrived without a usable `dns` parameter.
    BadQueryParameter(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Domain(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadQueryParameter(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::BodyRead(_)) => "Failed to read request body",
            Self::Domain(DomainError::MalformedQuery(_)) => "Failed to unpack query message",
            Self::Domain(DomainError::Encode(_)) => "Failed to pack DNS message",
            Self::Domain(DomainError::MalformedUpstreamResponse(_)) => {
                "Failed to unpack upstream response body"
            }
            Self::Domain(
                DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::Transport { .. }
                | DomainError::UpstreamStatus { .. },
            ) => "Failed to forward query message",
            Self::Domain(DomainError::InvalidCidr(_) | DomainError::ConfigError(_)) => {
                "Gateway misconfigured"
            }
            Self::BadQueryParameter(_) => "Missing or invalid dns parameter",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::BadQueryParameter(reason) = &self {
            warn!(reason = %reason, "Rejected DoH GET request");
        }

        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{}\n", self.message()),
        )
            .into_response()
    }
}
