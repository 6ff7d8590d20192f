use crate::errors::ApiError;
use crate::middleware::RequestId;
use crate::state::{AppState, EcsSettings};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Extension,
};
use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurpose, DecodePaddingMode, GeneralPurposeConfig},
    Engine,
};
use ferrous_doh_domain::{DohRequest, DomainError, EcsSubnet, DNS_MESSAGE_CONTENT_TYPE};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// RFC 8484 GET form: base64url, padding optional.
const DNS_PARAM_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Deserialize)]
pub struct DnsMessageParams {
    pub dns: Option<String>,
}

pub async fn post_dns_query(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let request_id = request_id.map(|Extension(RequestId(id))| id);

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let error = DomainError::BodyRead(rejection.body_text());
            // Nothing was forwarded, so no time was spent upstream.
            state.forward_query.report_failure(request_id, &error, Duration::ZERO);
            return Err(error.into());
        }
    };

    forward(&state, request_id, &headers, body).await
}

pub async fn get_dns_query(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    headers: HeaderMap,
    Query(params): Query<DnsMessageParams>,
) -> Result<Response, ApiError> {
    let encoded = params
        .dns
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadQueryParameter("missing dns parameter".into()))?;

    let query = DNS_PARAM_ENGINE.decode(encoded.as_bytes()).map_err(|e| {
        ApiError::BadQueryParameter(format!("dns parameter is not base64url: {}", e))
    })?;

    let request_id = request_id.map(|Extension(RequestId(id))| id);
    forward(&state, request_id, &headers, Bytes::from(query)).await
}

async fn forward(
    state: &AppState,
    request_id: Option<Arc<str>>,
    headers: &HeaderMap,
    query: Bytes,
) -> Result<Response, ApiError> {
    let request = DohRequest::new(query)
        .with_client_subnet(client_subnet(&state.ecs, headers))
        .with_request_id(request_id);

    let answer = state.forward_query.execute(&request).await?;

    Ok((
        [
            (header::CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE.to_string()),
            (header::CONTENT_LENGTH, answer.len().to_string()),
        ],
        answer,
    )
        .into_response())
}

fn client_subnet(settings: &EcsSettings, headers: &HeaderMap) -> Option<EcsSubnet> {
    if !settings.enabled {
        return None;
    }

    let Some(value) = headers.get(&settings.client_ip_header) else {
        debug!(
            header = %settings.client_ip_header,
            "No client address header, forwarding without ECS"
        );
        return None;
    };

    let subnet = value
        .to_str()
        .ok()
        .and_then(|v| EcsSubnet::from_forwarded_header(v, settings.ipv4_prefix));

    if subnet.is_none() {
        debug!(value = ?value, "Client address is not IPv4, forwarding without ECS");
    }
    subnet
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_dns_param_accepts_padded_and_unpadded() {
        assert_eq!(DNS_PARAM_ENGINE.decode("AAE").unwrap(), vec![0x00, 0x01]);
        assert_eq!(DNS_PARAM_ENGINE.decode("AAE=").unwrap(), vec![0x00, 0x01]);
    }

    #[test]
    fn test_client_subnet_uses_first_forwarded_entry() {
        let subnet = client_subnet(&EcsSettings::default(), &headers("203.0.113.7, 10.0.0.1"));
        assert_eq!(subnet.unwrap().to_string(), "203.0.113.0/24");
    }

    #[test]
    fn test_client_subnet_skips_ipv6_and_disabled() {
        assert!(client_subnet(&EcsSettings::default(), &headers("2001:db8::1")).is_none());
        assert!(client_subnet(&EcsSettings::default(), &HeaderMap::new()).is_none());

        let disabled = EcsSettings {
            enabled: false,
            ..EcsSettings::default()
        };
        assert!(client_subnet(&disabled, &headers("203.0.113.7")).is_none());
    }
}
