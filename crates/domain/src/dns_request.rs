use crate::client_subnet::EcsSubnet;
use bytes::Bytes;
use std::sync::Arc;

/// Media type of wire-format DNS messages over HTTP (RFC 8484 §6).
pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// One inbound DoH query, as handed from the HTTP layer to the forwarder.
#[derive(Debug, Clone)]
pub struct DohRequest {
    /// Wire-format DNS message exactly as the caller sent it.
    pub query: Bytes,
    pub client_subnet: Option<EcsSubnet>,
    pub request_id: Option<Arc<str>>,
}

impl DohRequest {
    pub fn new(query: impl Into<Bytes>) -> Self {
        Self {
            query: query.into(),
            client_subnet: None,
            request_id: None,
        }
    }

    pub fn with_client_subnet(mut self, subnet: Option<EcsSubnet>) -> Self {
        self.client_subnet = subnet;
        self
    }

    pub fn with_request_id(mut self, request_id: Option<Arc<str>>) -> Self {
        self.request_id = request_id;
        self
    }
}
