use super::serialize_message;
use ferrous_doh_domain::DomainError;
use hickory_proto::op::Message;
use tracing::{debug, warn};

/// Upstream answer after a full decode and re-encode.
#[derive(Debug, Clone)]
pub struct NormalizedResponse {
    pub message: Message,
    pub bytes: Vec<u8>,
}

impl NormalizedResponse {
    pub fn answer_count(&self) -> usize {
        self.message.answers().len()
    }

    pub fn response_code(&self) -> &'static str {
        self.message.response_code().to_str()
    }
}

/// Round-trips upstream replies through the DNS codec instead of passing the
/// upstream's bytes through untouched.
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Decode the upstream reply and encode it again.
    ///
    /// The reply always leaves with `expected_id`, the id the caller used.
    pub fn normalize(
        response_bytes: &[u8],
        expected_id: u16,
    ) -> Result<NormalizedResponse, DomainError> {
        let mut message = Message::from_vec(response_bytes)
            .map_err(|e| DomainError::MalformedUpstreamResponse(e.to_string()))?;

        if message.id() != expected_id {
            warn!(
                expected_id,
                upstream_id = message.id(),
                "Upstream answered with a different transaction id, restoring caller id"
            );
            message.set_id(expected_id);
        }

        let bytes = serialize_message(&message)?;

        debug!(
            id = message.id(),
            answers = message.answers().len(),
            upstream_len = response_bytes.len(),
            normalized_len = bytes.len(),
            "Upstream response normalized"
        );

        Ok(NormalizedResponse { message, bytes })
    }
}
