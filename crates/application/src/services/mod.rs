pub mod query_rewriter;
pub mod response_normalizer;

pub use query_rewriter::QueryRewriter;
pub use response_normalizer::{NormalizedResponse, ResponseNormalizer};

use ferrous_doh_domain::DomainError;
use hickory_proto::op::Message;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// Serialize a Message to wire format bytes
pub(crate) fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message
        .emit(&mut encoder)
        .map_err(|e| DomainError::Encode(e.to_string()))?;

    Ok(buf)
}
