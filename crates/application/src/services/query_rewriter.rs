//! Outbound query construction
//!
//! The gateway never forwards the caller's message as-is. It decodes it, keeps
//! only the transaction id and the question section, and builds a fresh
//! recursive query carrying the caller's EDNS Client Subnet:
//!
//! ```text
//! id        = inbound id
//! flags     = RD
//! question  = inbound questions (verbatim)
//! additional= OPT { CLIENT-SUBNET family=1 source=/24 scope=0 addr=a.b.c.0 }
//! ```
//!
//! Inbound flags, EDNS options and additional records are dropped.

use super::serialize_message;
use ferrous_doh_domain::{DomainError, EcsSubnet};
use hickory_proto::op::{Edns, Message, MessageType, OpCode};
use hickory_proto::rr::rdata::opt::{ClientSubnet, EdnsOption};
use std::net::IpAddr;

pub struct QueryRewriter;

impl QueryRewriter {
    /// Decode the caller's wire-format query.
    pub fn decode_query(bytes: &[u8]) -> Result<Message, DomainError> {
        Message::from_vec(bytes).map_err(|e| DomainError::MalformedQuery(e.to_string()))
    }

    /// Build the message that is sent upstream in place of `inbound`.
    pub fn build_forward_query(inbound: &Message, subnet: Option<&EcsSubnet>) -> Message {
        let mut message = Message::new();
        message
            .set_id(inbound.id())
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true)
            .add_queries(inbound.queries().iter().cloned());

        if let Some(subnet) = subnet {
            let mut edns = Edns::new();
            edns.options_mut()
                .insert(EdnsOption::Subnet(ClientSubnet::new(
                    IpAddr::V4(subnet.address()),
                    subnet.source_prefix(),
                    0,
                )));
            message.set_edns(edns);
        }

        message
    }

    /// Decode, rewrite and re-encode in one step.
    pub fn rewrite(
        bytes: &[u8],
        subnet: Option<&EcsSubnet>,
    ) -> Result<(Message, Vec<u8>), DomainError> {
        let inbound = Self::decode_query(bytes)?;
        let outbound = Self::build_forward_query(&inbound, subnet);
        let wire = serialize_message(&outbound)?;
        Ok((outbound, wire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::Query;
    use hickory_proto::rr::{Name, RecordType};
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn inbound(id: u16) -> Message {
        let mut message = Message::new();
        message
            .set_id(id)
            .set_recursion_desired(false)
            .set_checking_disabled(true)
            .add_query(Query::query(
                Name::from_str("example.com.").unwrap(),
                RecordType::AAAA,
            ));
        message
    }

    #[test]
    fn test_forward_query_keeps_id_and_question() {
        let inbound = inbound(0xBEEF);
        let outbound = QueryRewriter::build_forward_query(&inbound, None);

        assert_eq!(outbound.id(), 0xBEEF);
        assert_eq!(outbound.queries(), inbound.queries());
        assert_eq!(outbound.message_type(), MessageType::Query);
    }

    #[test]
    fn test_forward_query_resets_flags() {
        let outbound = QueryRewriter::build_forward_query(&inbound(1), None);

        assert!(outbound.recursion_desired());
        assert!(!outbound.checking_disabled());
    }

    #[test]
    fn test_forward_query_without_subnet_has_no_edns() {
        let outbound = QueryRewriter::build_forward_query(&inbound(1), None);
        assert!(outbound.extensions().is_none());
    }

    #[test]
    fn test_forward_query_with_subnet_has_edns() {
        let subnet = EcsSubnet::new(Ipv4Addr::new(198, 51, 100, 9), 24).unwrap();
        let outbound = QueryRewriter::build_forward_query(&inbound(1), Some(&subnet));
        assert!(outbound.extensions().is_some());
    }

    #[test]
    fn test_rewrite_sets_rd_bit_on_wire() {
        let bytes = serialize_message(&inbound(7)).unwrap();
        let (_, wire) = QueryRewriter::rewrite(&bytes, None).unwrap();

        assert_eq!(u16::from_be_bytes([wire[0], wire[1]]), 7);
        assert_eq!(wire[2] & 0x01, 0x01, "RD flag should be set");
    }

    #[test]
    fn test_decode_truncated_header_fails() {
        let result = QueryRewriter::decode_query(&[0x12, 0x34, 0x01]);
        assert!(matches!(result, Err(DomainError::MalformedQuery(_))));
    }
}
