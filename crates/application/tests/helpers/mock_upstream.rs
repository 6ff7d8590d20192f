use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_application::ports::DnsUpstream;
use ferrous_doh_domain::DomainError;
use hickory_proto::op::{Message, MessageType, Query};
use hickory_proto::rr::{Name, Record, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use std::str::FromStr;
use std::sync::Mutex;

enum Behavior {
    Answer(Record),
    Raw(Bytes),
    Fail(DomainError),
}

pub struct MockUpstream {
    behavior: Behavior,
    received: Mutex<Vec<Bytes>>,
}

impl MockUpstream {
    /// Replies to every query with the query's questions plus `record`.
    pub fn answering(record: Record) -> Self {
        Self::with(Behavior::Answer(record))
    }

    pub fn raw(bytes: impl Into<Bytes>) -> Self {
        Self::with(Behavior::Raw(bytes.into()))
    }

    pub fn failing(error: DomainError) -> Self {
        Self::with(Behavior::Fail(error))
    }

    fn with(behavior: Behavior) -> Self {
        Self {
            behavior,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub fn last_query_bytes(&self) -> Option<Bytes> {
        self.received.lock().unwrap().last().cloned()
    }

    pub fn last_query(&self) -> Option<Message> {
        self.last_query_bytes()
            .map(|bytes| Message::from_vec(&bytes).expect("gateway sent undecodable query"))
    }
}

#[async_trait]
impl DnsUpstream for MockUpstream {
    async fn exchange(&self, query: Bytes) -> Result<Bytes, DomainError> {
        self.received.lock().unwrap().push(query.clone());

        match &self.behavior {
            Behavior::Answer(record) => {
                let request = Message::from_vec(&query).map_err(|e| DomainError::Transport {
                    server: "mock".into(),
                    reason: e.to_string(),
                })?;
                let mut response = Message::new();
                response
                    .set_id(request.id())
                    .set_message_type(MessageType::Response)
                    .set_recursion_desired(true)
                    .set_recursion_available(true)
                    .add_queries(request.queries().iter().cloned())
                    .add_answer(record.clone());
                Ok(Bytes::from(response.to_vec().unwrap()))
            }
            Behavior::Raw(bytes) => Ok(bytes.clone()),
            Behavior::Fail(error) => Err(error.clone()),
        }
    }

    fn endpoint(&self) -> &str {
        "mock://upstream"
    }
}

pub fn build_query(id: u16, domain: &str, record_type: RecordType) -> Vec<u8> {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_recursion_desired(true)
        .add_query(Query::query(Name::from_str(domain).unwrap(), record_type));
    message.to_vec().unwrap()
}
