use async_trait::async_trait;
use axum::body::Bytes;
use axum::Router;
use ferrous_doh_api::{create_routes, AppState, EcsSettings};
use ferrous_doh_application::ports::{DnsUpstream, GatewayObserver};
use ferrous_doh_application::use_cases::ForwardDnsQueryUseCase;
use ferrous_doh_domain::DomainError;
use hickory_proto::op::{Message, MessageType, Query};
use hickory_proto::rr::{rdata::A, Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

pub enum Reply {
    /// Echo the questions back with one A record for 93.184.216.34.
    Answer,
    Raw(Vec<u8>),
    Fail(DomainError),
}

pub struct MockUpstream {
    reply: Reply,
    received: Mutex<Vec<Bytes>>,
}

impl MockUpstream {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub fn last_query(&self) -> Option<Message> {
        self.received
            .lock()
            .unwrap()
            .last()
            .map(|b| Message::from_vec(b).unwrap())
    }
}

#[async_trait]
impl DnsUpstream for MockUpstream {
    async fn exchange(&self, query: Bytes) -> Result<Bytes, DomainError> {
        self.received.lock().unwrap().push(query.clone());

        match &self.reply {
            Reply::Answer => {
                let request = Message::from_vec(&query).unwrap();
                let name = request.queries()[0].name().clone();
                let mut response = Message::new();
                response
                    .set_id(request.id())
                    .set_message_type(MessageType::Response)
                    .set_recursion_desired(true)
                    .set_recursion_available(true)
                    .add_queries(request.queries().iter().cloned())
                    .add_answer(Record::from_rdata(
                        name,
                        300,
                        RData::A(A(Ipv4Addr::new(93, 184, 216, 34))),
                    ));
                Ok(Bytes::from(response.to_vec().unwrap()))
            }
            Reply::Raw(bytes) => Ok(Bytes::from(bytes.clone())),
            Reply::Fail(error) => Err(error.clone()),
        }
    }

    fn endpoint(&self) -> &str {
        "mock://upstream"
    }
}

pub fn create_test_app(upstream: Arc<MockUpstream>) -> Router {
    app_for(ForwardDnsQueryUseCase::new(upstream))
}

pub fn create_test_app_with_observer(
    upstream: Arc<MockUpstream>,
    observer: Arc<dyn GatewayObserver>,
) -> Router {
    app_for(ForwardDnsQueryUseCase::new(upstream).with_observer(observer))
}

fn app_for(forward_query: ForwardDnsQueryUseCase) -> Router {
    create_routes(AppState {
        forward_query: Arc::new(forward_query),
        ecs: EcsSettings::default(),
    })
}

pub fn build_query(id: u16, domain: &str) -> Vec<u8> {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_recursion_desired(true)
        .add_query(Query::query(Name::from_str(domain).unwrap(), RecordType::A));
    message.to_vec().unwrap()
}
