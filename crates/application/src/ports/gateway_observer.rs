use ferrous_doh_domain::{DomainError, EcsSubnet, ErrorKind};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ForwardOutcome {
    pub request_id: Option<Arc<str>>,
    pub message_id: u16,
    pub client_subnet: Option<EcsSubnet>,
    pub answer_count: usize,
    pub response_code: &'static str,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct ForwardFailure {
    pub request_id: Option<Arc<str>>,
    pub error: DomainError,
    pub elapsed: Duration,
}

impl ForwardFailure {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// Hook invoked once per forwarded query, after the outcome is known.
///
/// Called inline on the request task, so implementations must not block.
pub trait GatewayObserver: Send + Sync {
    fn on_forwarded(&self, outcome: &ForwardOutcome);

    fn on_failure(&self, failure: &ForwardFailure);
}
