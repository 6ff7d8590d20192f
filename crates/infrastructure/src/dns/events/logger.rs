use ferrous_doh_application::ports::{ForwardFailure, ForwardOutcome, GatewayObserver};
use tracing::{debug, info};

/// Emits one structured log line per forwarded query.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryEventLogger;

impl QueryEventLogger {
    pub fn new() -> Self {
        Self
    }
}

impl GatewayObserver for QueryEventLogger {
    fn on_forwarded(&self, outcome: &ForwardOutcome) {
        info!(
            request_id = outcome.request_id.as_deref().unwrap_or("-"),
            id = outcome.message_id,
            ecs = %outcome
                .client_subnet
                .map(|s| s.to_string())
                .unwrap_or_else(|| "none".to_string()),
            answers = outcome.answer_count,
            rcode = outcome.response_code,
            elapsed_ms = outcome.elapsed.as_secs_f64() * 1000.0,
            "DNS query forwarded"
        );
    }

    fn on_failure(&self, failure: &ForwardFailure) {
        // The use case already logged the error itself.
        debug!(
            request_id = failure.request_id.as_deref().unwrap_or("-"),
            kind = failure.kind().as_str(),
            elapsed_ms = failure.elapsed.as_secs_f64() * 1000.0,
            "DNS query failed"
        );
    }
}
