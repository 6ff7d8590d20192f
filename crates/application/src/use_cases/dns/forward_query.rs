use crate::ports::{DnsUpstream, ForwardFailure, ForwardOutcome, GatewayObserver};
use crate::services::{NormalizedResponse, QueryRewriter, ResponseNormalizer};
use bytes::Bytes;
use ferrous_doh_domain::{DohRequest, DomainError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, instrument};

/// Rewrites a caller's query with its client subnet, relays it to the
/// upstream resolver and hands back the re-encoded answer.
pub struct ForwardDnsQueryUseCase {
    upstream: Arc<dyn DnsUpstream>,
    observers: Vec<Arc<dyn GatewayObserver>>,
}

impl ForwardDnsQueryUseCase {
    pub fn new(upstream: Arc<dyn DnsUpstream>) -> Self {
        Self {
            upstream,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn GatewayObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn upstream_endpoint(&self) -> &str {
        self.upstream.endpoint()
    }

    #[instrument(
        skip(self, request),
        name = "forward_dns_query",
        fields(
            request_id = request.request_id.as_deref().unwrap_or("-"),
            upstream = self.upstream.endpoint(),
        )
    )]
    pub async fn execute(&self, request: &DohRequest) -> Result<Bytes, DomainError> {
        let start = Instant::now();

        match self.forward(request).await {
            Ok(response) => {
                let outcome = ForwardOutcome {
                    request_id: request.request_id.clone(),
                    message_id: response.message.id(),
                    client_subnet: request.client_subnet,
                    answer_count: response.answer_count(),
                    response_code: response.response_code(),
                    elapsed: start.elapsed(),
                };
                for observer in &self.observers {
                    observer.on_forwarded(&outcome);
                }
                Ok(Bytes::from(response.bytes))
            }
            Err(e) => {
                self.report_failure(request.request_id.clone(), &e, start.elapsed());
                Err(e)
            }
        }
    }

    /// Logs a failed query and hands it to every observer.
    ///
    /// Also used by callers that fail before a query can be built, such as
    /// when the request body cannot be read.
    pub fn report_failure(
        &self,
        request_id: Option<Arc<str>>,
        error: &DomainError,
        elapsed: Duration,
    ) {
        error!(
            request_id = request_id.as_deref().unwrap_or("-"),
            error = %error,
            kind = error.kind().as_str(),
            client_error = error.is_client_error(),
            "Failed to forward DNS query"
        );
        let failure = ForwardFailure {
            request_id,
            error: error.clone(),
            elapsed,
        };
        for observer in &self.observers {
            observer.on_failure(&failure);
        }
    }

    async fn forward(&self, request: &DohRequest) -> Result<NormalizedResponse, DomainError> {
        let (outbound, wire) =
            QueryRewriter::rewrite(&request.query, request.client_subnet.as_ref())?;

        debug!(
            id = outbound.id(),
            questions = outbound.queries().len(),
            ecs = ?request.client_subnet.map(|s| s.to_string()),
            message_len = wire.len(),
            "Forwarding rewritten query"
        );

        let reply = self.upstream.exchange(Bytes::from(wire)).await?;

        ResponseNormalizer::normalize(&reply, outbound.id())
    }
}
