use ferrous_doh_application::ports::{ForwardFailure, ForwardOutcome, GatewayObserver};
use ferrous_doh_domain::ErrorKind;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters for gateway outcomes.
#[derive(Debug, Default)]
pub struct GatewayMetrics {
    forwarded: AtomicU64,

    forwarded_with_ecs: AtomicU64,

    client_errors: AtomicU64,

    body_read_errors: AtomicU64,

    decode_errors: AtomicU64,

    encode_errors: AtomicU64,

    network_errors: AtomicU64,

    total_forward_time_us: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub forwarded: u64,
    pub forwarded_with_ecs: u64,
    pub client_errors: u64,
    pub body_read_errors: u64,
    pub decode_errors: u64,
    pub encode_errors: u64,
    pub network_errors: u64,
    pub total_forward_time_us: u64,
}

impl MetricsSnapshot {
    pub fn failed(&self) -> u64 {
        self.body_read_errors
            + self.decode_errors
            + self.encode_errors
            + self.network_errors
    }

    pub fn total(&self) -> u64 {
        self.forwarded + self.failed()
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.forwarded as f64 / total as f64
    }

    pub fn avg_forward_time_ms(&self) -> f64 {
        if self.forwarded == 0 {
            return 0.0;
        }
        self.total_forward_time_us as f64 / self.forwarded as f64 / 1000.0
    }
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            forwarded: self.forwarded.load(Ordering::Relaxed),
            forwarded_with_ecs: self.forwarded_with_ecs.load(Ordering::Relaxed),
            client_errors: self.client_errors.load(Ordering::Relaxed),
            body_read_errors: self.body_read_errors.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            encode_errors: self.encode_errors.load(Ordering::Relaxed),
            network_errors: self.network_errors.load(Ordering::Relaxed),
            total_forward_time_us: self.total_forward_time_us.load(Ordering::Relaxed),
        }
    }

    /// Config errors stop startup and never reach the forward path.
    fn counter_for(&self, kind: ErrorKind) -> Option<&AtomicU64> {
        match kind {
            ErrorKind::BodyRead => Some(&self.body_read_errors),
            ErrorKind::Decode => Some(&self.decode_errors),
            ErrorKind::Encode => Some(&self.encode_errors),
            ErrorKind::Network => Some(&self.network_errors),
            ErrorKind::Config => None,
        }
    }
}

impl GatewayObserver for GatewayMetrics {
    fn on_forwarded(&self, outcome: &ForwardOutcome) {
        self.forwarded.fetch_add(1, Ordering::Relaxed);
        if outcome.client_subnet.is_some() {
            self.forwarded_with_ecs.fetch_add(1, Ordering::Relaxed);
        }
        self.total_forward_time_us
            .fetch_add(outcome.elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    fn on_failure(&self, failure: &ForwardFailure) {
        if failure.error.is_client_error() {
            self.client_errors.fetch_add(1, Ordering::Relaxed);
        }
        if let Some(counter) = self.counter_for(failure.kind()) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }
}
