use ferrous_doh_application::ports::{ForwardFailure, ForwardOutcome, GatewayObserver};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingObserver {
    outcomes: Mutex<Vec<ForwardOutcome>>,
    failures: Mutex<Vec<ForwardFailure>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> Vec<ForwardOutcome> {
        self.outcomes.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<ForwardFailure> {
        self.failures.lock().unwrap().clone()
    }
}

impl GatewayObserver for RecordingObserver {
    fn on_forwarded(&self, outcome: &ForwardOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }

    fn on_failure(&self, failure: &ForwardFailure) {
        self.failures.lock().unwrap().push(failure.clone());
    }
}
