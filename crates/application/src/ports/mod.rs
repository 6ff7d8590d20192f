mod dns_upstream;
mod gateway_observer;

pub use dns_upstream::DnsUpstream;
pub use gateway_observer::{ForwardFailure, ForwardOutcome, GatewayObserver};
