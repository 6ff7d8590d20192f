pub mod events;
pub mod transport;

pub use events::{GatewayMetrics, MetricsSnapshot, QueryEventLogger};
pub use transport::{create_upstream, HttpsTransport};
