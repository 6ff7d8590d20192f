pub mod logger;
pub mod metrics;

pub use logger::QueryEventLogger;
pub use metrics::{GatewayMetrics, MetricsSnapshot};
