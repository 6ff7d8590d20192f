use ferrous_doh_api::{AppState, EcsSettings};
use ferrous_doh_application::use_cases::ForwardDnsQueryUseCase;
use ferrous_doh_domain::Config;
use ferrous_doh_infrastructure::dns::{create_upstream, GatewayMetrics, QueryEventLogger};
use std::sync::Arc;

pub struct Gateway {
    pub app_state: AppState,
    pub metrics: Arc<GatewayMetrics>,
}

impl Gateway {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let upstream = create_upstream(&config.upstream)?;
        let metrics = Arc::new(GatewayMetrics::new());

        let forward_query = ForwardDnsQueryUseCase::new(upstream)
            .with_observer(Arc::new(QueryEventLogger::new()))
            .with_observer(metrics.clone());

        let app_state = AppState {
            forward_query: Arc::new(forward_query),
            ecs: EcsSettings::from_config(&config.ecs)?,
        };

        Ok(Self { app_state, metrics })
    }
}
