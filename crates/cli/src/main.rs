use clap::Parser;
use ferrous_doh_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-doh")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous DoH - DNS-over-HTTPS gateway with EDNS Client Subnet")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream DoH endpoint URL
    #[arg(short = 'u', long, value_name = "URL")]
    upstream: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind,
        upstream_url: cli.upstream,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous DoH gateway v{}", env!("CARGO_PKG_VERSION"));

    let gateway = di::Gateway::new(&config)?;

    info!(
        upstream = gateway.app_state.forward_query.upstream_endpoint(),
        ecs_enabled = config.ecs.enabled,
        client_ip_header = %config.ecs.client_ip_header,
        ipv4_prefix = config.ecs.ipv4_prefix,
        "Gateway initialized"
    );

    let addr = config.server.listen_address()?;
    server::start_web_server(addr, gateway.app_state).await?;

    let summary = gateway.metrics.snapshot();
    info!(
        forwarded = summary.forwarded,
        forwarded_with_ecs = summary.forwarded_with_ecs,
        failed = summary.failed(),
        client_errors = summary.client_errors,
        network_errors = summary.network_errors,
        success_rate = format!("{:.1}%", summary.success_rate() * 100.0),
        avg_forward_ms = format!("{:.2}", summary.avg_forward_time_ms()),
        "Server shutdown complete"
    );
    Ok(())
}
