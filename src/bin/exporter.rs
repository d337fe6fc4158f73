use std::net::SocketAddr;
use std::sync::Arc;

use bgp_exporter::{
    actors::poller::PollerHandle,
    api::{ApiConfig, ApiState, spawn_api_server},
    config::{Config, read_config_file},
    metrics::ExporterMetrics,
    source::{CommandSource, FileSource, NeighborSource},
    store::NeighborStore,
};
use clap::Parser;
use tracing::{info, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Parser)]
#[command(about = "Prometheus exporter for BGP neighbor status")]
struct Args {
    /// Config file (JSON)
    #[arg(short, long)]
    file: Option<String>,

    /// Poll once, print the parsed neighbors as JSON and exit
    #[arg(long)]
    once: bool,
}

fn init() {
    dotenv::dotenv().ok();

    let filter = filter::Targets::new().with_targets(vec![
        ("bgp_exporter", LevelFilter::DEBUG),
        ("tower_http", LevelFilter::DEBUG),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

fn build_source(config: &Config) -> Arc<dyn NeighborSource> {
    match &config.input_file {
        Some(path) => Arc::new(FileSource::new(path)),
        None => Arc::new(CommandSource::from_config(&config.command, config.timeout())),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    let config = match &args.file {
        Some(path) => read_config_file(path)?,
        None => Config::default(),
    };
    config.validate()?;

    let source = build_source(&config);

    if args.once {
        let text = source.fetch().await?;
        let neighbors = bgp_exporter::parse_neighbors(&text);
        println!("{}", serde_json::to_string_pretty(&neighbors)?);
        return Ok(());
    }

    let store = NeighborStore::new();
    let metrics = ExporterMetrics::new()
        .map_err(|e| anyhow::anyhow!("failed to register exporter metrics: {e}"))?;

    info!(
        "polling {} every {:?}",
        source.describe(),
        config.interval()
    );
    let poller = PollerHandle::spawn(source, store.clone(), metrics.clone(), config.interval());

    let api_config = ApiConfig {
        bind_addr: SocketAddr::new(config.listen, config.port),
    };
    spawn_api_server(api_config, ApiState::new(store, metrics, poller)).await?;

    tokio::signal::ctrl_c().await?;
    info!("received interrupt, exiting");

    Ok(())
}
