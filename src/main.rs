use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mood2music_server::config::{self, ServiceArgs};
use mood2music_server::server::{metrics, run_server, RequestsLoggingLevel, ServerConfig};
use mood2music_server::{load_catalog, MoodPipeline};

#[derive(Parser, Debug)]
struct CliArgs {
    #[command(flatten)]
    pub service: ServiceArgs,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            ..config::CliConfig::from(&args.service)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    // Load TOML config if provided
    let file_config = cli_args.service.load_file_config()?;
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration:");
    info!("  catalog_path: {:?}", app_config.catalog_path);
    info!("  port: {}", app_config.port);
    info!("  metrics_port: {}", app_config.metrics_port);
    info!("  moods: {}", app_config.vocabulary.len());

    let catalog = load_catalog(&app_config.catalog_path)
        .with_context(|| format!("Failed to load catalog {:?}", app_config.catalog_path))?;

    // Initialize metrics system
    info!("Initializing metrics...");
    metrics::init_metrics();
    metrics::init_catalog_metrics(catalog.tracks_count(), catalog.usable_tracks_count());

    let pipeline = MoodPipeline::from_config(&app_config, Arc::new(catalog))?;

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level.clone(),
        port: app_config.port,
        metrics_port: app_config.metrics_port,
    };
    run_server(server_config, Arc::new(pipeline)).await
}
