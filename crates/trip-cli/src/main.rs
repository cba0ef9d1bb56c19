//! trip-copilot: trip planning tools served over MCP stdio

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use trip_maps::{GoogleMapsClient, MapsConfig, TripPlanner, register_tools};
use trip_mcp::MCPServer;
use trip_tools::ToolRegistry;
use trip_utils::{LogFormat, LoggingConfig, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "trip-copilot", version)]
#[command(about = "MCP server for trip planning and route optimization", long_about = None)]
struct Args {
    /// JSON config file with the maps settings
    #[arg(short, long, value_name = "path")]
    config: Option<PathBuf>,

    /// Google Maps API key (defaults to GOOGLE_MAPS_API_KEY)
    #[arg(long, value_name = "key")]
    api_key: Option<String>,

    /// Maps web service base URL (defaults to GOOGLE_MAPS_BASE_URL)
    #[arg(long, value_name = "url")]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "secs")]
    timeout_secs: Option<u64>,

    /// Client-side request rate limit
    #[arg(long, value_name = "rate")]
    requests_per_second: Option<u32>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format (text or json)
    #[arg(long, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

/// Build the maps configuration from the config file or flags and environment
///
/// Flags override values from the file.
fn maps_config(args: &Args) -> anyhow::Result<MapsConfig> {
    let Some(path) = &args.config else {
        let mut builder = MapsConfig::builder();
        if let Some(key) = &args.api_key {
            builder = builder.api_key(key);
        }
        if let Some(url) = &args.base_url {
            builder = builder.base_url(url);
        }
        if let Some(secs) = args.timeout_secs {
            builder = builder.timeout_secs(secs);
        }
        if let Some(rate) = args.requests_per_second {
            builder = builder.requests_per_second(rate);
        }
        return builder
            .with_env()
            .build()
            .context("Maps configuration is incomplete; set GOOGLE_MAPS_API_KEY or pass --api-key");
    };

    let mut config = MapsConfig::from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    if let Some(key) = &args.api_key {
        config.api_key.clone_from(key);
    }
    if let Some(url) = &args.base_url {
        config.base_url.clone_from(url);
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
    if let Some(rate) = args.requests_per_second {
        config.requests_per_second = rate;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_tracing(
        &LoggingConfig::default()
            .with_level(&args.log_level)
            .with_format(args.log_format),
    );

    info!("Starting trip-copilot v{}", env!("CARGO_PKG_VERSION"));

    let config = maps_config(&args)?;
    let client = GoogleMapsClient::new(config)?;
    let planner = Arc::new(TripPlanner::new(Arc::new(client)));

    let registry = Arc::new(ToolRegistry::new());
    register_tools(&registry, planner);

    let server = MCPServer::new(registry, "trip-copilot", env!("CARGO_PKG_VERSION"));
    server.serve_stdio().await?;

    Ok(())
}
