//! Applications API server entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ums_api::api::{create_router, docs, AppState};
use ums_api::config::Config;
use ums_api::metrics;
use ums_api::store::ApplicationStore;
use ums_api::utils::shutdown_signal;
use ums_api::{Result, ServiceError};

/// In-memory Application resource REST API.
#[derive(Parser, Debug)]
#[command(name = "ums-api")]
#[command(about = "REST API for managing Application resources")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Port to listen on (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind (overrides HOST).
        #[arg(long)]
        host: Option<String>,

        /// Start with an empty store.
        #[arg(long)]
        no_seed: bool,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print the OpenAPI document as JSON.
    Spec,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging; .env must be read before RUST_LOG/VERBOSE are consulted
    dotenvy::dotenv().ok();
    let directive = Config::load()
        .unwrap_or_default()
        .log_directive(args.verbose);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Spec) => Ok(cmd_spec()?),
        Some(Command::Serve {
            port,
            host,
            no_seed,
        }) => Ok(cmd_serve(port, host, no_seed).await?),
        None => Ok(cmd_serve(None, None, false).await?),
    }
}

/// Load and validate configuration.
fn load_config() -> Result<Config> {
    let config = Config::load()?;
    config.validate().map_err(ServiceError::InvalidConfig)?;
    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("UMS API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}", config.bind_addr());
    println!("  API Base Path: {}", config.api_base_path);
    println!("  Swagger UI: {}", config.api_spec_url);
    println!("  OpenAPI JSON: {}", config.openapi_json_url());
    if config.seed_initial_application {
        println!("  Seed Application: {}", config.initial_application_name);
    } else {
        println!("  Seed Application: Disabled");
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the OpenAPI document.
fn cmd_spec() -> Result<()> {
    let config = load_config()?;
    println!("{}", docs::openapi_json(&config.api_base_path)?);
    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(port: Option<u16>, host: Option<String>, no_seed: bool) -> Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = load_config().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(host) = host {
        config.host = host;
    }
    if no_seed {
        config.seed_initial_application = false;
    }

    // Create app state
    let mut app_state = AppState::new(ApplicationStore::new());
    match metrics::install_prometheus() {
        Ok(handle) => app_state = app_state.with_metrics(handle),
        Err(e) => warn!("Metrics disabled: {}", e),
    }

    if config.seed_initial_application {
        let seeded = app_state
            .store
            .seed(&config.initial_application_name)
            .await?;
        info!("Seeded application {} ({})", seeded.id, seeded.name);
    }

    // Start HTTP server
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("HTTP server listening on {}", addr);
    info!(
        "Applications at {}/applications, Swagger UI at {}",
        config.api_base_path, config.api_spec_url
    );

    let router = create_router(app_state, &config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
