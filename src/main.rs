//! cohort-api entry point.

use std::time::Duration;

use axum::extract::Request;
use axum::ServiceExt;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cohort_api::api::{cors_layer, create_app, docs, AppState};
use cohort_api::config::{Config, WriteMode};
use cohort_api::error::ServiceError;
use cohort_api::metrics;
use cohort_api::utils::shutdown_signal;

/// Teaching REST API over seeded student and user collections.
#[derive(Parser, Debug)]
#[command(name = "cohort-api")]
#[command(about = "REST API over seeded in-memory student and user collections")]
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
    /// Serve the HTTP API (default).
    Serve {
        /// Bind port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Bind address (overrides HOST).
        #[arg(long)]
        host: Option<std::net::IpAddr>,

        /// echo or persist (overrides WRITE_MODE).
        #[arg(long)]
        write_mode: Option<WriteMode>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print every documented endpoint.
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load().map_err(ServiceError::from)?;
    config.verbose |= args.verbose;

    init_logging(&config);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Routes) => {
            for endpoint in docs::endpoints() {
                println!("{endpoint}");
            }
            Ok(())
        }
        Some(Command::Serve {
            port,
            host,
            write_mode,
        }) => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(write_mode) = write_mode {
                config.write_mode = write_mode;
            }
            cmd_serve(config).await
        }
        None => cmd_serve(config).await,
    }
}

fn init_logging(config: &Config) {
    let filter = if config.verbose {
        EnvFilter::new("cohort_api=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("COHORT API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    if let Err(e) = config.validate() {
        println!("FAILED");
        println!("  Error: {}", e);
        return Err(ServiceError::InvalidConfig(e).into());
    }
    println!("OK");

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Bind Address: {}", config.bind_addr());
    println!("  Write Mode: {}", config.write_mode);
    println!(
        "  CORS Origins: {}",
        config.cors_allowed_origins.as_deref().unwrap_or("any")
    );
    println!(
        "  Cohort: {} / {} / #{}",
        config.cohort_academy, config.cohort_curriculum, config.cohort_number
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Serve the HTTP API until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(ServiceError::InvalidConfig(e).into());
    }

    info!("Configuration loaded successfully");
    info!("Write mode: {}", config.write_mode);

    let prometheus = metrics::install_exporter().map_err(ServiceError::from)?;
    let upkeep = prometheus.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(5));
        loop {
            interval.tick().await;
            upkeep.run_upkeep();
        }
    });

    let state = AppState::seeded(&config)
        .map_err(ServiceError::from)?
        .with_metrics(prometheus);
    let app = create_app(state, cors_layer(&config)?);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await.map_err(ServiceError::from)?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServiceError::from)?;

    info!("Server stopped");
    Ok(())
}
