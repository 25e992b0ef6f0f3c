//! Storefront CLI server
//!
//! ```sh
//! # Run with default config (~/.config/storefront/config.toml)
//! storefront
//!
//! # Custom config and catalog
//! storefront --config /etc/storefront/config.toml --products /srv/products.json
//!
//! # Validate config without starting
//! storefront --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use storefront::config::AppConfig;
use storefront::server::{init_tracing, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(
    name = "storefront",
    version,
    about = "Storefront catalog service",
    long_about = "REST API for browsing the product catalog, searching, paging, \
                  filling a cart and placing orders.\n\n\
                  Default config: ~/.config/storefront/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "STOREFRONT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the product catalog (JSON array).
    #[arg(long)]
    products: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Keep idle sessions forever.
    #[arg(long)]
    no_expiry: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(storefront::default_config_path);

    let loaded = AppConfig::load(&config_path);
    let load_failed = loaded.is_err();
    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => AppConfig::default(),
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    // Tracing first so everything below is formatted
    init_tracing(&config);
    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if let Some(products) = cli.products {
        info!("CLI override: products = {}", products.display());
        config.catalog.products_path = products;
    }

    if cli.check {
        if load_failed {
            return Err(format!("invalid configuration: {}", config_path.display()).into());
        }
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Products    : {}", config.catalog.products_path.display());
        println!("   Page size   : {}", config.catalog.page_size);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        expire_sessions: !cli.no_expiry,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
