//! Bookchat Application Shell
//!
//! This is the thin application shell that installs the router, store
//! plugin and icon library, mounts the application and exposes command
//! handlers. Core logic lives in the `crates/` directory.

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use anyhow::Context;
use bookchat_core::AppConfig;
use shell::AppShell;
use tracing::info;

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,bookchat=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load configuration, mount the application at the URL given as first
/// argument (default `/`) and print the resulting route as JSON.
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load_with_env().context("failed to load configuration")?;
    info!("Starting {} v{}", config.general.app_name, env!("CARGO_PKG_VERSION"));

    let selector = config.general.mount_selector.clone();
    let initial_url = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());

    let shell = AppShell::from_config(config).context("failed to build application shell")?;
    let report = shell
        .mount(&selector, &initial_url)
        .with_context(|| format!("failed to mount application on '{selector}'"))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
