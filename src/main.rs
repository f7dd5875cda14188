use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

mod cli;

use cli::{Cli, Commands};
use toolbench::config::ServerConfig;
use toolbench::server::McpServer;
use toolbench::store::{MemoryPostStore, PostStore, SqlitePostStore};
use toolbench::tools::{ToolRegistry, builtin_tools};

fn log_gate(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

fn setup_logging(verbose: bool) {
    // stdout carries the protocol; logs go to stderr. env_logger's own
    // filter stays at debug; the global max level does the gating so it
    // can be raised once the config is known.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Stderr)
        .init();
    log::set_max_level(log_gate(verbose));
}

fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolbench")
        .join("posts.db")
}

fn open_store(path: Option<PathBuf>, memory: bool) -> Result<Arc<dyn PostStore>> {
    if memory {
        info!("Using in-memory post store");
        return Ok(Arc::new(MemoryPostStore::new()));
    }

    let path = path.unwrap_or_else(default_store_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create store directory: {}", parent.display()))?;
    }
    info!("Opening post store at {}", path.display());
    let store = SqlitePostStore::open(&path)
        .with_context(|| format!("Failed to open post store at {}", path.display()))?;
    Ok(Arc::new(store))
}

fn build_registry(store: Arc<dyn PostStore>) -> Result<ToolRegistry> {
    ToolRegistry::with_tools(builtin_tools(store)).context("Failed to register tools")
}

async fn run_serve(config: ServerConfig, store: Option<PathBuf>, memory: bool) -> Result<()> {
    let store = open_store(store, memory)?;
    let registry = build_registry(store)?;

    info!(
        "Starting MCP server: {} tools, base-path {}, max-duration {}s",
        registry.len(),
        config.base_path,
        config.max_duration_secs
    );

    let server = McpServer::new(config, registry);
    server.run().await.context("Server failed")?;
    Ok(())
}

fn print_tools() -> Result<()> {
    let registry = build_registry(Arc::new(MemoryPostStore::new()))?;
    println!("{}", "Registered tools:".bold());
    for def in registry.definitions() {
        println!("  {:<10} {}", def.name.cyan().bold(), def.description);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging must be up before the config loads; ServerConfig::load
    // logs which file it settled on.
    setup_logging(cli.verbose);

    let config = ServerConfig::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if config.verbose_logs {
        log::set_max_level(log::LevelFilter::Debug);
    }
    config.validate().context("Invalid configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    match cli.command {
        None => run_serve(config, None, false).await,
        Some(Commands::Serve { store, memory }) => run_serve(config, store, memory).await,
        Some(Commands::Tools) => print_tools(),
    }
}
