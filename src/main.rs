//! TripDaemon - conversational cycling trip planner
//!
//! CLI entry point for the HTTP server and one-shot planning.

use std::sync::Arc;

use clap::Parser;
use eyre::Result;
use tracing::{debug, info};

use tripdaemon::cli::{Cli, Command};
use tripdaemon::config::Config;
use tripdaemon::domain::ChatRequest;
use tripdaemon::llm::maybe_create_client;
use tripdaemon::planner::{Enrichment, ModelEnrichment, NoEnrichment, Planner};
use tripdaemon::server;
use tripdaemon::session::MemoryStore;
use tripdaemon::tools::Toolbox;

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    let level = match cli_log_level.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some("INFO") | None => tracing::Level::INFO,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
    Ok(())
}

fn build_planner(config: &Config) -> Arc<Planner> {
    let store = Arc::new(MemoryStore::new(config.sessions.max_sessions));
    let toolbox = Toolbox::new(&config.routing);

    let enrichment: Arc<dyn Enrichment> = match maybe_create_client(&config.llm) {
        Some(client) => {
            info!("build_planner: model enrichment enabled");
            Arc::new(ModelEnrichment::new(client))
        }
        None => {
            info!("build_planner: no model credential, running deterministic-only");
            Arc::new(NoEnrichment)
        }
    };

    Arc::new(Planner::new(store, toolbox, enrichment, config.planner.clone()))
}

async fn cmd_serve(config: &Config, port: Option<u16>) -> Result<()> {
    debug!(?port, "cmd_serve: called");
    let mut server_config = config.server.clone();
    if let Some(port) = port {
        server_config.port = port;
    }
    let planner = build_planner(config);
    server::serve(&server_config, planner).await
}

async fn cmd_plan(config: &Config, message: String, session: Option<String>) -> Result<()> {
    debug!(%message, "cmd_plan: called");
    let planner = build_planner(config);
    let response = planner
        .handle_chat(ChatRequest { session_id: session, message, preferences: None })
        .await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref())?;

    let config = Config::load(cli.config.as_ref())?;
    debug!("main: config loaded");

    match cli.command {
        Some(Command::Serve { port }) => cmd_serve(&config, port).await,
        Some(Command::Plan { message, session }) => cmd_plan(&config, message, session).await,
        None => cmd_serve(&config, None).await,
    }
}
