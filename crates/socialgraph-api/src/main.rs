//! CLI entry point for the social graph HTTP service.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use socialgraph_core::ServiceConfig;
use socialgraph_graph::{GraphClient, GraphConfig, GraphStore, MemoryGraph};

use socialgraph_api::AppState;

#[derive(Parser)]
#[command(name = "socialgraph-api")]
#[command(about = "HTTP API for users, groups, subscriptions, and follows")]
struct Cli {
    /// Config file prefix (default: socialgraph).
    #[arg(short, long, default_value = "socialgraph")]
    config: String,

    /// Override the listen address from config.
    #[arg(short, long)]
    bind: Option<String>,

    /// Keep the graph in process memory instead of connecting to Neo4j.
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is not an error.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    let mut config = ServiceConfig::load(&cli.config)?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    config.validate()?;

    let store: Arc<dyn GraphStore> = if cli.memory {
        tracing::warn!("Using in-memory graph; data is lost on exit");
        Arc::new(MemoryGraph::new())
    } else {
        let graph = GraphClient::connect(&GraphConfig::from(&config.neo4j)).await?;
        graph.ensure_schema().await?;
        Arc::new(graph)
    };

    let state = AppState::new(store, &config.auth.api_token);
    let app = socialgraph_api::app(state);

    let addr: SocketAddr = config.server.bind.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
