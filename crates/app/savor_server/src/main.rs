//! Savor API server binary.
//!
//! Serves the REST API over Postgres when a database URL is configured,
//! otherwise over a process-local in-memory store.

use std::sync::Arc;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use savor_api::AppState;
use savor_api::config::ApiConfig;
use savor_core::store::UserStore;
use savor_core::store::memory::MemoryUserStore;
use savor_core::store::postgres::PgUserStore;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "savor_server", about = "Savor API server")]
struct Args {
    /// Address to listen on. Overrides `BIND_ADDR`.
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on; replaces the port of the bind address.
    #[arg(long)]
    port: Option<u16>,

    /// PostgreSQL connection URL. Without it data lives in memory only.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Skip embedded migrations on startup.
    #[arg(long, default_value_t = false)]
    skip_migrations: bool,
}

impl Args {
    fn bind_addr(&self, config: &ApiConfig) -> String {
        let addr = self.bind.clone().unwrap_or_else(|| config.bind_addr.clone());
        match self.port {
            Some(port) => {
                let host = addr.rsplit_once(':').map_or(addr.as_str(), |(host, _)| host);
                format!("{host}:{port}")
            }
            None => addr,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,savor_api=debug,savor_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    config.bind_addr = args.bind_addr(&config);
    if args.database_url.is_some() {
        config.database_url = args.database_url.clone();
    }

    info!(bind_addr = %config.bind_addr, "starting savor_server");

    let store: Arc<dyn UserStore> = match config.database_url.as_deref() {
        Some(url) => {
            info!(max_connections = args.max_connections, "configuring connection pool");
            let pool = PgPoolOptions::new()
                .max_connections(args.max_connections)
                .acquire_timeout(std::time::Duration::from_secs(30))
                .connect(url)
                .await?;

            if args.skip_migrations {
                warn!("skipping database migrations");
            } else {
                info!("running database migrations");
                savor_api::migrate(&pool).await?;
            }
            Arc::new(PgUserStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory store; data is lost on exit");
            Arc::new(MemoryUserStore::new())
        }
    };

    if config.providers.spoonacular_api_key.is_none() {
        warn!("SPOONACULAR_API_KEY not set, recipe search is disabled");
    }
    if config.providers.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY not set, recipe generation is disabled");
    }

    let state = AppState::new(store, config.clone())?;
    let app = savor_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
