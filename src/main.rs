use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mergington_activities::{
    api,
    config::ServerConfig,
    models::{self, Catalog},
    store::{CapacityPolicy, RosterStore},
};

#[derive(Parser)]
#[command(name = "activities")]
#[command(about = "Extracurricular activity signups for Mergington High School")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Validate and print the catalog the server would start with
    Catalog {
        /// JSON catalog file replacing the built-in activities
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ServeArgs {
    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port for HTTP API
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON catalog file replacing the built-in activities
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory served under /static
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Refuse signups once an activity reaches max_participants
    #[arg(long)]
    enforce_capacity: bool,
}

impl ServeArgs {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(catalog) = self.catalog {
            config.catalog_path = Some(catalog);
        }
        if let Some(static_dir) = self.static_dir {
            config.static_dir = static_dir;
        }
        if self.enforce_capacity {
            config.capacity_policy = CapacityPolicy::Enforced;
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "mergington_activities=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn seed_catalog(path: Option<&PathBuf>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => models::load_catalog(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Ok(models::default_catalog()),
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let catalog = seed_catalog(config.catalog_path.as_ref())?;
    tracing::info!(
        activities = catalog.len(),
        policy = ?config.capacity_policy,
        "Seeded activity catalog"
    );

    let store = RosterStore::with_policy(catalog, config.capacity_policy);
    let app = api::create_router(store, &config);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("Activities server listening on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = ServerConfig::from_env();

    match cli.command {
        Some(Commands::Serve(args)) => {
            args.apply(&mut config);
            serve(config).await?;
        }
        Some(Commands::Catalog { catalog }) => {
            let catalog = seed_catalog(catalog.as_ref().or(config.catalog_path.as_ref()))?;
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        // Default: start server with environment settings only
        None => serve(config).await?,
    }

    Ok(())
}
