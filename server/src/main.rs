mod config;
mod graphql;
mod http;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use platform_db::MemoryStore;
use platform_obs::{ObsConfig, init_tracing};
use products_crm::CrmService;
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "crm-server", version, about = "Agency CRM")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP + GraphQL server.
    Serve(ServeCommand),
    /// Print the seeded row counts as JSON.
    Seed,
    /// Print the GraphQL schema snapshot.
    #[command(name = "schema:print")]
    SchemaPrint {
        #[arg(long, value_name = "FILE", help = "Destination file path")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    init_tracing(ObsConfig::default())?;
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::Seed => run_seed(&app_config).await,
        Command::SchemaPrint { output } => schema_print(output),
    }
}

async fn run_seed(config: &AppConfig) -> Result<()> {
    let store = MemoryStore::from_settings(&config.store);
    let summary = store.summary().await;
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("failed to encode seed summary")?
    );
    Ok(())
}

fn schema_print(path: Option<PathBuf>) -> Result<()> {
    let service = CrmService::new(Arc::new(MemoryStore::instant()));
    let sdl = graphql::build_schema(service).sdl();
    match path {
        Some(target) => {
            std::fs::write(&target, sdl)
                .with_context(|| format!("failed to write {}", target.display()))?;
            info!(path = %target.display(), "schema snapshot written");
        }
        None => print!("{}", sdl),
    }
    Ok(())
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let store = Arc::new(MemoryStore::from_settings(&config.store));
    let service = CrmService::new(store);
    let schema = graphql::build_schema(service.clone());
    let state = AppState {
        service,
        schema,
        config,
    };
    http::serve(cmd.into(), state).await
}
