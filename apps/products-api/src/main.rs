//! Products API - REST server

use axum_helpers::server::{create_production_app, create_router, health_router};
use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv, load_dotenv};
use database::postgres::{self, PostgresConfig};
use domain_products::{PgProductRepository, ProductService};
use eyre::WrapErr;
use std::path::Path;
use std::time::Duration;
use tracing::info;

mod api;
mod cli;
mod config;
mod openapi;
mod state;

use cli::{Cli, Command};
use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    load_dotenv();

    let cli = Cli::parse();
    init_tracing(&Environment::from_env());

    match cli.command() {
        Command::Serve => serve().await,
        Command::Openapi { output } => write_openapi(output.as_deref()),
        Command::Clear => clear().await,
    }
}

async fn serve() -> eyre::Result<()> {
    let config = Config::from_env()?;

    // Fail fast: no point serving without the database
    let db = postgres::connect_from_config(config.database.clone())
        .await
        .wrap_err("Failed to connect to PostgreSQL")?;
    postgres::run_migrations::<migration::Migrator>(&db, config.app.name).await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    let router = create_router::<openapi::ApiDoc>(api::routes(&state), &config.allowed_origins())?;
    let app = router
        .merge(health_router(config.app))
        .merge(api::health::router(state.clone()));

    info!(
        "Starting {} v{} ({:?}) on {}",
        config.app.name,
        config.app.version,
        config.environment,
        config.server.address()
    );

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing PostgreSQL connections");
        if let Err(e) = state.db.close().await {
            tracing::warn!("Failed to close PostgreSQL connections: {}", e);
        }
    })
    .await
    .wrap_err("Server error")?;

    info!("Products API shutdown complete");
    Ok(())
}

fn write_openapi(output: Option<&Path>) -> eyre::Result<()> {
    let json = openapi::to_pretty_json()?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            info!("OpenAPI document written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

async fn clear() -> eyre::Result<()> {
    let db = postgres::connect_from_config(PostgresConfig::from_env()?)
        .await
        .wrap_err("Failed to connect to PostgreSQL")?;

    let service = ProductService::new(PgProductRepository::new(db.clone()));
    let deleted = service.clear_products().await?;
    info!("Deleted {} products", deleted);

    db.close().await?;
    Ok(())
}
