use std::sync::Arc;

use clap::Parser;
use lbapi::{
    api::{start_api_server, ApiState},
    cli::{handle_database_command, Cli, Commands},
    observability::{init_observability, log_config_info},
    services::FrontendService,
    storage::{create_pool, get_pool_stats, SqlxFrontendRepository},
    Result, APP_NAME, VERSION,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing)
    // This must happen before any config is read from environment
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let cli = Cli::parse();
    let config = cli.load_config()?;

    init_observability(&config.observability).await?;

    info!(app_name = APP_NAME, version = VERSION, "Starting load balancer frontend API");
    log_config_info(&config);

    if let Some(Commands::Database { command }) = &cli.command {
        return handle_database_command(command, &config).await;
    }

    let pool = create_pool(&config.database).await?;
    let repository = Arc::new(SqlxFrontendRepository::new(pool.clone()));
    let state = ApiState::new(Arc::new(FrontendService::new(repository)));

    if let Err(e) = start_api_server(config.api.clone(), state).await {
        error!(error = %e, "API server terminated with error");
        return Err(e);
    }

    let stats = get_pool_stats(&pool);
    info!(size = stats.size, idle = stats.idle, active = stats.active(), "Closing database pool");
    pool.close().await;
    info!("Shutdown complete");

    Ok(())
}
