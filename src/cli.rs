//! # Command Line Interface
//!
//! Flags that override the layered configuration, plus database maintenance
//! commands. With no subcommand the binary serves the API.

use crate::config::AppConfig;
use crate::errors::Result;
use crate::storage::migrations::create_migration_table;
use crate::storage::{
    create_pool, get_migration_version, list_applied_migrations, run_migrations, MigrationInfo,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lbapi")]
#[command(about = "Tenant-scoped load balancer frontend API")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path (TOML, YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// API bind address override
    #[arg(long)]
    pub bind_address: Option<String>,

    /// API port override
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Database URL override
    #[arg(long)]
    pub database_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the API server (default)
    Serve,

    /// Database management commands
    Database {
        #[command(subcommand)]
        command: DatabaseCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum DatabaseCommands {
    /// Run pending migrations
    Migrate,

    /// Show the current schema version
    Status,

    /// List all applied migrations
    List,
}

impl Cli {
    /// Load configuration and apply command line overrides on top of it.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;

        if let Some(bind_address) = &self.bind_address {
            config.api.bind_address = bind_address.clone();
        }
        if let Some(port) = self.port {
            config.api.port = port;
        }
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if self.verbose {
            config.observability.log_level = "debug".to_string();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Handle database management commands
pub async fn handle_database_command(command: &DatabaseCommands, config: &AppConfig) -> Result<()> {
    let mut database = config.database.clone();
    database.auto_migrate = false;
    let pool = create_pool(&database).await?;
    create_migration_table(&pool).await?;

    match command {
        DatabaseCommands::Migrate => {
            run_migrations(&pool).await?;
            let version = get_migration_version(&pool).await?;
            println!("Migrations completed, schema version {}", version);
        }

        DatabaseCommands::Status => {
            let version = get_migration_version(&pool).await?;
            if version == 0 {
                println!("No migrations have been applied");
            } else {
                println!("Schema version {}", version);
            }
        }

        DatabaseCommands::List => {
            let migrations = list_applied_migrations(&pool).await?;
            if migrations.is_empty() {
                println!("No migrations have been applied");
            } else {
                print_migrations_table(&migrations);
            }
        }
    }

    Ok(())
}

/// Print migrations in a formatted table
fn print_migrations_table(migrations: &[MigrationInfo]) {
    println!("{:<15} {:<40} {:<22} {:<10}", "Version", "Description", "Applied On", "Time (ms)");
    println!("{}", "-".repeat(90));

    for migration in migrations {
        println!(
            "{:<15} {:<40} {:<22} {:<10}",
            migration.version,
            truncate_string(&migration.description, 38),
            migration.installed_on.format("%Y-%m-%d %H:%M:%S"),
            migration.execution_time
        );
    }
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len.saturating_sub(3)).collect::<String>())
    }
}
