//! Drops and recreates the Sparkify star schema.

use anyhow::{Context, Result};
use clap::Parser;
use sparkify_etl::config::{self, parse_path, DEFAULT_DB_PATH};
use sparkify_etl::{Queries, SqliteWarehouse};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "create-tables")]
#[command(about = "Drop and recreate the Sparkify star schema tables")]
struct CliArgs {
    /// Path to the SQLite database file, created if missing.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Path to TOML configuration file. Only `db_path` is read from it.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };
    let cli_config = config::CliConfig {
        db_path: cli_args.db_path.clone(),
        ..Default::default()
    };
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    if app_config.db_path.exists() {
        warn!(
            "Database already exists at {:?}, all tables will be dropped",
            app_config.db_path
        );
    }

    let warehouse = SqliteWarehouse::create(&app_config.db_path, Queries::sqlite())
        .with_context(|| format!("Cannot provision warehouse at {:?}", app_config.db_path))?;

    let counts = warehouse.counts()?;
    info!(
        "Star schema ready at {:?}: songs={}, artists={}, time={}, users={}, songplays={}",
        app_config.db_path,
        counts.songs,
        counts.artists,
        counts.time,
        counts.users,
        counts.songplays
    );

    Ok(())
}
