//! Sparkify ETL
//!
//! Loads every song data file, then every log data file, into an existing
//! star schema database. Run `create-tables` first.

use anyhow::{Context, Result};
use clap::Parser;
use sparkify_etl::config::{self, parse_path, DEFAULT_DB_PATH, DEFAULT_LOG_DATA, DEFAULT_SONG_DATA};
use sparkify_etl::{run_etl, Queries, SqliteWarehouse};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "sparkify-etl")]
#[command(about = "Load song and log data into the Sparkify star schema")]
struct CliArgs {
    /// Path to the SQLite database file, as provisioned by create-tables.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Root directory of the song metadata files.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_SONG_DATA)]
    pub song_data: PathBuf,

    /// Root directory of the activity log files.
    #[clap(long, value_parser = parse_path, default_value = DEFAULT_LOG_DATA)]
    pub log_data: PathBuf,

    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            db_path: args.db_path.clone(),
            song_data: args.song_data.clone(),
            log_data: args.log_data.clone(),
        }
    }
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
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;
    app_config.require_data_dirs()?;

    info!("Configuration loaded:");
    info!("  db_path: {:?}", app_config.db_path);
    info!("  song_data: {:?}", app_config.song_data);
    info!("  log_data: {:?}", app_config.log_data);

    let mut warehouse = SqliteWarehouse::open(&app_config.db_path, Queries::sqlite())
        .with_context(|| format!("Cannot open warehouse at {:?}", app_config.db_path))?;

    let summary = run_etl(&mut warehouse, &app_config.song_data, &app_config.log_data)?;

    info!("");
    info!("ETL Summary");
    info!("===========");
    info!(
        "Song files processed: {}/{}",
        summary.song_files.files_processed, summary.song_files.files_found
    );
    info!(
        "Log files processed: {}/{}",
        summary.log_files.files_processed, summary.log_files.files_found
    );
    info!(
        "Songplays loaded: {} ({} without a matching song)",
        summary.songplays_loaded, summary.unmatched_songplays
    );
    if summary.songplays_skipped > 0 {
        warn!(
            "Songplays skipped, songplay_id already present: {}",
            summary.songplays_skipped
        );
    }
    info!("");
    info!("Database contains:");
    info!("  songs: {}", summary.counts.songs);
    info!("  artists: {}", summary.counts.artists);
    info!("  time: {}", summary.counts.time);
    info!("  users: {}", summary.counts.users);
    info!("  songplays: {}", summary.counts.songplays);

    Ok(())
}
