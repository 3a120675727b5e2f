mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "sparkify.db";
pub const DEFAULT_SONG_DATA: &str = "data/song_data";
pub const DEFAULT_LOG_DATA: &str = "data/log_data";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            song_data: PathBuf::from(DEFAULT_SONG_DATA),
            log_data: PathBuf::from(DEFAULT_LOG_DATA),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = match file.db_path {
            Some(path) => parse_path(&path)?,
            None => cli.db_path.clone(),
        };
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        let song_data = match file.song_data {
            Some(path) => parse_path(&path)?,
            None => cli.song_data.clone(),
        };
        let log_data = match file.log_data {
            Some(path) => parse_path(&path)?,
            None => cli.log_data.clone(),
        };

        Ok(Self {
            db_path,
            song_data,
            log_data,
        })
    }

    /// Both data roots must be existing directories before a load starts.
    pub fn require_data_dirs(&self) -> Result<()> {
        for (name, dir) in [("song_data", &self.song_data), ("log_data", &self.log_data)] {
            if !dir.exists() {
                bail!("{} directory does not exist: {:?}", name, dir);
            }
            if !dir.is_dir() {
                bail!("{} is not a directory: {:?}", name, dir);
            }
        }
        Ok(())
    }
}

/// Makes a relative path absolute against the current directory.
pub fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}
