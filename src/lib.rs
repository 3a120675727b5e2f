//! Sparkify ETL Library
//!
//! Loads the song metadata and user activity datasets into a SQLite star
//! schema. Shared by the `create-tables` and `sparkify-etl` binaries.

pub mod config;
pub mod etl;
pub mod sqlite_persistence;
pub mod warehouse;

pub use config::{AppConfig, CliConfig, FileConfig};
pub use etl::{run_etl, EtlSummary};
pub use warehouse::{Queries, SqliteWarehouse, StarSchemaSink, WarehouseError};
