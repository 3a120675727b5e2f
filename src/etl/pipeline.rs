//! File processors and the full song-then-log run.

use super::batch::{process_data, BatchStats};
use super::event_transform::{load_log_events, LogFileStats};
use super::extract::read_json_lines;
use super::records::{LogEvent, SongRecord};
use super::song_transform::{load_song_records, SongFileStats};
use crate::warehouse::{SqliteWarehouse, StarSchemaSink, TableCounts};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

pub fn process_song_file<S: StarSchemaSink>(sink: &mut S, path: &Path) -> Result<SongFileStats> {
    let records: Vec<SongRecord> = read_json_lines(path)?;
    let stats = load_song_records(sink, &records)?;
    debug!("{:?}: {:?}", path, stats);
    Ok(stats)
}

pub fn process_log_file<S: StarSchemaSink>(sink: &mut S, path: &Path) -> Result<LogFileStats> {
    let events: Vec<LogEvent> = read_json_lines(path)?;
    let stats = load_log_events(sink, &events)?;
    debug!("{:?}: {:?}", path, stats);
    Ok(stats)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtlSummary {
    pub song_files: BatchStats,
    pub log_files: BatchStats,
    /// Songplays actually inserted.
    pub songplays_loaded: usize,
    /// Songplays ignored because their id was already taken.
    pub songplays_skipped: usize,
    pub unmatched_songplays: usize,
    pub counts: TableCounts,
}

/// Load every song file, then every log file, so songplay lookups see the
/// whole song catalog.
pub fn run_etl(warehouse: &mut SqliteWarehouse, song_data: &Path, log_data: &Path) -> Result<EtlSummary> {
    let song_files = process_data(warehouse, song_data, |writer, path| {
        process_song_file(writer, path).map(|_| ())
    })
    .context("Song data load failed")?;

    let mut songplays_loaded = 0;
    let mut songplays_skipped = 0;
    let mut unmatched_songplays = 0;
    let log_files = process_data(warehouse, log_data, |writer, path| {
        let stats = process_log_file(writer, path)?;
        songplays_loaded += stats.songplays;
        songplays_skipped += stats.skipped_songplays;
        unmatched_songplays += stats.unmatched_songplays;
        Ok(())
    })
    .context("Log data load failed")?;

    Ok(EtlSummary {
        song_files,
        log_files,
        songplays_loaded,
        songplays_skipped,
        unmatched_songplays,
        counts: warehouse.counts()?,
    })
}
