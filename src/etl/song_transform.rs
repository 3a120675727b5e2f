//! Song metadata file -> `songs` + `artists`.

use super::records::SongRecord;
use crate::warehouse::{Artist, Song, StarSchemaSink, WarehouseError};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum SongFileError {
    #[error("Song file contains no records")]
    Empty,

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SongFileStats {
    pub song_inserted: bool,
    pub artist_inserted: bool,
}

pub fn split_song_record(record: &SongRecord) -> (Song, Artist) {
    let song = Song {
        song_id: record.song_id.clone(),
        title: record.title.clone(),
        artist_id: record.artist_id.clone(),
        year: record.year,
        duration: record.duration,
    };
    let artist = Artist {
        artist_id: record.artist_id.clone(),
        name: record.artist_name.clone(),
        location: record.artist_location.clone(),
        latitude: record.artist_latitude,
        longitude: record.artist_longitude,
    };
    (song, artist)
}

/// Write the song and its artist, in that order, from the first record of a
/// song file.
pub fn load_song_records<S: StarSchemaSink>(
    sink: &mut S,
    records: &[SongRecord],
) -> Result<SongFileStats, SongFileError> {
    let record = records.first().ok_or(SongFileError::Empty)?;
    if records.len() > 1 {
        warn!(
            "Song file has {} records, only the first record ({}) is loaded",
            records.len(),
            record.song_id
        );
    }

    let (song, artist) = split_song_record(record);
    let song_inserted = sink.upsert_song(&song)?;
    let artist_inserted = sink.upsert_artist(&artist)?;

    Ok(SongFileStats {
        song_inserted,
        artist_inserted,
    })
}
