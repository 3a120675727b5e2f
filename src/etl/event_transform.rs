//! Activity log file -> `time`, `users` and `songplays`.
//!
//! Only `NextSong` events are kept. For one file, all time rows are written
//! first, then users, then songplays. Songplays resolve their song and artist
//! against dimensions loaded by an earlier song data pass.

use super::records::LogEvent;
use crate::warehouse::{Songplay, StarSchemaSink, TimeRow, User, WarehouseError};
use chrono::{DateTime, Datelike, Timelike};
use std::collections::HashSet;
use thiserror::Error;

pub const NEXT_SONG_PAGE: &str = "NextSong";

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event #{row} is missing required field {field}")]
    MissingField { row: usize, field: &'static str },

    #[error("Event #{row} has an out of range timestamp {ts}")]
    InvalidTimestamp { row: usize, ts: i64 },

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),
}

/// A `NextSong` event whose required fields are all present.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayEvent<'a> {
    /// 1-based position of the event in its file.
    pub row: usize,
    pub ts: i64,
    pub user_id: i64,
    pub level: &'a str,
    pub session_id: i64,
    pub event: &'a LogEvent,
}

/// Row counts for one log file. `time_rows`, `users` and `songplays` only
/// count writes that changed the warehouse.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LogFileStats {
    pub events: usize,
    pub plays: usize,
    pub time_rows: usize,
    pub users: usize,
    pub songplays: usize,
    /// Songplays whose id already existed, ignored by the insert.
    pub skipped_songplays: usize,
    pub unmatched_songplays: usize,
}

/// Keep the `NextSong` events, in order, checking their required fields.
pub fn retain_plays(events: &[LogEvent]) -> Result<Vec<PlayEvent<'_>>, EventError> {
    events
        .iter()
        .enumerate()
        .filter(|(_, event)| event.page == NEXT_SONG_PAGE)
        .map(|(index, event)| {
            let row = index + 1;
            let missing = |field: &'static str| EventError::MissingField { row, field };
            Ok(PlayEvent {
                row,
                ts: event.ts.ok_or_else(|| missing("ts"))?,
                user_id: event.user_id.ok_or_else(|| missing("userId"))?,
                level: event.level.as_deref().ok_or_else(|| missing("level"))?,
                session_id: event.session_id.ok_or_else(|| missing("sessionId"))?,
                event,
            })
        })
        .collect()
}

/// Split epoch milliseconds into calendar fields, read as naive UTC.
pub fn decompose_timestamp(ts: i64) -> Option<TimeRow> {
    let time = DateTime::from_timestamp_millis(ts)?.naive_utc();
    Some(TimeRow {
        start_time: ts,
        hour: time.hour(),
        day: time.day(),
        week: time.iso_week().week(),
        month: time.month(),
        year: time.year(),
        weekday: time.weekday().num_days_from_monday(),
    })
}

/// One time row per distinct timestamp, first occurrence wins.
pub fn derive_time_rows(plays: &[PlayEvent<'_>]) -> Result<Vec<TimeRow>, EventError> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for play in plays {
        if !seen.insert(play.ts) {
            continue;
        }
        let row = decompose_timestamp(play.ts).ok_or(EventError::InvalidTimestamp {
            row: play.row,
            ts: play.ts,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// One user per id, last occurrence wins and sets the position.
pub fn derive_users(plays: &[PlayEvent<'_>]) -> Vec<User> {
    let mut seen = HashSet::new();
    let mut users: Vec<User> = plays
        .iter()
        .rev()
        .filter(|play| seen.insert(play.user_id))
        .map(|play| User {
            user_id: play.user_id,
            first_name: play.event.first_name.clone(),
            last_name: play.event.last_name.clone(),
            gender: play.event.gender.clone(),
            level: play.level.to_string(),
        })
        .collect();
    users.reverse();
    users
}

/// Write every dimension and fact row derived from one log file.
pub fn load_log_events<S: StarSchemaSink>(
    sink: &mut S,
    events: &[LogEvent],
) -> Result<LogFileStats, EventError> {
    let plays = retain_plays(events)?;
    let mut stats = LogFileStats {
        events: events.len(),
        plays: plays.len(),
        ..Default::default()
    };

    for time in derive_time_rows(&plays)? {
        if sink.upsert_time(&time)? {
            stats.time_rows += 1;
        }
    }

    for user in derive_users(&plays) {
        if sink.upsert_user(&user)? {
            stats.users += 1;
        }
    }

    for (position, play) in plays.iter().enumerate() {
        let event = play.event;
        let found = match (&event.song, &event.artist, event.length) {
            (Some(title), Some(artist), Some(length)) => sink.find_song(title, artist, length)?,
            _ => None,
        };
        if found.is_none() {
            stats.unmatched_songplays += 1;
        }
        let (song_id, artist_id) = match found {
            Some(found) => (Some(found.song_id), Some(found.artist_id)),
            None => (None, None),
        };

        let inserted = sink.upsert_songplay(&Songplay {
            songplay_id: position as i64,
            start_time: play.ts,
            user_id: play.user_id,
            level: play.level.to_string(),
            song_id,
            artist_id,
            session_id: play.session_id,
            location: event.location.clone(),
            user_agent: event.user_agent.clone(),
        })?;
        if inserted {
            stats.songplays += 1;
        } else {
            stats.skipped_songplays += 1;
        }
    }

    Ok(stats)
}
