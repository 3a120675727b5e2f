//! Rows of the star schema, one struct per table.

/// A song from the song metadata dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct Song {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    /// Duration in seconds, matched exactly against event `length`.
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Artist {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Calendar decomposition of a single event timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeRow {
    /// Raw epoch milliseconds, as found in the log.
    pub start_time: i64,
    pub hour: u32,
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: i32,
    /// Monday = 0 ... Sunday = 6
    pub weekday: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: String,
}

/// One fact row per `NextSong` event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Songplay {
    /// Position of the event among the retained events of its log file.
    pub songplay_id: i64,
    pub start_time: i64,
    pub user_id: i64,
    pub level: String,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// Result of resolving a (title, artist name, duration) triple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongMatch {
    pub song_id: String,
    pub artist_id: String,
}

/// Row counts of every table, used for the post-run summary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub songs: i64,
    pub artists: i64,
    pub time: i64,
    pub users: i64,
    pub songplays: i64,
}
