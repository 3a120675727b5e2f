//! Named SQL statements used by the warehouse writer.
//!
//! The writer never reaches for module-level SQL, it receives a `Queries`
//! value when it is built. Every insert statement carries its conflict
//! policy, so no write path can violate a primary key.

#[derive(Clone, Debug)]
pub struct Queries {
    /// Insert-or-ignore on `song_id`.
    pub song_insert: &'static str,
    /// Insert-or-ignore on `artist_id`.
    pub artist_insert: &'static str,
    /// Insert-or-ignore on `start_time`.
    pub time_insert: &'static str,
    /// Insert, or update `level` only when `user_id` exists.
    pub user_upsert: &'static str,
    /// Insert-or-ignore on `songplay_id`.
    pub songplay_insert: &'static str,
    /// Exact match on title, artist name and duration.
    pub song_select: &'static str,
}

impl Queries {
    pub fn sqlite() -> Self {
        Self {
            song_insert: "INSERT INTO songs (song_id, title, artist_id, year, duration)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(song_id) DO NOTHING",
            artist_insert: "INSERT INTO artists (artist_id, name, location, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(artist_id) DO NOTHING",
            time_insert:
                "INSERT INTO time (start_time, hour, day, week, month, year, weekday)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(start_time) DO NOTHING",
            user_upsert: "INSERT INTO users (user_id, first_name, last_name, gender, level)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(user_id) DO UPDATE SET level = excluded.level",
            songplay_insert: "INSERT INTO songplays (songplay_id, start_time, user_id, level, song_id,
                     artist_id, session_id, location, user_agent)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(songplay_id) DO NOTHING",
            song_select: "SELECT songs.song_id, artists.artist_id
                 FROM songs JOIN artists ON songs.artist_id = artists.artist_id
                 WHERE songs.title = ?1 AND artists.name = ?2 AND songs.duration = ?3",
        }
    }
}

impl Default for Queries {
    fn default() -> Self {
        Self::sqlite()
    }
}
