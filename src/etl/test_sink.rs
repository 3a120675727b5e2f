//! In-memory `StarSchemaSink` recording every call, for transformer tests.
//!
//! Conflict policies follow the warehouse: a song, artist, time or songplay
//! whose key was already written is ignored and reported as unchanged, a user
//! is always written.

use crate::warehouse::{
    Artist, Song, SongMatch, Songplay, StarSchemaSink, TimeRow, User, WarehouseError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Song(Song),
    Artist(Artist),
    Time(TimeRow),
    User(User),
    Songplay(Songplay),
}

#[derive(Default)]
pub struct RecordingSink {
    pub writes: Vec<Write>,
    pub lookups: Vec<(String, String, f64)>,
    /// (title, artist name, duration) triples that resolve to a match.
    pub catalog: Vec<(String, String, f64, SongMatch)>,
}

impl RecordingSink {
    pub fn with_song(mut self, title: &str, artist: &str, duration: f64, song_id: &str) -> Self {
        self.catalog.push((
            title.to_string(),
            artist.to_string(),
            duration,
            SongMatch {
                song_id: song_id.to_string(),
                artist_id: format!("AR-{}", artist),
            },
        ));
        self
    }

    pub fn times(&self) -> Vec<&TimeRow> {
        self.writes
            .iter()
            .filter_map(|w| match w {
                Write::Time(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn users(&self) -> Vec<&User> {
        self.writes
            .iter()
            .filter_map(|w| match w {
                Write::User(u) => Some(u),
                _ => None,
            })
            .collect()
    }

    pub fn songplays(&self) -> Vec<&Songplay> {
        self.writes
            .iter()
            .filter_map(|w| match w {
                Write::Songplay(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl StarSchemaSink for RecordingSink {
    fn upsert_song(&mut self, song: &Song) -> Result<bool, WarehouseError> {
        let known = self
            .writes
            .iter()
            .any(|w| matches!(w, Write::Song(s) if s.song_id == song.song_id));
        self.writes.push(Write::Song(song.clone()));
        Ok(!known)
    }

    fn upsert_artist(&mut self, artist: &Artist) -> Result<bool, WarehouseError> {
        let known = self
            .writes
            .iter()
            .any(|w| matches!(w, Write::Artist(a) if a.artist_id == artist.artist_id));
        self.writes.push(Write::Artist(artist.clone()));
        Ok(!known)
    }

    fn upsert_time(&mut self, time: &TimeRow) -> Result<bool, WarehouseError> {
        let known = self.times().iter().any(|t| t.start_time == time.start_time);
        self.writes.push(Write::Time(time.clone()));
        Ok(!known)
    }

    fn upsert_user(&mut self, user: &User) -> Result<bool, WarehouseError> {
        self.writes.push(Write::User(user.clone()));
        Ok(true)
    }

    fn upsert_songplay(&mut self, songplay: &Songplay) -> Result<bool, WarehouseError> {
        let known = self
            .songplays()
            .iter()
            .any(|s| s.songplay_id == songplay.songplay_id);
        self.writes.push(Write::Songplay(songplay.clone()));
        Ok(!known)
    }

    fn find_song(
        &mut self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongMatch>, WarehouseError> {
        self.lookups
            .push((title.to_string(), artist_name.to_string(), duration));
        Ok(self
            .catalog
            .iter()
            .find(|(t, a, d, _)| t == title && a == artist_name && *d == duration)
            .map(|(_, _, _, found)| found.clone()))
    }
}
