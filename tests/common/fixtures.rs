//! Test fixture creation for data trees and databases

use serde_json::{json, Value};
use sparkify_etl::{Queries, SqliteWarehouse};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding `song_data/`, `log_data/` and a provisioned
/// `sparkify.db`.
pub struct DataTree {
    pub dir: TempDir,
    pub db_path: PathBuf,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
}

impl DataTree {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let song_data = dir.path().join("song_data");
        let log_data = dir.path().join("log_data");
        fs::create_dir_all(&song_data).expect("Failed to create song_data");
        fs::create_dir_all(&log_data).expect("Failed to create log_data");
        let db_path = dir.path().join("sparkify.db");

        SqliteWarehouse::create(&db_path, Queries::sqlite()).expect("Failed to provision db");

        Self {
            dir,
            db_path,
            song_data,
            log_data,
        }
    }

    /// Write one song file at `relative` under `song_data/`.
    pub fn add_song_file(&self, relative: &str, line: Value) -> PathBuf {
        write_lines(&self.song_data, relative, &[line])
    }

    /// Write one log file at `relative` under `log_data/`.
    pub fn add_log_file(&self, relative: &str, lines: &[Value]) -> PathBuf {
        write_lines(&self.log_data, relative, lines)
    }

    /// Write raw text, for malformed files.
    pub fn add_raw_log_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.log_data.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    pub fn open(&self) -> SqliteWarehouse {
        SqliteWarehouse::open(&self.db_path, Queries::sqlite()).expect("Failed to open db")
    }

    /// A separate read connection for assertions.
    pub fn conn(&self) -> rusqlite::Connection {
        rusqlite::Connection::open(&self.db_path).expect("Failed to open db")
    }
}

fn write_lines(root: &Path, relative: &str, lines: &[Value]) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let content: String = lines.iter().map(|line| format!("{}\n", line)).collect();
    fs::write(&path, content).unwrap();
    path
}

/// A song file line in the shape of the Million Song Dataset subset.
pub fn song_line(song_id: &str, title: &str, duration: f64, artist_id: &str, artist_name: &str) -> Value {
    json!({
        "num_songs": 1,
        "artist_id": artist_id,
        "artist_latitude": null,
        "artist_longitude": null,
        "artist_location": "",
        "artist_name": artist_name,
        "song_id": song_id,
        "title": title,
        "duration": duration,
        "year": 0
    })
}

/// Any non-playback event, e.g. `Home` or `Login`.
pub fn page_event(page: &str, ts: i64) -> Value {
    json!({
        "artist": null,
        "auth": "Logged Out",
        "firstName": null,
        "gender": null,
        "itemInSession": 0,
        "lastName": null,
        "length": null,
        "level": "free",
        "location": null,
        "method": "GET",
        "page": page,
        "registration": null,
        "sessionId": 52,
        "song": null,
        "status": 200,
        "ts": ts,
        "userAgent": null,
        "userId": ""
    })
}

/// A `NextSong` event for `user_id` at `ts`.
pub fn next_song(song: &str, artist: &str, length: f64, ts: i64, user_id: i64, level: &str) -> Value {
    json!({
        "artist": artist,
        "auth": "Logged In",
        "firstName": "Kaylee",
        "gender": "F",
        "itemInSession": 1,
        "lastName": "Summers",
        "length": length,
        "level": level,
        "location": "Phoenix-Mesa-Scottsdale, AZ",
        "method": "PUT",
        "page": "NextSong",
        "registration": 1540344794796.0,
        "sessionId": 139,
        "song": song,
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0",
        "userId": user_id.to_string()
    })
}

/// Serialize one event as a log line.
pub fn log_line(event: &Value) -> String {
    format!("{}\n", event)
}
