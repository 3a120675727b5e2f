//! SQLite-backed star schema warehouse.
//!
//! `SqliteWarehouse` owns the single connection of a run. Writes go through a
//! `WarehouseWriter`, either directly on the connection or inside the
//! per-file `FileTransaction` handed out by `begin_file`.

use super::error::WarehouseError;
use super::models::*;
use super::queries::Queries;
use super::schema::STAR_SCHEMA;
use super::StarSchemaSink;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Transaction};
use std::path::Path;
use tracing::{debug, info};

pub struct SqliteWarehouse {
    conn: Connection,
    queries: Queries,
}

fn open_connection(db_path: &Path, flags: OpenFlags) -> Result<Connection, WarehouseError> {
    let conn =
        Connection::open_with_flags(db_path, flags).map_err(|source| WarehouseError::Connection {
            path: db_path.to_path_buf(),
            source,
        })?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(conn)
}

impl SqliteWarehouse {
    /// Open an existing, already provisioned database.
    ///
    /// The file is never created here: a missing file is a connection error
    /// and a database without the expected tables is an invalid schema.
    pub fn open<P: AsRef<Path>>(db_path: P, queries: Queries) -> Result<Self, WarehouseError> {
        let db_path = db_path.as_ref();
        let conn = open_connection(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let warehouse = Self::with_connection(conn, queries);
        warehouse.validate()?;

        let counts = warehouse.counts()?;
        info!(
            "Opened warehouse {:?}: {} songs, {} artists, {} users, {} time rows, {} songplays",
            db_path, counts.songs, counts.artists, counts.users, counts.time, counts.songplays
        );
        Ok(warehouse)
    }

    /// Open (creating the file if needed) and provision from scratch.
    pub fn create<P: AsRef<Path>>(db_path: P, queries: Queries) -> Result<Self, WarehouseError> {
        let conn = open_connection(
            db_path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let warehouse = Self::with_connection(conn, queries);
        warehouse.provision()?;
        Ok(warehouse)
    }

    pub fn with_connection(conn: Connection, queries: Queries) -> Self {
        Self { conn, queries }
    }

    /// Drop every table, then create them again, in a single transaction.
    pub fn provision(&self) -> Result<(), WarehouseError> {
        let tx = self.conn.unchecked_transaction()?;

        info!("Dropping tables: {}", STAR_SCHEMA.drop_order.join(", "));
        STAR_SCHEMA
            .drop_all(&tx)
            .map_err(|e| WarehouseError::Provisioning(format!("{:#}", e)))?;

        info!(
            "Creating tables: {}",
            STAR_SCHEMA
                .tables
                .iter()
                .map(|t| t.name)
                .collect::<Vec<_>>()
                .join(", ")
        );
        STAR_SCHEMA
            .create(&tx)
            .map_err(|e| WarehouseError::Provisioning(format!("{:#}", e)))?;

        tx.commit()?;
        self.validate()
    }

    pub fn validate(&self) -> Result<(), WarehouseError> {
        STAR_SCHEMA
            .validate(&self.conn)
            .map_err(|e| WarehouseError::InvalidSchema(format!("{:#}", e)))
    }

    /// Start the transaction covering one source file.
    pub fn begin_file(&mut self) -> Result<FileTransaction<'_>, WarehouseError> {
        let tx = self.conn.transaction()?;
        Ok(FileTransaction {
            tx,
            queries: &self.queries,
        })
    }

    /// A writer in autocommit mode, outside of any file transaction.
    pub fn writer(&self) -> WarehouseWriter<'_> {
        WarehouseWriter::new(&self.conn, &self.queries)
    }

    pub fn counts(&self) -> Result<TableCounts, WarehouseError> {
        let count = |table: &str| -> Result<i64, WarehouseError> {
            Ok(self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))?)
        };
        Ok(TableCounts {
            songs: count("songs")?,
            artists: count("artists")?,
            time: count("time")?,
            users: count("users")?,
            songplays: count("songplays")?,
        })
    }
}

/// Transaction scoped to one source file. Dropping it without `commit` rolls
/// back everything written through its writer.
pub struct FileTransaction<'a> {
    tx: Transaction<'a>,
    queries: &'a Queries,
}

impl FileTransaction<'_> {
    pub fn writer(&self) -> WarehouseWriter<'_> {
        WarehouseWriter::new(&self.tx, self.queries)
    }

    pub fn commit(self) -> Result<(), WarehouseError> {
        self.tx.commit()?;
        Ok(())
    }
}

/// Upsert writer and lookup resolver over a borrowed connection.
pub struct WarehouseWriter<'a> {
    conn: &'a Connection,
    queries: &'a Queries,
}

impl<'a> WarehouseWriter<'a> {
    pub fn new(conn: &'a Connection, queries: &'a Queries) -> Self {
        Self { conn, queries }
    }
}

impl StarSchemaSink for WarehouseWriter<'_> {
    fn upsert_song(&mut self, song: &Song) -> Result<bool, WarehouseError> {
        let changed = self.conn.prepare_cached(self.queries.song_insert)?.execute(params![
            song.song_id,
            song.title,
            song.artist_id,
            song.year,
            song.duration
        ])?;
        Ok(changed > 0)
    }

    fn upsert_artist(&mut self, artist: &Artist) -> Result<bool, WarehouseError> {
        let changed = self
            .conn
            .prepare_cached(self.queries.artist_insert)?
            .execute(params![
                artist.artist_id,
                artist.name,
                artist.location,
                artist.latitude,
                artist.longitude
            ])?;
        Ok(changed > 0)
    }

    fn upsert_time(&mut self, time: &TimeRow) -> Result<bool, WarehouseError> {
        let changed = self.conn.prepare_cached(self.queries.time_insert)?.execute(params![
            time.start_time,
            time.hour,
            time.day,
            time.week,
            time.month,
            time.year,
            time.weekday
        ])?;
        Ok(changed > 0)
    }

    fn upsert_user(&mut self, user: &User) -> Result<bool, WarehouseError> {
        let changed = self.conn.prepare_cached(self.queries.user_upsert)?.execute(params![
            user.user_id,
            user.first_name,
            user.last_name,
            user.gender,
            user.level
        ])?;
        Ok(changed > 0)
    }

    fn upsert_songplay(&mut self, songplay: &Songplay) -> Result<bool, WarehouseError> {
        let changed = self
            .conn
            .prepare_cached(self.queries.songplay_insert)?
            .execute(params![
                songplay.songplay_id,
                songplay.start_time,
                songplay.user_id,
                songplay.level,
                songplay.song_id,
                songplay.artist_id,
                songplay.session_id,
                songplay.location,
                songplay.user_agent
            ])?;
        Ok(changed > 0)
    }

    fn find_song(
        &mut self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongMatch>, WarehouseError> {
        // No ORDER BY: with several matches, whichever row SQLite yields first wins.
        let found = self
            .conn
            .prepare_cached(self.queries.song_select)?
            .query_row(params![title, artist_name, duration], |row| {
                Ok(SongMatch {
                    song_id: row.get(0)?,
                    artist_id: row.get(1)?,
                })
            })
            .optional()?;
        if found.is_none() {
            debug!(
                "No song matches title {:?} by {:?} ({}s)",
                title, artist_name, duration
            );
        }
        Ok(found)
    }
}
