mod error;
mod models;
mod queries;
mod schema;
mod store;

pub use error::WarehouseError;
pub use models::*;
pub use queries::Queries;
pub use schema::STAR_SCHEMA;
pub use store::{FileTransaction, SqliteWarehouse, WarehouseWriter};

/// Destination of the transformed rows.
///
/// Every `upsert_*` returns whether a row was inserted or updated, `false`
/// meaning the key already existed and the policy made the write a no-op.
pub trait StarSchemaSink {
    fn upsert_song(&mut self, song: &Song) -> Result<bool, WarehouseError>;
    fn upsert_artist(&mut self, artist: &Artist) -> Result<bool, WarehouseError>;
    fn upsert_time(&mut self, time: &TimeRow) -> Result<bool, WarehouseError>;
    fn upsert_user(&mut self, user: &User) -> Result<bool, WarehouseError>;
    fn upsert_songplay(&mut self, songplay: &Songplay) -> Result<bool, WarehouseError>;

    /// Resolve a denormalized (title, artist name, duration) triple against
    /// the already loaded songs and artists.
    fn find_song(
        &mut self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<SongMatch>, WarehouseError>;
}
