//! Common test infrastructure
//!
//! Tests build a throwaway data tree with `DataTree`, run the real pipeline
//! against its provisioned database and inspect the tables with plain SQL.
//! Tests should only import from this module, not from internal submodules.

mod constants;
mod fixtures;

pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{log_line, next_song, page_event, song_line, DataTree};
