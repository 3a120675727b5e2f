pub mod batch;
pub mod event_transform;
pub mod extract;
pub mod pipeline;
pub mod records;
pub mod song_transform;

#[cfg(test)]
mod test_sink;

pub use batch::{find_json_files, process_data, BatchStats};
pub use event_transform::{decompose_timestamp, load_log_events, EventError, LogFileStats};
pub use extract::{read_json_lines, read_records, ExtractError, Record};
pub use pipeline::{process_log_file, process_song_file, run_etl, EtlSummary};
pub use records::{LogEvent, SongRecord};
pub use song_transform::{load_song_records, SongFileError, SongFileStats};
