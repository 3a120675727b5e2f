//! Shared constants for end-to-end tests
//!
//! Song metadata used across the suite. When fixture songs change, update
//! only this file.

#![allow(dead_code)]

// ============================================================================
// Song catalog
// ============================================================================

/// "I Didn't Mean To" by Casual
pub const SONG_1_ID: &str = "SOMZWCG12A8C13C480";
pub const SONG_1_TITLE: &str = "I Didn't Mean To";
pub const SONG_1_DURATION: f64 = 218.93179;
pub const ARTIST_1_ID: &str = "ARD7TVE1187B99BFB1";
pub const ARTIST_1_NAME: &str = "Casual";

/// "Setanta matins" by Elena
pub const SONG_2_ID: &str = "SOZCTXZ12AB0182364";
pub const SONG_2_TITLE: &str = "Setanta matins";
pub const SONG_2_DURATION: f64 = 269.58322;
pub const ARTIST_2_ID: &str = "AR5KOSW1187FB35FF4";
pub const ARTIST_2_NAME: &str = "Elena";

// ============================================================================
// Activity log
// ============================================================================

/// 2018-11-15 16:50:07.796 UTC
pub const TS_1: i64 = 1542300607796;

/// 2018-11-15 16:54:32.796 UTC
pub const TS_2: i64 = 1542300872796;

pub const USER_1_ID: i64 = 7;
pub const USER_2_ID: i64 = 15;
pub const SESSION_ID: i64 = 139;
