//! Shared constants for end-to-end tests
//!
//! When the fixture catalog changes, update only this file and fixtures.rs.

// ============================================================================
// Fixture catalog tracks
// ============================================================================

/// Gym track whose search results contain an official upload
pub const GYM_TRACK_OFFICIAL: &str = "Iron Pulse";

/// Gym track whose search results are all live recordings
pub const GYM_TRACK_LIVE_ONLY: &str = "Heavy Set";

/// The only Angry track; the fake search provider fails for it
pub const ANGRY_TRACK: &str = "Red Fury";

/// Prefix of the Happy tracks, there are HAPPY_TRACKS_COUNT of them
pub const HAPPY_TRACK_PREFIX: &str = "Sunny Day";
pub const HAPPY_TRACKS_COUNT: usize = 7;

/// Rows that would be Gym tracks if they were complete
pub const INCOMPLETE_TRACKS: [&str; 2] = ["Broken Tempo", "Unknown Valence"];

/// Every row of the fixture CSV, incomplete ones included
pub const CATALOG_ROWS: usize = 12;
pub const USABLE_CATALOG_ROWS: usize = 10;

/// Video id the fake search returns for the official Gym track
pub const GYM_TRACK_OFFICIAL_VIDEO_ID: &str = "vid-iron-pulse";

/// Error the fake search returns for the Angry track
pub const SEARCH_FAILURE_MESSAGE: &str = "quota exceeded";

// ============================================================================
// Mood vocabulary
// ============================================================================

pub const MOODS_COUNT: usize = 12;

/// What the fake classifier answers unless told otherwise
pub const DEFAULT_MODEL_MOOD: &str = "Happy";

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between server readiness checks
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

/// Default timeout for HTTP requests in tests
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
