//! Shared constants for end-to-end tests
//!
//! When the fixture database changes, update only this file.

// ============================================================================
// Fixture Database Shape
// ============================================================================

/// Total number of entries seeded into the fixture database
pub const FIXTURE_TOTAL_ENTRIES: i64 = 8;

/// Number of fixture entries attributed to the CAPS team
pub const FIXTURE_CAPS_ENTRIES: i64 = 3;

/// Number of fixture entries targeting Titan
pub const FIXTURE_TITAN_ENTRIES: i64 = 3;

/// Distinct teams in the fixture database, sorted
pub const FIXTURE_TEAMS: [&str; 4] = ["CAPS", "ISS", "RADAR", "UVIS"];

/// Distinct targets in the fixture database, sorted
pub const FIXTURE_TARGETS: [&str; 4] = ["Enceladus", "Iapetus", "Saturn", "Titan"];

/// Distinct SPASS types in the fixture database, sorted
pub const FIXTURE_SPASS_TYPES: [&str; 2] = ["Prime", "Rider"];

// ============================================================================
// Timing
// ============================================================================

/// Maximum time to wait for the server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between server readiness polls
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;

/// Per-request timeout for the test client
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
