//! Centralized default constants for the vocab backend.
//!
//! All crates reference these constants instead of defining their own magic
//! numbers. Organized by domain area.

// =============================================================================
// SETTINGS
// =============================================================================

/// Target language used when the settings row is first created.
pub const TARGET_LANGUAGE: &str = "es";

/// Minimum word length used when the settings row is first created.
pub const MIN_WORD_LENGTH: i32 = 3;

/// Smallest accepted `min_word_length` setting.
pub const MIN_WORD_LENGTH_LOWER: i32 = 2;

/// Largest accepted `min_word_length` setting.
pub const MIN_WORD_LENGTH_UPPER: i32 = 10;

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for the word list.
pub const PAGE_LIMIT: i64 = 10;

/// Largest page size a caller may request (the extension's export pulls 1000).
pub const PAGE_LIMIT_MAX: i64 = 1000;

/// Default number of entries returned by the recent-words view.
pub const RECENT_LIMIT: i64 = 10;

// =============================================================================
// STATISTICS
// =============================================================================

/// Default number of trailing days in the progress series.
pub const PROGRESS_DAYS: u32 = 7;

/// Largest progress window a caller may request.
pub const PROGRESS_DAYS_MAX: u32 = 90;

/// Breakdown bucket for entries without a part of speech.
pub const OTHER_CATEGORY: &str = "Other";

// =============================================================================
// TRANSLATION
// =============================================================================

/// Upper bound on a single translator call, in milliseconds.
pub const TRANSLATE_TIMEOUT_MS: u64 = 2000;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default bind address.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default maximum number of pooled database connections.
pub const DB_MAX_CONNECTIONS: u32 = 10;

/// Seconds a request waits for a pooled connection.
pub const DB_ACQUIRE_TIMEOUT_SECS: u64 = 30;
