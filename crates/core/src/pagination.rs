//! Pagination constants and helpers.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API layer and any future CLI or worker tooling.

/// Default number of characters returned per list page.
pub const DEFAULT_PAGE_LIMIT: i32 = 10;

/// Maximum number of characters returned per list page.
pub const MAX_PAGE_LIMIT: i32 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i32>, default: i32, max: i32) -> i32 {
    limit.unwrap_or(default).max(1).min(max)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
