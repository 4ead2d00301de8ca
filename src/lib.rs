//! Mindtrack: emotion analytics dashboard
//!
//! Fetches the seven analytics metrics for a lookback window, swaps them
//! into a store as one snapshot and keeps a registry of chart widgets in
//! sync with it. Also ships the aggregation collaborator that serves those
//! metrics over HTTP.

pub mod core;
pub mod types;

// =============================================================================
// RANGE
// =============================================================================

/// Lookback window used when no range is selected
pub const DEFAULT_RANGE_DAYS: u32 = 30;

/// Ranges offered by the dashboard range selector
pub const RANGE_CHOICES: [u32; 4] = [7, 30, 90, 365];

/// Longest lookback accepted anywhere (about a century)
pub const MAX_RANGE_DAYS: u32 = 36_500;

// =============================================================================
// API
// =============================================================================

/// Namespace every analytics endpoint lives under
pub const ANALYTICS_PREFIX: &str = "/api/analytics";

/// Per-request timeout for the HTTP transport (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// UI
// =============================================================================

/// How long an error notice stays up before auto-dismissal (seconds)
pub const NOTICE_TTL_SECS: i64 = 5;

/// Fallback color for labels outside the emotion palette
pub const DEFAULT_LABEL_COLOR: &str = "#adb5bd";

/// Intensity assumed for records the classifier left unscored
pub const DEFAULT_INTENSITY: f64 = 0.5;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
