//! Dashboard state definitions

use serde::{Deserialize, Serialize};

/// The four states of the dashboard controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashboardState {
    /// Nothing requested yet
    Idle,
    /// A refresh cycle is in flight
    Loading,
    /// Charts show the latest snapshot
    Ready,
    /// Last cycle failed; charts still show the previous snapshot
    Error,
}

impl DashboardState {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            DashboardState::Idle => "\x1b[90m",    // Gray
            DashboardState::Loading => "\x1b[33m", // Yellow
            DashboardState::Ready => "\x1b[32m",   // Green
            DashboardState::Error => "\x1b[31m",   // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            DashboardState::Idle => "⏳",
            DashboardState::Loading => "🔄",
            DashboardState::Ready => "📊",
            DashboardState::Error => "⚠",
        }
    }
}

impl std::fmt::Display for DashboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DashboardState::Idle => "IDLE",
            DashboardState::Loading => "LOADING",
            DashboardState::Ready => "READY",
            DashboardState::Error => "ERROR",
        };
        write!(f, "{}", name)
    }
}
