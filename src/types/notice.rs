//! Transient user-visible notices

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use crate::NOTICE_TTL_SECS;

/// A dismissible message surfaced when a refresh fails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Utc>,
    /// Lifetime in seconds before auto-dismissal
    pub ttl_secs: i64,
}

impl Notice {
    /// Raise a notice now with the standard lifetime
    pub fn new(message: impl Into<String>) -> Self {
        Self::raised_at(message, Utc::now())
    }

    pub fn raised_at(message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            raised_at: at,
            ttl_secs: NOTICE_TTL_SECS,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.raised_at + Duration::seconds(self.ttl_secs)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    /// Format for terminal display
    pub fn to_terminal_string(&self, no_color: bool) -> String {
        if no_color {
            format!("! {}", self.message)
        } else {
            format!("\x1b[31m⚠ {}\x1b[0m", self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires_after_ttl() {
        let at = Utc::now();
        let notice = Notice::raised_at("boom", at);
        assert!(!notice.is_expired(at));
        assert!(!notice.is_expired(at + Duration::seconds(NOTICE_TTL_SECS - 1)));
        assert!(notice.is_expired(at + Duration::seconds(NOTICE_TTL_SECS)));
    }
}
