//! Metric snapshot: every payload of one refresh cycle
//!
//! A snapshot is built once, never mutated field by field, and replaced
//! wholesale on the next successful cycle.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    DailyMoodPoint, EmotionDistribution, EmotionFrequency, EmotionTrendSeries,
    EmotionalBalance, SentimentTrendPoint, Summary,
};

/// The complete set of metric payloads for one refresh cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    /// Lookback window every payload was aggregated over
    pub range_days: u32,
    /// Refresh cycle that produced this snapshot
    pub generation: u64,
    /// When the cycle completed
    pub fetched_at: DateTime<Utc>,
    pub emotion_distribution: EmotionDistribution,
    pub daily_mood: Vec<DailyMoodPoint>,
    pub emotion_trends: EmotionTrendSeries,
    pub emotion_frequency: EmotionFrequency,
    pub emotional_balance: EmotionalBalance,
    pub sentiment_trends: Vec<SentimentTrendPoint>,
    pub summary: Summary,
}

impl MetricSnapshot {
    /// Every date carried by the time-series payloads
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.daily_mood
            .iter()
            .map(|p| p.date.as_str())
            .chain(self.sentiment_trends.iter().map(|p| p.date.as_str()))
            .chain(
                self.emotion_trends
                    .values()
                    .flat_map(|series| series.iter().map(|p| p.date.as_str())),
            )
    }

    /// True when every dated point lies in `[today - range_days, today]`
    pub fn is_within_window(&self, today: NaiveDate) -> bool {
        let window = DateWindow::ending(today, self.range_days);
        self.dates().all(|d| window.contains_str(d))
    }

    /// True when no metric carries any data
    pub fn is_empty(&self) -> bool {
        self.emotion_distribution.is_empty()
            && self.daily_mood.is_empty()
            && self.emotion_trends.is_empty()
            && self.emotion_frequency.is_empty()
            && self.emotional_balance.is_empty()
            && self.sentiment_trends.is_empty()
            && self.summary.total_entries == 0
    }
}

/// Inclusive calendar-day window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window of `days` days ending on (and including) `today`.
    /// Saturates at the earliest representable date.
    pub fn ending(today: NaiveDate, days: u32) -> Self {
        Self {
            start: today
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Parse an ISO day string and test it; unparseable dates are outside
    pub fn contains_str(&self, date: &str) -> bool {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(|d| self.contains(d))
            .unwrap_or(false)
    }
}
