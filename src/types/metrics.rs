//! Metric kinds and their payload shapes
//!
//! Payloads mirror the JSON the analytics endpoints return. Dates are ISO
//! calendar-day strings ("2024-03-01") so ascending order is plain string
//! order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::ANALYTICS_PREFIX;

/// The seven metrics that make up one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    EmotionDistribution,
    DailyMood,
    EmotionTrends,
    EmotionFrequency,
    EmotionalBalance,
    SentimentTrends,
    Summary,
}

impl MetricKind {
    /// All kinds, in fetch order
    pub const ALL: [MetricKind; 7] = [
        MetricKind::EmotionDistribution,
        MetricKind::DailyMood,
        MetricKind::EmotionTrends,
        MetricKind::EmotionFrequency,
        MetricKind::EmotionalBalance,
        MetricKind::SentimentTrends,
        MetricKind::Summary,
    ];

    /// Snake-case name used in snapshots and logs
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::EmotionDistribution => "emotion_distribution",
            MetricKind::DailyMood => "daily_mood",
            MetricKind::EmotionTrends => "emotion_trends",
            MetricKind::EmotionFrequency => "emotion_frequency",
            MetricKind::EmotionalBalance => "emotional_balance",
            MetricKind::SentimentTrends => "sentiment_trends",
            MetricKind::Summary => "summary",
        }
    }

    /// URL segment of the endpoint serving this metric
    pub fn slug(&self) -> &'static str {
        match self {
            MetricKind::EmotionDistribution => "emotion-distribution",
            MetricKind::DailyMood => "daily-mood",
            MetricKind::EmotionTrends => "emotion-trends",
            MetricKind::EmotionFrequency => "emotion-frequency",
            MetricKind::EmotionalBalance => "emotional-balance",
            MetricKind::SentimentTrends => "sentiment-trends",
            MetricKind::Summary => "summary",
        }
    }

    /// Resolve a URL segment back to its metric
    pub fn from_slug(slug: &str) -> Option<MetricKind> {
        MetricKind::ALL.into_iter().find(|k| k.slug() == slug)
    }

    /// Fixed endpoint path, without query string
    pub fn endpoint(&self) -> String {
        format!("{}/{}", ANALYTICS_PREFIX, self.slug())
    }

    /// Whether the payload is dated and subject to the window invariant
    pub fn is_time_series(&self) -> bool {
        matches!(
            self,
            MetricKind::DailyMood | MetricKind::EmotionTrends | MetricKind::SentimentTrends
        )
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Emotion label -> percentage (0-100)
pub type EmotionDistribution = BTreeMap<String, f64>;

/// Emotion label -> occurrence count
pub type EmotionFrequency = BTreeMap<String, u64>;

/// Emotion label -> ascending per-day counts
pub type EmotionTrendSeries = BTreeMap<String, Vec<TrendPoint>>;

/// Balance dimension -> normalized score in [0, 1]
pub type EmotionalBalance = BTreeMap<String, f64>;

/// One (date, count) point of an emotion trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(rename = "x")]
    pub date: String,
    #[serde(rename = "y")]
    pub count: u64,
}

impl TrendPoint {
    pub fn new(date: impl Into<String>, count: u64) -> Self {
        Self { date: date.into(), count }
    }
}

/// Average sentiment for one day, in [-1, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentTrendPoint {
    #[serde(alias = "x")]
    pub date: String,
    #[serde(alias = "y", alias = "sentiment")]
    pub score: f64,
}

impl SentimentTrendPoint {
    pub fn new(date: impl Into<String>, score: f64) -> Self {
        Self { date: date.into(), score }
    }
}

/// Mood intensity for one day with any activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMoodPoint {
    pub date: String,
    #[serde(alias = "value")]
    pub intensity: f64,
    #[serde(default)]
    pub count: u64,
}

impl DailyMoodPoint {
    pub fn new(date: impl Into<String>, intensity: f64, count: u64) -> Self {
        Self { date: date.into(), intensity, count }
    }
}

/// Headline numbers for the summary cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub total_entries: u64,
    #[serde(default)]
    pub most_common_emotion: Option<String>,
    #[serde(default)]
    pub average_sentiment: Option<f64>,
    #[serde(default)]
    pub days_tracked: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_live_under_analytics_prefix() {
        assert_eq!(MetricKind::EmotionTrends.endpoint(), "/api/analytics/emotion-trends");
        assert_eq!(MetricKind::Summary.endpoint(), "/api/analytics/summary");
    }

    #[test]
    fn test_slug_lookup() {
        for kind in MetricKind::ALL {
            assert_eq!(MetricKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(MetricKind::from_slug("nope"), None);
    }

    #[test]
    fn test_sentiment_point_accepts_aliases() {
        let a: SentimentTrendPoint = serde_json::from_str(r#"{"x":"2024-01-01","y":0.5}"#).unwrap();
        let b: SentimentTrendPoint =
            serde_json::from_str(r#"{"date":"2024-01-01","sentiment":0.5}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_trend_point_wire_format() {
        let json = serde_json::to_string(&TrendPoint::new("2024-01-01", 3)).unwrap();
        assert_eq!(json, r#"{"x":"2024-01-01","y":3}"#);
    }
}
