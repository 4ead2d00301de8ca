//! Classified emotion records, the input of the aggregation service

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One classifier verdict on a chat message or journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionRecord {
    /// Lower-case emotion label
    pub emotion: String,
    /// Classifier confidence (0.0-1.0)
    #[serde(default)]
    pub confidence: f64,
    /// Polarity in [-1, 1], if scored
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    /// Intensity in [0, 1], if scored
    #[serde(default)]
    pub intensity: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl EmotionRecord {
    pub fn new(emotion: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            emotion: emotion.to_lowercase(),
            confidence: 1.0,
            sentiment_score: None,
            intensity: None,
            timestamp,
        }
    }

    pub fn with_sentiment(mut self, score: f64) -> Self {
        self.sentiment_score = Some(score);
        self
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = Some(intensity);
        self
    }

    /// Calendar day of the record in UTC
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// ISO day string used as the series key
    pub fn day_key(&self) -> String {
        self.day().format("%Y-%m-%d").to_string()
    }
}
