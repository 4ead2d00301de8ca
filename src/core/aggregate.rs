//! Analytics aggregation over classified emotion records
//!
//! This is the upstream collaborator the dashboard fetches from: it turns
//! a user's time-stamped, emotion-labeled records into the seven metric
//! payloads for a lookback window.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use crate::types::{
    DailyMoodPoint, DateWindow, Emotion, EmotionDistribution, EmotionFrequency, EmotionRecord,
    EmotionTrendSeries, EmotionalBalance, MetricKind, MetricSnapshot, Polarity, RecordError,
    SentimentTrendPoint, Summary, TrendPoint,
};
use crate::DEFAULT_INTENSITY;

/// Label reported when there is nothing to count
pub const NO_EMOTION: &str = "none";

/// Computes metric payloads from a set of records
#[derive(Debug, Clone, Default)]
pub struct AnalyticsAggregator {
    records: Vec<EmotionRecord>,
}

impl AnalyticsAggregator {
    pub fn new(records: Vec<EmotionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EmotionRecord] {
        &self.records
    }

    /// Records whose day falls in the `days` window ending today, not after `now`
    fn window(&self, days: u32, now: DateTime<Utc>) -> impl Iterator<Item = &EmotionRecord> {
        let window = DateWindow::ending(now.date_naive(), days);
        self.records
            .iter()
            .filter(move |r| window.contains(r.day()) && r.timestamp <= now)
    }

    fn counts(&self, days: u32, now: DateTime<Utc>) -> BTreeMap<String, u64> {
        let mut counts = BTreeMap::new();
        for record in self.window(days, now) {
            *counts.entry(record.emotion.to_lowercase()).or_insert(0) += 1;
        }
        counts
    }

    /// Share of each label, in percent
    pub fn emotion_distribution(&self, days: u32, now: DateTime<Utc>) -> EmotionDistribution {
        let counts = self.counts(days, now);
        let total: u64 = counts.values().sum();
        if total == 0 {
            return BTreeMap::new();
        }
        counts
            .into_iter()
            .map(|(label, n)| (label, n as f64 / total as f64 * 100.0))
            .collect()
    }

    /// Occurrences of each label
    pub fn emotion_frequency(&self, days: u32, now: DateTime<Utc>) -> EmotionFrequency {
        self.counts(days, now)
    }

    /// Per label, counts for each day the label occurs
    pub fn emotion_trends(&self, days: u32, now: DateTime<Utc>) -> EmotionTrendSeries {
        let mut by_label: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
        for record in self.window(days, now) {
            *by_label
                .entry(record.emotion.to_lowercase())
                .or_default()
                .entry(record.day_key())
                .or_insert(0) += 1;
        }
        by_label
            .into_iter()
            .map(|(label, per_day)| {
                let points = per_day.into_iter().map(|(d, n)| TrendPoint::new(d, n)).collect();
                (label, points)
            })
            .collect()
    }

    /// Mean intensity per polarity dimension; 0 when a dimension is unseen
    pub fn emotional_balance(&self, days: u32, now: DateTime<Utc>) -> EmotionalBalance {
        let window: Vec<&EmotionRecord> = self.window(days, now).collect();
        if window.is_empty() {
            return BTreeMap::new();
        }

        let mut sums: HashMap<Polarity, (f64, u32)> = HashMap::new();
        for record in &window {
            let Some(emotion) = Emotion::from_label(&record.emotion) else {
                continue;
            };
            let entry = sums.entry(emotion.polarity()).or_insert((0.0, 0));
            entry.0 += record.intensity.unwrap_or(DEFAULT_INTENSITY);
            entry.1 += 1;
        }

        Polarity::ALL
            .iter()
            .map(|p| {
                let score = match sums.get(p) {
                    Some((sum, n)) if *n > 0 => sum / f64::from(*n),
                    _ => 0.0,
                };
                (p.label().to_string(), score)
            })
            .collect()
    }

    /// Mean sentiment per day, skipping unscored records
    pub fn sentiment_trends(&self, days: u32, now: DateTime<Utc>) -> Vec<SentimentTrendPoint> {
        let mut per_day: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for record in self.window(days, now) {
            if let Some(score) = record.sentiment_score {
                per_day.entry(record.day_key()).or_default().push(score);
            }
        }
        per_day
            .into_iter()
            .map(|(date, scores)| SentimentTrendPoint::new(date, round_to(mean(&scores), 3)))
            .collect()
    }

    /// Mean intensity and entry count per active day
    pub fn daily_mood(&self, days: u32, now: DateTime<Utc>) -> Vec<DailyMoodPoint> {
        let mut per_day: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for record in self.window(days, now) {
            per_day
                .entry(record.day_key())
                .or_default()
                .push(record.intensity.unwrap_or(DEFAULT_INTENSITY));
        }
        per_day
            .into_iter()
            .map(|(date, values)| {
                DailyMoodPoint::new(date, round_to(mean(&values), 2), values.len() as u64)
            })
            .collect()
    }

    pub fn summary(&self, days: u32, now: DateTime<Utc>) -> Summary {
        let window: Vec<&EmotionRecord> = self.window(days, now).collect();
        let counts = self.counts(days, now);

        // Highest count wins; ties go to the alphabetically first label
        let most_common = counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(label, _)| label.clone())
            .unwrap_or_else(|| NO_EMOTION.to_string());

        let scores: Vec<f64> = window.iter().filter_map(|r| r.sentiment_score).collect();
        let days_tracked = window.iter().map(|r| r.day()).collect::<BTreeSet<_>>().len();

        Summary {
            total_entries: window.len() as u64,
            most_common_emotion: Some(most_common),
            average_sentiment: Some(if scores.is_empty() { 0.0 } else { round_to(mean(&scores), 3) }),
            days_tracked: days_tracked as u64,
        }
    }

    /// JSON body served for `kind`
    pub fn metric_json(&self, kind: MetricKind, days: u32, now: DateTime<Utc>) -> Value {
        match kind {
            MetricKind::EmotionDistribution => json!(self.emotion_distribution(days, now)),
            MetricKind::DailyMood => json!(self.daily_mood(days, now)),
            MetricKind::EmotionTrends => json!(self.emotion_trends(days, now)),
            MetricKind::EmotionFrequency => json!(self.emotion_frequency(days, now)),
            MetricKind::EmotionalBalance => json!(self.emotional_balance(days, now)),
            MetricKind::SentimentTrends => json!(self.sentiment_trends(days, now)),
            MetricKind::Summary => json!(self.summary(days, now)),
        }
    }

    /// Every metric at once, as the dashboard would assemble it
    pub fn snapshot(&self, days: u32, now: DateTime<Utc>) -> MetricSnapshot {
        MetricSnapshot {
            range_days: days,
            generation: 0,
            fetched_at: now,
            emotion_distribution: self.emotion_distribution(days, now),
            daily_mood: self.daily_mood(days, now),
            emotion_trends: self.emotion_trends(days, now),
            emotion_frequency: self.emotion_frequency(days, now),
            emotional_balance: self.emotional_balance(days, now),
            sentiment_trends: self.sentiment_trends(days, now),
            summary: self.summary(days, now),
        }
    }
}

/// Load records from a JSON array file
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<EmotionRecord>, RecordError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| RecordError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| RecordError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn sample() -> AnalyticsAggregator {
        AnalyticsAggregator::new(vec![
            EmotionRecord::new("joy", at(30, 9)).with_sentiment(0.8).with_intensity(0.9),
            EmotionRecord::new("joy", at(30, 18)).with_sentiment(0.4).with_intensity(0.7),
            EmotionRecord::new("sadness", at(29, 10)).with_sentiment(-0.6).with_intensity(0.4),
            EmotionRecord::new("neutral", at(28, 8)),
            // Outside a 7-day window
            EmotionRecord::new("anger", at(1, 8)).with_sentiment(-0.9),
        ])
    }

    #[test]
    fn test_distribution_is_percentages() {
        let dist = sample().emotion_distribution(7, now());
        assert_eq!(dist.len(), 3);
        assert!((dist["joy"] - 50.0).abs() < 1e-9);
        assert!((dist["sadness"] - 25.0).abs() < 1e-9);
        let total: f64 = dist.values().sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_excludes_old_records() {
        let freq = sample().emotion_frequency(7, now());
        assert!(!freq.contains_key("anger"));
        let freq = sample().emotion_frequency(31, now());
        assert_eq!(freq.get("anger"), Some(&1));
    }

    #[test]
    fn test_trends_group_by_day() {
        let trends = sample().emotion_trends(7, now());
        assert_eq!(trends["joy"], vec![TrendPoint::new("2024-03-30", 2)]);
        assert_eq!(trends["sadness"], vec![TrendPoint::new("2024-03-29", 1)]);
    }

    #[test]
    fn test_balance_averages_intensity_per_polarity() {
        let balance = sample().emotional_balance(7, now());
        assert!((balance["Positive"] - 0.8).abs() < 1e-9);
        assert!((balance["Negative"] - 0.4).abs() < 1e-9);
        // Unscored intensity counts as the default
        assert!((balance["Neutral"] - DEFAULT_INTENSITY).abs() < 1e-9);
    }

    #[test]
    fn test_balance_zero_for_missing_polarity() {
        let agg = AnalyticsAggregator::new(vec![EmotionRecord::new("joy", at(30, 9))]);
        let balance = agg.emotional_balance(7, now());
        assert_eq!(balance["Negative"], 0.0);
    }

    #[test]
    fn test_sentiment_trend_skips_unscored() {
        let trend = sample().sentiment_trends(7, now());
        assert_eq!(
            trend,
            vec![
                SentimentTrendPoint::new("2024-03-29", -0.6),
                SentimentTrendPoint::new("2024-03-30", 0.6),
            ]
        );
    }

    #[test]
    fn test_daily_mood_counts_entries() {
        let mood = sample().daily_mood(7, now());
        assert_eq!(
            mood,
            vec![
                DailyMoodPoint::new("2024-03-28", 0.5, 1),
                DailyMoodPoint::new("2024-03-29", 0.4, 1),
                DailyMoodPoint::new("2024-03-30", 0.8, 2),
            ]
        );
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary(7, now());
        assert_eq!(summary.total_entries, 4);
        assert_eq!(summary.most_common_emotion.as_deref(), Some("joy"));
        assert_eq!(summary.average_sentiment, Some(0.2));
        assert_eq!(summary.days_tracked, 3);
    }

    #[test]
    fn test_empty_summary() {
        let summary = AnalyticsAggregator::default().summary(30, now());
        assert_eq!(summary.total_entries, 0);
        assert_eq!(summary.most_common_emotion.as_deref(), Some(NO_EMOTION));
        assert_eq!(summary.average_sentiment, Some(0.0));
        assert_eq!(summary.days_tracked, 0);
    }

    #[test]
    fn test_window_is_whole_calendar_days() {
        // 03-24 early morning is more than 7*24h before `now` but on the first day
        let agg = AnalyticsAggregator::new(vec![
            EmotionRecord::new("fear", at(24, 1)),
            EmotionRecord::new("anger", at(23, 23)),
        ]);
        let freq = agg.emotion_frequency(7, now());
        assert_eq!(freq.get("fear"), Some(&1));
        assert!(!freq.contains_key("anger"));
    }

    #[test]
    fn test_huge_range_does_not_overflow() {
        let summary = sample().summary(u32::MAX, now());
        assert_eq!(summary.total_entries, 5);
    }

    #[test]
    fn test_snapshot_stays_in_window() {
        let snapshot = sample().snapshot(7, now());
        assert!(snapshot.is_within_window(now().date_naive()));
    }
}
