//! Lenient payload decoding
//!
//! Upstream payloads are trusted for their values but not for their shape:
//! anything malformed decodes to empty/zero instead of failing the cycle.
//! Decoding never errors.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::types::{
    DailyMoodPoint, EmotionDistribution, EmotionFrequency, EmotionTrendSeries, EmotionalBalance,
    MetricKind, MetricSnapshot, SentimentTrendPoint, Summary, TrendPoint,
};

/// A decoded payload of one metric
#[derive(Debug, Clone, PartialEq)]
pub enum MetricPayload {
    Distribution(EmotionDistribution),
    DailyMood(Vec<DailyMoodPoint>),
    Trends(EmotionTrendSeries),
    Frequency(EmotionFrequency),
    Balance(EmotionalBalance),
    Sentiment(Vec<SentimentTrendPoint>),
    Summary(Summary),
}

impl MetricPayload {
    /// Store this payload in its slot of a snapshot under construction
    pub fn apply(self, snapshot: &mut MetricSnapshot) {
        match self {
            MetricPayload::Distribution(v) => snapshot.emotion_distribution = v,
            MetricPayload::DailyMood(v) => snapshot.daily_mood = v,
            MetricPayload::Trends(v) => snapshot.emotion_trends = v,
            MetricPayload::Frequency(v) => snapshot.emotion_frequency = v,
            MetricPayload::Balance(v) => snapshot.emotional_balance = v,
            MetricPayload::Sentiment(v) => snapshot.sentiment_trends = v,
            MetricPayload::Summary(v) => snapshot.summary = v,
        }
    }
}

/// Decode the JSON body of `kind`'s endpoint
pub fn decode_metric(kind: MetricKind, value: &Value) -> MetricPayload {
    match kind {
        MetricKind::EmotionDistribution => MetricPayload::Distribution(number_map(value)),
        MetricKind::DailyMood => MetricPayload::DailyMood(daily_mood(value)),
        MetricKind::EmotionTrends => MetricPayload::Trends(trends(value)),
        MetricKind::EmotionFrequency => MetricPayload::Frequency(count_map(value)),
        MetricKind::EmotionalBalance => MetricPayload::Balance(number_map(value)),
        MetricKind::SentimentTrends => MetricPayload::Sentiment(sentiment(value)),
        MetricKind::Summary => MetricPayload::Summary(summary(value)),
    }
}

fn number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

fn count(value: &Value) -> Option<u64> {
    match value.as_u64() {
        Some(n) => Some(n),
        None => number(value).filter(|n| *n >= 0.0).map(|n| n as u64),
    }
}

/// First present field among `names`
fn field<'a>(obj: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| obj.get(*name))
}

/// Normalize an ISO date (or datetime) string to "YYYY-MM-DD"
fn iso_day(value: &Value) -> Option<String> {
    let text = value.as_str()?;
    let head = text.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

fn labelled<T>(value: &Value, mut parse: impl FnMut(&Value) -> Option<T>) -> BTreeMap<String, T> {
    let Some(obj) = value.as_object() else {
        return BTreeMap::new();
    };
    obj.iter()
        .filter(|(label, _)| !label.trim().is_empty())
        .filter_map(|(label, v)| parse(v).map(|parsed| (label.clone(), parsed)))
        .collect()
}

fn number_map(value: &Value) -> BTreeMap<String, f64> {
    labelled(value, number)
}

fn count_map(value: &Value) -> BTreeMap<String, u64> {
    labelled(value, count)
}

/// Sort by date and keep the last point seen for each date
fn dedup_by_date<T>(points: Vec<T>, date: impl Fn(&T) -> &str) -> Vec<T> {
    let mut by_date: BTreeMap<String, T> = BTreeMap::new();
    for point in points {
        by_date.insert(date(&point).to_string(), point);
    }
    by_date.into_values().collect()
}

fn points<T>(value: &Value, parse: impl Fn(&Map<String, Value>) -> Option<T>) -> Vec<T> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_object().and_then(&parse))
                .collect()
        })
        .unwrap_or_default()
}

fn trends(value: &Value) -> EmotionTrendSeries {
    labelled(value, |series| {
        let parsed = points(series, |obj| {
            let date = field(obj, &["x", "date"]).and_then(iso_day)?;
            let n = field(obj, &["y", "count"]).and_then(count)?;
            Some(TrendPoint::new(date, n))
        });
        Some(dedup_by_date(parsed, |p| p.date.as_str()))
    })
}

fn sentiment(value: &Value) -> Vec<SentimentTrendPoint> {
    let parsed = points(value, |obj| {
        let date = field(obj, &["date", "x"]).and_then(iso_day)?;
        let score = field(obj, &["score", "sentiment", "y"]).and_then(number)?;
        Some(SentimentTrendPoint::new(date, score))
    });
    dedup_by_date(parsed, |p| p.date.as_str())
}

fn daily_mood(value: &Value) -> Vec<DailyMoodPoint> {
    let parsed = points(value, |obj| {
        let date = field(obj, &["date", "x"]).and_then(iso_day)?;
        let intensity = field(obj, &["intensity", "value", "y"]).and_then(number)?;
        let n = field(obj, &["count"]).and_then(count).unwrap_or(0);
        Some(DailyMoodPoint::new(date, intensity, n))
    });
    dedup_by_date(parsed, |p| p.date.as_str())
}

fn summary(value: &Value) -> Summary {
    let Some(obj) = value.as_object() else {
        return Summary::default();
    };
    Summary {
        total_entries: obj.get("total_entries").and_then(count).unwrap_or(0),
        most_common_emotion: obj
            .get("most_common_emotion")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        average_sentiment: obj.get("average_sentiment").and_then(number),
        days_tracked: obj.get("days_tracked").and_then(count).unwrap_or(0),
    }
}

// =============================================================================
// TESTS
// =============================================================================
