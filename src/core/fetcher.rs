//! Metric fetcher: one concurrent, all-or-nothing request per metric
//!
//! `fetch_all` issues the seven endpoint requests together and joins them
//! fail-fast. Either every metric decodes into a fresh snapshot or the
//! cycle fails as a unit; nothing partial is ever returned.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use futures_util::try_join;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::aggregate::AnalyticsAggregator;
use crate::core::decode::{decode_metric, MetricPayload};
use crate::types::{DateWindow, FetchError, MetricKind, MetricSnapshot};
use crate::{MAX_RANGE_DAYS, REQUEST_TIMEOUT_SECS};

/// Something that can answer `GET <path>?days=<days>` with JSON
#[async_trait]
pub trait MetricTransport: Send + Sync {
    async fn get_json(&self, path: &str, days: u32) -> Result<Value, FetchError>;
}

#[async_trait]
impl<T: MetricTransport + ?Sized> MetricTransport for Box<T> {
    async fn get_json(&self, path: &str, days: u32) -> Result<Value, FetchError> {
        (**self).get_json(path, days).await
    }
}

/// Transport over HTTP against a running analytics service
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full request URL for an endpoint path and range
    pub fn request_url(&self, path: &str, days: u32) -> String {
        format!("{}{}?days={}", self.base_url, path, days)
    }
}

#[async_trait]
impl MetricTransport for HttpTransport {
    async fn get_json(&self, path: &str, days: u32) -> Result<Value, FetchError> {
        let url = self.request_url(path, days);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::network(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(path, status.as_u16()));
        }

        response.json::<Value>().await.map_err(|e| FetchError::Body {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// Transport answered in-process by an aggregator, for offline use
#[derive(Debug, Clone)]
pub struct LocalTransport {
    aggregator: Arc<AnalyticsAggregator>,
}

impl LocalTransport {
    pub fn new(aggregator: Arc<AnalyticsAggregator>) -> Self {
        Self { aggregator }
    }
}

#[async_trait]
impl MetricTransport for LocalTransport {
    async fn get_json(&self, path: &str, days: u32) -> Result<Value, FetchError> {
        let kind = MetricKind::ALL
            .into_iter()
            .find(|k| k.endpoint() == path)
            .ok_or_else(|| FetchError::status(path, 404))?;
        Ok(self.aggregator.metric_json(kind, days, Utc::now()))
    }
}

/// Fetches complete metric snapshots through a transport
#[derive(Debug)]
pub struct MetricFetcher<T> {
    transport: T,
}

impl<T: MetricTransport> MetricFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch every metric for the window ending today (UTC)
    pub async fn fetch_all(&self, range_days: u32) -> Result<MetricSnapshot, FetchError> {
        self.fetch_all_as_of(range_days, Utc::now().date_naive()).await
    }

    /// Fetch every metric for the window ending on `today`
    pub async fn fetch_all_as_of(
        &self,
        range_days: u32,
        today: NaiveDate,
    ) -> Result<MetricSnapshot, FetchError> {
        if range_days == 0 || range_days > MAX_RANGE_DAYS {
            return Err(FetchError::InvalidRange(range_days));
        }

        let (distribution, daily_mood, trends, frequency, balance, sentiment, summary) = try_join!(
            self.fetch_one(MetricKind::EmotionDistribution, range_days),
            self.fetch_one(MetricKind::DailyMood, range_days),
            self.fetch_one(MetricKind::EmotionTrends, range_days),
            self.fetch_one(MetricKind::EmotionFrequency, range_days),
            self.fetch_one(MetricKind::EmotionalBalance, range_days),
            self.fetch_one(MetricKind::SentimentTrends, range_days),
            self.fetch_one(MetricKind::Summary, range_days),
        )?;

        let mut snapshot = MetricSnapshot {
            range_days,
            fetched_at: Utc::now(),
            ..Default::default()
        };
        for payload in [distribution, daily_mood, trends, frequency, balance, sentiment, summary] {
            payload.apply(&mut snapshot);
        }

        let dropped = clip_to_window(&mut snapshot, today);
        if dropped > 0 {
            warn!(dropped, range_days, "dropped points outside the requested window");
        }
        Ok(snapshot)
    }

    async fn fetch_one(&self, kind: MetricKind, days: u32) -> Result<MetricPayload, FetchError> {
        let path = kind.endpoint();
        debug!(metric = %kind, days, "fetching metric");
        let value = self.transport.get_json(&path, days).await?;
        Ok(decode_metric(kind, &value))
    }
}

/// Remove dated points outside `[today - range_days, today]`.
/// Returns how many points were dropped.
pub fn clip_to_window(snapshot: &mut MetricSnapshot, today: NaiveDate) -> usize {
    let window = DateWindow::ending(today, snapshot.range_days);
    let mut dropped = 0;

    let before = snapshot.daily_mood.len();
    snapshot.daily_mood.retain(|p| window.contains_str(&p.date));
    dropped += before - snapshot.daily_mood.len();

    let before = snapshot.sentiment_trends.len();
    snapshot.sentiment_trends.retain(|p| window.contains_str(&p.date));
    dropped += before - snapshot.sentiment_trends.len();

    for series in snapshot.emotion_trends.values_mut() {
        let before = series.len();
        series.retain(|p| window.contains_str(&p.date));
        dropped += before - series.len();
    }
    snapshot.emotion_trends.retain(|_, series| !series.is_empty());

    dropped
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DailyMoodPoint, SentimentTrendPoint, TrendPoint};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_request_url_appends_days() {
        let transport = HttpTransport::new("http://localhost:5000/").unwrap();
        assert_eq!(
            transport.request_url("/api/analytics/summary", 7),
            "http://localhost:5000/api/analytics/summary?days=7"
        );
    }

    #[test]
    fn test_clip_drops_points_outside_window() {
        let mut snapshot = MetricSnapshot {
            range_days: 7,
            ..Default::default()
        };
        snapshot.daily_mood = vec![
            DailyMoodPoint::new("2024-02-01", 0.5, 1),
            DailyMoodPoint::new("2024-03-10", 0.5, 1),
        ];
        snapshot.sentiment_trends = vec![SentimentTrendPoint::new("2024-03-20", 0.1)];
        snapshot
            .emotion_trends
            .insert("joy".to_string(), vec![TrendPoint::new("2024-01-01", 2)]);

        let dropped = clip_to_window(&mut snapshot, day("2024-03-12"));

        assert_eq!(dropped, 3);
        assert_eq!(snapshot.daily_mood.len(), 1);
        assert!(snapshot.sentiment_trends.is_empty());
        assert!(snapshot.emotion_trends.is_empty());
        assert!(snapshot.is_within_window(day("2024-03-12")));
    }
    /// Answers every metric with an empty object
    struct EmptyTransport;

    #[async_trait]
    impl MetricTransport for EmptyTransport {
        async fn get_json(&self, _path: &str, _days: u32) -> Result<Value, FetchError> {
            Ok(Value::Object(Default::default()))
        }
    }

    #[tokio::test]
    async fn test_range_past_limit_is_rejected() {
        let fetcher = MetricFetcher::new(EmptyTransport);
        assert_eq!(
            fetcher.fetch_all(4_000_000_000).await,
            Err(FetchError::InvalidRange(4_000_000_000))
        );
        assert_eq!(
            fetcher.fetch_all(crate::MAX_RANGE_DAYS + 1).await,
            Err(FetchError::InvalidRange(crate::MAX_RANGE_DAYS + 1))
        );
        assert!(fetcher.fetch_all(crate::MAX_RANGE_DAYS).await.is_ok());
    }

    #[test]
    fn test_clip_with_huge_range_keeps_points() {
        let mut snapshot = MetricSnapshot {
            range_days: u32::MAX,
            ..Default::default()
        };
        snapshot.daily_mood = vec![DailyMoodPoint::new("1970-01-01", 0.5, 1)];
        assert_eq!(clip_to_window(&mut snapshot, day("2024-03-12")), 0);
        assert_eq!(snapshot.daily_mood.len(), 1);
    }
}
