//! Core types for Mindtrack

mod emotion;
mod error;
mod metrics;
mod notice;
mod record;
mod snapshot;
mod state;

pub use emotion::{Emotion, Polarity, display_label, label_color};
pub use error::{FetchError, SnapshotError, RecordError};
pub use metrics::{
    MetricKind, EmotionDistribution, EmotionFrequency, EmotionTrendSeries, EmotionalBalance,
    TrendPoint, SentimentTrendPoint, DailyMoodPoint, Summary,
};
pub use notice::Notice;
pub use record::EmotionRecord;
pub use snapshot::{MetricSnapshot, DateWindow};
pub use state::DashboardState;
