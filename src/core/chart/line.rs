//! Line charts: per-emotion trends and the sentiment trend

use std::collections::{BTreeSet, HashMap};

use super::{ChartData, ChartKind, ChartRenderer, Dataset, Widget, ACCENT_COLOR};
use crate::types::{display_label, label_color, MetricKind, MetricSnapshot};

/// One line per emotion over the union of trend dates
#[derive(Debug)]
pub struct MultiSeriesLineRenderer {
    widget: Widget,
}

impl Default for MultiSeriesLineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiSeriesLineRenderer {
    pub fn new() -> Self {
        Self {
            widget: Widget::new(
                "emotionTrendsChart",
                "Emotion Trends",
                ChartKind::Line,
                "No emotion trends for this period",
            ),
        }
    }
}

impl ChartRenderer for MultiSeriesLineRenderer {
    fn kind(&self) -> MetricKind {
        MetricKind::EmotionTrends
    }

    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    fn build(&self, snapshot: &MetricSnapshot) -> Option<ChartData> {
        let trends = &snapshot.emotion_trends;
        let dates: BTreeSet<&str> = trends
            .values()
            .flat_map(|series| series.iter().map(|p| p.date.as_str()))
            .collect();
        if dates.is_empty() {
            return None;
        }

        let datasets = trends
            .iter()
            .filter(|(_, series)| !series.is_empty())
            .map(|(label, series)| {
                let by_date: HashMap<&str, u64> =
                    series.iter().map(|p| (p.date.as_str(), p.count)).collect();
                let values = dates
                    .iter()
                    .map(|d| by_date.get(d).map(|n| *n as f64))
                    .collect();
                Dataset::solid(display_label(label), label_color(label), values)
            })
            .collect();

        Some(ChartData::new(
            dates.into_iter().map(str::to_string).collect(),
            datasets,
        ))
    }
}

/// Average sentiment per day on a fixed [-1, 1] axis
#[derive(Debug)]
pub struct SingleSeriesLineRenderer {
    widget: Widget,
}

impl Default for SingleSeriesLineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleSeriesLineRenderer {
    pub fn new() -> Self {
        Self {
            widget: Widget::new(
                "sentimentTrendsChart",
                "Sentiment Trend",
                ChartKind::Line,
                "No sentiment data for this period",
            ),
        }
    }
}

impl ChartRenderer for SingleSeriesLineRenderer {
    fn kind(&self) -> MetricKind {
        MetricKind::SentimentTrends
    }

    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    fn build(&self, snapshot: &MetricSnapshot) -> Option<ChartData> {
        let points = &snapshot.sentiment_trends;
        if points.is_empty() {
            return None;
        }

        let labels = points.iter().map(|p| p.date.clone()).collect();
        let values = points.iter().map(|p| Some(p.score)).collect();
        let display = points.iter().map(|p| format!("{:+.2}", p.score)).collect();

        Some(
            ChartData::new(labels, vec![Dataset::solid("Sentiment", ACCENT_COLOR, values)])
                .with_display(display)
                .with_scale(-1.0, 1.0),
        )
    }
}
