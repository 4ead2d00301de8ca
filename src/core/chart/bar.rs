//! Emotion frequency bar chart

use super::{labelled_series, ChartData, ChartKind, ChartRenderer, Dataset, Widget};
use crate::types::{MetricKind, MetricSnapshot};

#[derive(Debug)]
pub struct BarRenderer {
    widget: Widget,
}

impl Default for BarRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BarRenderer {
    pub fn new() -> Self {
        Self {
            widget: Widget::new(
                "emotionFrequencyChart",
                "Emotion Frequency",
                ChartKind::Bar,
                "No emotion data for this period",
            ),
        }
    }
}

impl ChartRenderer for BarRenderer {
    fn kind(&self) -> MetricKind {
        MetricKind::EmotionFrequency
    }

    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    fn build(&self, snapshot: &MetricSnapshot) -> Option<ChartData> {
        let frequency = &snapshot.emotion_frequency;
        if frequency.is_empty() {
            return None;
        }

        let (labels, colors, values) =
            labelled_series(frequency.iter().map(|(label, n)| (label, *n as f64)));
        let display = frequency.values().map(|n| n.to_string()).collect();

        Some(
            ChartData::new(labels, vec![Dataset::new("Occurrences", colors, values)])
                .with_display(display),
        )
    }
}
