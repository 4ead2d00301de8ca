//! Emotion distribution pie chart

use super::{labelled_series, ChartData, ChartKind, ChartRenderer, Dataset, Widget};
use crate::types::{MetricKind, MetricSnapshot};

#[derive(Debug)]
pub struct PieRenderer {
    widget: Widget,
}

impl Default for PieRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PieRenderer {
    pub fn new() -> Self {
        Self {
            widget: Widget::new(
                "emotionDistributionChart",
                "Emotion Distribution",
                ChartKind::Pie,
                "No emotion data for this period",
            ),
        }
    }
}

impl ChartRenderer for PieRenderer {
    fn kind(&self) -> MetricKind {
        MetricKind::EmotionDistribution
    }

    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    fn build(&self, snapshot: &MetricSnapshot) -> Option<ChartData> {
        let distribution = &snapshot.emotion_distribution;
        if distribution.is_empty() {
            return None;
        }

        let (labels, colors, values) =
            labelled_series(distribution.iter().map(|(label, pct)| (label, *pct)));
        let display = distribution.values().map(|pct| format!("{:.1}%", pct)).collect();

        Some(
            ChartData::new(labels, vec![Dataset::new("Distribution", colors, values)])
                .with_display(display),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_labels_title_cased_with_palette_colors() {
        let mut snapshot = MetricSnapshot::default();
        snapshot.emotion_distribution.insert("joy".to_string(), 60.0);
        snapshot.emotion_distribution.insert("sadness".to_string(), 40.0);

        let mut renderer = PieRenderer::new();
        renderer.create(&snapshot);

        let data = renderer.widget().visible_data().unwrap();
        assert_eq!(data.labels, vec!["Joy", "Sadness"]);
        assert_eq!(data.datasets[0].colors, vec!["#28a745", "#6c757d"]);
        assert_eq!(data.datasets[0].values, vec![Some(60.0), Some(40.0)]);
    }

    #[test]
    fn test_percentages_are_not_renormalized() {
        let mut snapshot = MetricSnapshot::default();
        snapshot.emotion_distribution.insert("anger".to_string(), 10.0);
        snapshot.emotion_distribution.insert("fear".to_string(), 20.0);

        let renderer = PieRenderer::new();
        let data = renderer.build(&snapshot).unwrap();
        assert_eq!(data.datasets[0].values, vec![Some(10.0), Some(20.0)]);
        assert_eq!(data.display, vec!["10.0%", "20.0%"]);
    }
}
