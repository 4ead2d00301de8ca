//! Daily mood calendar heatmap

use super::{ChartData, ChartKind, ChartRenderer, Dataset, Widget};
use crate::types::{MetricKind, MetricSnapshot};

/// Cell color of the heatmap (intensity is carried by shading)
const HEATMAP_COLOR: &str = "#28a745";

#[derive(Debug)]
pub struct CalendarHeatmapRenderer {
    widget: Widget,
}

impl Default for CalendarHeatmapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarHeatmapRenderer {
    pub fn new() -> Self {
        Self {
            widget: Widget::new(
                "moodHeatmap",
                "Daily Mood",
                ChartKind::Heatmap,
                "No mood data available for the selected period",
            ),
        }
    }
}

impl ChartRenderer for CalendarHeatmapRenderer {
    fn kind(&self) -> MetricKind {
        MetricKind::DailyMood
    }

    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    fn build(&self, snapshot: &MetricSnapshot) -> Option<ChartData> {
        let days = &snapshot.daily_mood;
        if days.is_empty() {
            return None;
        }

        let labels = days.iter().map(|p| p.date.clone()).collect();
        let intensity = days.iter().map(|p| Some(p.intensity)).collect();
        let counts = days.iter().map(|p| Some(p.count as f64)).collect();
        let display = days
            .iter()
            .map(|p| format!("{}: {:.2} ({} entries)", p.date, p.intensity, p.count))
            .collect();

        Some(
            ChartData::new(
                labels,
                vec![
                    Dataset::solid("Intensity", HEATMAP_COLOR, intensity),
                    Dataset::solid("Entries", HEATMAP_COLOR, counts),
                ],
            )
            .with_display(display)
            .with_scale(0.0, 1.0),
        )
    }
}
