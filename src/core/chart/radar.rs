//! Emotional balance radar chart

use super::{ChartData, ChartKind, ChartRenderer, Dataset, Widget, ACCENT_COLOR};
use crate::types::{display_label, MetricKind, MetricSnapshot};

#[derive(Debug)]
pub struct RadarRenderer {
    widget: Widget,
}

impl Default for RadarRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RadarRenderer {
    pub fn new() -> Self {
        Self {
            widget: Widget::new(
                "emotionalBalanceChart",
                "Emotional Balance",
                ChartKind::Radar,
                "No balance data for this period",
            ),
        }
    }
}

impl ChartRenderer for RadarRenderer {
    fn kind(&self) -> MetricKind {
        MetricKind::EmotionalBalance
    }

    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    fn build(&self, snapshot: &MetricSnapshot) -> Option<ChartData> {
        let balance = &snapshot.emotional_balance;
        if balance.is_empty() {
            return None;
        }

        let labels = balance.keys().map(|k| display_label(k)).collect();
        let values = balance.values().map(|v| Some(*v)).collect();
        let display = balance.values().map(|v| format!("{:.2}", v)).collect();

        Some(
            ChartData::new(labels, vec![Dataset::solid("Balance", ACCENT_COLOR, values)])
                .with_display(display)
                .with_scale(0.0, 1.0),
        )
    }
}
