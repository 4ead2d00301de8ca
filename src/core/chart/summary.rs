//! Summary cards

use super::{ChartData, ChartKind, ChartRenderer, Dataset, Widget, ACCENT_COLOR};
use crate::types::{display_label, MetricKind, MetricSnapshot, Summary};

/// Card titles, in display order
pub const CARD_TITLES: [&str; 4] = [
    "Total Entries",
    "Most Common Emotion",
    "Average Sentiment",
    "Days Tracked",
];

#[derive(Debug)]
pub struct SummaryCardsRenderer {
    widget: Widget,
}

impl Default for SummaryCardsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryCardsRenderer {
    pub fn new() -> Self {
        Self {
            widget: Widget::new("summaryCards", "Summary", ChartKind::Cards, "No summary available"),
        }
    }

    /// Display text of the four cards
    pub fn card_text(summary: &Summary) -> [String; 4] {
        let emotion = match summary.most_common_emotion.as_deref() {
            None => "N/A".to_string(),
            Some(label) if label.eq_ignore_ascii_case("none") || label.eq_ignore_ascii_case("n/a") => {
                "N/A".to_string()
            }
            Some(label) => display_label(label),
        };
        [
            summary.total_entries.to_string(),
            emotion,
            format!("{:.2}", summary.average_sentiment.unwrap_or(0.0)),
            summary.days_tracked.to_string(),
        ]
    }
}

impl ChartRenderer for SummaryCardsRenderer {
    fn kind(&self) -> MetricKind {
        MetricKind::Summary
    }

    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    // Cards always show, zeros included
    fn build(&self, snapshot: &MetricSnapshot) -> Option<ChartData> {
        let summary = &snapshot.summary;
        let values = vec![
            Some(summary.total_entries as f64),
            None,
            Some(summary.average_sentiment.unwrap_or(0.0)),
            Some(summary.days_tracked as f64),
        ];
        Some(
            ChartData::new(
                CARD_TITLES.iter().map(|t| t.to_string()).collect(),
                vec![Dataset::solid("Summary", ACCENT_COLOR, values)],
            )
            .with_display(Self::card_text(summary).to_vec()),
        )
    }
}
