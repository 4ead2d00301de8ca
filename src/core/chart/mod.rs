//! Chart renderers
//!
//! One renderer per metric, each owning exactly one widget. `create` runs
//! on the first successful load; every later refresh calls `update`, which
//! swaps data into the existing drawable instead of rebuilding it.

mod bar;
mod drawable;
mod heatmap;
mod line;
mod pie;
mod radar;
mod registry;
mod summary;
mod text;

pub use bar::BarRenderer;
pub use drawable::{ChartData, ChartKind, Dataset, Drawable, Widget};
pub use heatmap::CalendarHeatmapRenderer;
pub use line::{MultiSeriesLineRenderer, SingleSeriesLineRenderer};
pub use pie::PieRenderer;
pub use radar::RadarRenderer;
pub use registry::ChartRegistry;
pub use summary::SummaryCardsRenderer;

use crate::types::{MetricKind, MetricSnapshot};

/// Accent color for single-series charts
pub const ACCENT_COLOR: &str = "#007bff";

/// Capability set shared by every chart renderer
pub trait ChartRenderer: Send {
    /// Metric this renderer draws
    fn kind(&self) -> MetricKind;

    fn widget(&self) -> &Widget;

    fn widget_mut(&mut self) -> &mut Widget;

    /// Shape the snapshot into chart data; `None` when there is nothing to draw
    fn build(&self, snapshot: &MetricSnapshot) -> Option<ChartData>;

    /// First render of the widget
    fn create(&mut self, snapshot: &MetricSnapshot) {
        let data = self.build(snapshot);
        self.widget_mut().mount(data);
    }

    /// Re-render in place with new data
    fn update(&mut self, snapshot: &MetricSnapshot) {
        let data = self.build(snapshot);
        self.widget_mut().refresh(data);
    }

    fn is_created(&self) -> bool {
        self.widget().is_mounted()
    }
}

/// Labels and colors for a label-keyed map, in key order
fn labelled_series<'a, I>(entries: I) -> (Vec<String>, Vec<String>, Vec<Option<f64>>)
where
    I: IntoIterator<Item = (&'a String, f64)>,
{
    let mut labels = Vec::new();
    let mut colors = Vec::new();
    let mut values = Vec::new();
    for (label, value) in entries {
        labels.push(crate::types::display_label(label));
        colors.push(crate::types::label_color(label).to_string());
        values.push(Some(value));
    }
    (labels, colors, values)
}
