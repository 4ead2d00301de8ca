//! Chart registry: one renderer per metric

use tracing::debug;

use super::{
    BarRenderer, CalendarHeatmapRenderer, ChartRenderer, MultiSeriesLineRenderer, PieRenderer,
    RadarRenderer, SingleSeriesLineRenderer, SummaryCardsRenderer, Widget,
};
use crate::types::{MetricKind, MetricSnapshot};

/// Owns every renderer on the dashboard
pub struct ChartRegistry {
    renderers: Vec<Box<dyn ChartRenderer>>,
}

impl Default for ChartRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ChartRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.renderers.iter().map(|r| r.widget().element_id()))
            .finish()
    }
}

impl ChartRegistry {
    /// Registry without renderers
    pub fn empty() -> Self {
        Self { renderers: Vec::new() }
    }

    /// The dashboard layout: summary cards and six charts
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(SummaryCardsRenderer::new()));
        registry.register(Box::new(PieRenderer::new()));
        registry.register(Box::new(BarRenderer::new()));
        registry.register(Box::new(MultiSeriesLineRenderer::new()));
        registry.register(Box::new(RadarRenderer::new()));
        registry.register(Box::new(SingleSeriesLineRenderer::new()));
        registry.register(Box::new(CalendarHeatmapRenderer::new()));
        registry
    }

    /// Add a renderer, replacing any registered for the same metric
    pub fn register(&mut self, renderer: Box<dyn ChartRenderer>) {
        let kind = renderer.kind();
        self.renderers.retain(|r| r.kind() != kind);
        self.renderers.push(renderer);
    }

    /// Draw the snapshot everywhere: create on first use, update after
    pub fn render_all(&mut self, snapshot: &MetricSnapshot) {
        for renderer in &mut self.renderers {
            if renderer.is_created() {
                renderer.update(snapshot);
            } else {
                debug!(widget = renderer.widget().element_id(), "creating widget");
                renderer.create(snapshot);
            }
        }
    }

    pub fn get(&self, kind: MetricKind) -> Option<&dyn ChartRenderer> {
        self.renderers
            .iter()
            .find(|r| r.kind() == kind)
            .map(|r| &**r)
    }

    pub fn widget(&self, kind: MetricKind) -> Option<&Widget> {
        self.get(kind).map(|r| r.widget())
    }

    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.renderers.iter().map(|r| r.widget())
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// True once every widget has had its first render
    pub fn all_created(&self) -> bool {
        self.renderers.iter().all(|r| r.is_created())
    }

    /// Format every widget for terminal display
    pub fn to_terminal_string(&self, no_color: bool) -> String {
        self.widgets()
            .map(|w| w.to_terminal_string(no_color))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
