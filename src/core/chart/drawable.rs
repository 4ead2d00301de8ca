//! Drawable chart handles and the widgets that own them
//!
//! A `Drawable` is the stateful chart object a renderer draws into. It is
//! created once and afterwards only has its data swapped, so its identity
//! (and any zoom/animation state tied to it) survives refreshes.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DRAWABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Visual form of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
    Radar,
    Heatmap,
    Cards,
}

/// One series of values aligned with the chart's labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    /// One color per value, or a single color for the whole series
    pub colors: Vec<String>,
    /// `None` marks a gap
    pub values: Vec<Option<f64>>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, colors: Vec<String>, values: Vec<Option<f64>>) -> Self {
        Self { label: label.into(), colors, values }
    }

    /// Series drawn in a single color
    pub fn solid(label: impl Into<String>, color: &str, values: Vec<Option<f64>>) -> Self {
        Self::new(label, vec![color.to_string()], values)
    }

    /// Color for the value at `index`
    pub fn color_at(&self, index: usize) -> Option<&str> {
        self.colors
            .get(index)
            .or_else(|| self.colors.first())
            .map(String::as_str)
    }
}

/// Everything a drawable shows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    /// X-axis labels, slice names or card titles
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    /// Preformatted value per label, where the chart shows text
    pub display: Vec<String>,
    /// Fixed value axis, if any
    pub scale: Option<(f64, f64)>,
}

impl ChartData {
    pub fn new(labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self { labels, datasets, ..Default::default() }
    }

    pub fn with_display(mut self, display: Vec<String>) -> Self {
        self.display = display;
        self
    }

    pub fn with_scale(mut self, min: f64, max: f64) -> Self {
        self.scale = Some((min, max));
        self
    }
}

/// A live chart object
#[derive(Debug)]
pub struct Drawable {
    id: u64,
    kind: ChartKind,
    data: ChartData,
    draw_count: u64,
}

impl Drawable {
    /// Build a new chart object and draw it once
    fn new(kind: ChartKind, data: ChartData) -> Self {
        Self {
            id: NEXT_DRAWABLE_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            data,
            draw_count: 1,
        }
    }

    /// Replace the data in place and redraw
    fn set_data(&mut self, data: ChartData) {
        self.data = data;
        self.draw_count += 1;
    }

    /// Identity of the underlying chart object
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    /// Number of draw calls made on this object
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }
}

/// One on-screen chart slot
#[derive(Debug)]
pub struct Widget {
    element_id: &'static str,
    title: &'static str,
    kind: ChartKind,
    empty_text: &'static str,
    mounted: bool,
    drawable: Option<Drawable>,
    empty_message: Option<String>,
}

impl Widget {
    pub fn new(
        element_id: &'static str,
        title: &'static str,
        kind: ChartKind,
        empty_text: &'static str,
    ) -> Self {
        Self {
            element_id,
            title,
            kind,
            empty_text,
            mounted: false,
            drawable: None,
            empty_message: None,
        }
    }

    /// First render of the widget
    pub(crate) fn mount(&mut self, data: Option<ChartData>) {
        if self.mounted {
            tracing::debug!(widget = self.element_id, "widget already mounted, updating instead");
        }
        self.mounted = true;
        self.refresh(data);
    }

    /// Re-render with new data, reusing the existing drawable
    pub(crate) fn refresh(&mut self, data: Option<ChartData>) {
        match data {
            None => {
                self.empty_message = Some(self.empty_text.to_string());
            }
            Some(data) => {
                self.empty_message = None;
                match self.drawable.as_mut() {
                    Some(drawable) => drawable.set_data(data),
                    None => self.drawable = Some(Drawable::new(self.kind, data)),
                }
            }
        }
    }

    pub fn element_id(&self) -> &'static str {
        self.element_id
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Read-only view of the chart object, once one has been drawn
    pub fn drawable(&self) -> Option<&Drawable> {
        self.drawable.as_ref()
    }

    /// Empty-state text currently shown instead of the chart
    pub fn empty_message(&self) -> Option<&str> {
        self.empty_message.as_deref()
    }

    /// Data currently on screen; `None` while the empty state is shown
    pub fn visible_data(&self) -> Option<&ChartData> {
        if self.empty_message.is_some() {
            return None;
        }
        self.drawable.as_ref().map(Drawable::data)
    }

    /// Total draw calls made for this widget
    pub fn draw_count(&self) -> u64 {
        self.drawable.as_ref().map(Drawable::draw_count).unwrap_or(0)
    }

    /// Format for terminal display
    pub fn to_terminal_string(&self, no_color: bool) -> String {
        super::text::render_widget(self, no_color)
    }
}
