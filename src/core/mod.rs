//! Core modules for Mindtrack

pub mod decode;
pub mod fetcher;
pub mod store;
pub mod chart;
pub mod controller;
pub mod aggregate;
pub mod snapshot;
pub mod api;

pub use decode::{decode_metric, MetricPayload};
pub use fetcher::{MetricFetcher, MetricTransport, HttpTransport, LocalTransport, clip_to_window};
pub use store::MetricStore;
pub use chart::{ChartRegistry, ChartRenderer, Widget};
pub use controller::{DashboardController, RefreshTicket, RefreshOutcome};
pub use aggregate::{AnalyticsAggregator, load_records};
pub use snapshot::{save_snapshot, load_snapshot};
pub use api::{create_router, run_server};
