//! Dashboard controller: refresh cycles and the dashboard state machine
//!
//! State transitions:
//! - IDLE → LOADING: mount or range change
//! - LOADING → READY: fetch succeeded, store swapped, charts rendered
//! - LOADING → ERROR: fetch failed; notice raised, charts left untouched
//! - ERROR/READY → LOADING: range re-selection or reload
//!
//! Every cycle carries a generation number. A result whose generation is
//! not the latest requested is discarded, so a slow old request can never
//! overwrite newer data.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::chart::ChartRegistry;
use crate::core::fetcher::{MetricFetcher, MetricTransport};
use crate::core::store::MetricStore;
use crate::types::{DashboardState, FetchError, MetricSnapshot, Notice};
use crate::DEFAULT_RANGE_DAYS;

/// Handle for one in-flight refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    pub generation: u64,
    pub range_days: u32,
}

/// What happened to a completed cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Snapshot stored and rendered
    Applied,
    /// Cycle failed; previous display kept
    Failed,
    /// A newer cycle was requested meanwhile; result ignored
    Discarded,
}

/// Owns the fetcher, store and chart registry of one dashboard
pub struct DashboardController<T> {
    fetcher: MetricFetcher<T>,
    store: MetricStore,
    registry: ChartRegistry,
    state: DashboardState,
    range_days: u32,
    /// Latest generation handed out
    generation: u64,
    notice: Option<Notice>,
}

impl<T: MetricTransport> DashboardController<T> {
    /// Controller with the standard chart layout
    pub fn new(transport: T) -> Self {
        Self::with_registry(transport, ChartRegistry::standard())
    }

    pub fn with_registry(transport: T, registry: ChartRegistry) -> Self {
        Self {
            fetcher: MetricFetcher::new(transport),
            store: MetricStore::new(),
            registry,
            state: DashboardState::Idle,
            range_days: DEFAULT_RANGE_DAYS,
            generation: 0,
            notice: None,
        }
    }

    /// Initial load with the default range
    pub async fn mount(&mut self) -> RefreshOutcome {
        self.refresh(self.range_days).await
    }

    /// Range selector changed
    pub async fn select_range(&mut self, range_days: u32) -> RefreshOutcome {
        self.refresh(range_days).await
    }

    /// Re-run the current range
    pub async fn reload(&mut self) -> RefreshOutcome {
        self.refresh(self.range_days).await
    }

    /// One complete cycle: begin, fetch, complete
    pub async fn refresh(&mut self, range_days: u32) -> RefreshOutcome {
        let ticket = self.begin_refresh(range_days);
        let result = self.fetcher.fetch_all(ticket.range_days).await;
        self.complete_refresh(ticket, result)
    }

    /// Enter LOADING and hand out the next generation
    pub fn begin_refresh(&mut self, range_days: u32) -> RefreshTicket {
        self.generation += 1;
        self.range_days = range_days;
        self.transition(DashboardState::Loading);
        RefreshTicket {
            generation: self.generation,
            range_days,
        }
    }

    /// Apply the result of a cycle if it is still the latest one
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<MetricSnapshot, FetchError>,
    ) -> RefreshOutcome {
        if ticket.generation != self.generation {
            info!(
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale refresh result"
            );
            return RefreshOutcome::Discarded;
        }

        match result {
            Ok(mut snapshot) => {
                snapshot.generation = ticket.generation;
                self.store.replace(snapshot);
                if let Some(current) = self.store.current() {
                    self.registry.render_all(&current);
                }
                self.notice = None;
                self.transition(DashboardState::Ready);
                RefreshOutcome::Applied
            }
            Err(err) => {
                warn!(error = %err, range_days = ticket.range_days, "refresh failed");
                self.notice = Some(Notice::new(err.notice_text()));
                self.transition(DashboardState::Error);
                RefreshOutcome::Failed
            }
        }
    }

    fn transition(&mut self, next: DashboardState) {
        if self.state != next {
            info!(from = %self.state, to = %next, generation = self.generation, "dashboard state");
            self.state = next;
        }
    }

    /// Auto-dismiss the notice once its lifetime is over
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn state(&self) -> DashboardState {
        self.state
    }

    /// Loading indicator: shown for the whole LOADING state
    pub fn is_loading(&self) -> bool {
        self.state == DashboardState::Loading
    }

    pub fn range_days(&self) -> u32 {
        self.range_days
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn snapshot(&self) -> Option<Arc<MetricSnapshot>> {
        self.store.current()
    }

    pub fn registry(&self) -> &ChartRegistry {
        &self.registry
    }

    pub fn fetcher(&self) -> &MetricFetcher<T> {
        &self.fetcher
    }

    /// Status line for the terminal
    pub fn status_line(&self, no_color: bool) -> String {
        let loaded = self
            .store
            .current()
            .map(|s| s.fetched_at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "never".to_string());
        if no_color {
            format!("[{}] range={}d | updated={}", self.state, self.range_days, loaded)
        } else {
            format!(
                "{}{} [{}] range={}d | updated={}{}",
                self.state.color_code(),
                self.state.emoji(),
                self.state,
                self.range_days,
                loaded,
                DashboardState::color_reset()
            )
        }
    }

    /// Format the whole dashboard for terminal display
    pub fn to_terminal_string(&self, no_color: bool) -> String {
        let mut out = vec![self.status_line(no_color)];
        if let Some(notice) = &self.notice {
            out.push(notice.to_terminal_string(no_color));
        }
        out.push(String::new());
        out.push(self.registry.to_terminal_string(no_color));
        out.join("\n")
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetricKind;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    /// Transport answering every metric with a fixed body, or failing one
    struct StubTransport {
        failing: Option<MetricKind>,
    }

    #[async_trait]
    impl MetricTransport for StubTransport {
        async fn get_json(&self, path: &str, _days: u32) -> Result<Value, FetchError> {
            if self.failing.is_some_and(|k| k.endpoint() == path) {
                return Err(FetchError::status(path, 500));
            }
            Ok(json!({}))
        }
    }

    fn ok_snapshot() -> Result<MetricSnapshot, FetchError> {
        Ok(MetricSnapshot {
            range_days: 30,
            ..Default::default()
        })
    }

    #[test]
    fn test_starts_idle() {
        let controller = DashboardController::new(StubTransport { failing: None });
        assert_eq!(controller.state(), DashboardState::Idle);
        assert!(!controller.is_loading());
        assert!(controller.snapshot().is_none());
    }

    #[test]
    fn test_loading_indicator_during_cycle() {
        let mut controller = DashboardController::new(StubTransport { failing: None });
        let ticket = controller.begin_refresh(7);
        assert!(controller.is_loading());

        controller.complete_refresh(ticket, ok_snapshot());
        assert!(!controller.is_loading());
        assert_eq!(controller.state(), DashboardState::Ready);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut controller = DashboardController::new(StubTransport { failing: None });
        let old = controller.begin_refresh(30);
        let new = controller.begin_refresh(7);

        // Newer request resolves first
        let mut fresh = ok_snapshot().unwrap();
        fresh.range_days = 7;
        assert_eq!(controller.complete_refresh(new, Ok(fresh)), RefreshOutcome::Applied);

        // Then the slow old one arrives
        assert_eq!(controller.complete_refresh(old, ok_snapshot()), RefreshOutcome::Discarded);
        let current = controller.snapshot().unwrap();
        assert_eq!(current.range_days, 7);
        assert_eq!(current.generation, new.generation);
    }

    #[test]
    fn test_stale_failure_does_not_raise_error() {
        let mut controller = DashboardController::new(StubTransport { failing: None });
        let old = controller.begin_refresh(30);
        let new = controller.begin_refresh(7);

        controller.complete_refresh(old, Err(FetchError::status("/x", 500)));
        assert_eq!(controller.state(), DashboardState::Loading);
        assert!(controller.notice().is_none());

        controller.complete_refresh(new, ok_snapshot());
        assert_eq!(controller.state(), DashboardState::Ready);
    }

    #[test]
    fn test_notice_auto_dismisses() {
        let mut controller = DashboardController::new(StubTransport { failing: None });
        let ticket = controller.begin_refresh(7);
        controller.complete_refresh(ticket, Err(FetchError::status("/x", 503)));

        let raised = controller.notice().unwrap().raised_at;
        controller.tick(raised);
        assert!(controller.notice().is_some());

        controller.tick(raised + chrono::Duration::seconds(crate::NOTICE_TTL_SECS));
        assert!(controller.notice().is_none());
        assert_eq!(controller.state(), DashboardState::Error);
    }

    #[tokio::test]
    async fn test_failed_mount_enters_error() {
        let mut controller = DashboardController::new(StubTransport {
            failing: Some(MetricKind::EmotionTrends),
        });
        assert_eq!(controller.mount().await, RefreshOutcome::Failed);
        assert_eq!(controller.state(), DashboardState::Error);
        assert!(controller.notice().is_some());
        assert!(controller.snapshot().is_none());
        assert!(!controller.registry().all_created());
    }

    #[tokio::test]
    async fn test_huge_range_fails_cycle_without_panicking() {
        let mut controller = DashboardController::new(StubTransport { failing: None });
        assert_eq!(controller.select_range(4_000_000_000).await, RefreshOutcome::Failed);
        assert_eq!(controller.state(), DashboardState::Error);
        assert_eq!(
            controller.notice().map(|n| n.message.clone()),
            Some("Invalid range: 4000000000 days".to_string())
        );
    }

    #[tokio::test]
    async fn test_zero_range_fails_cycle() {
        let mut controller = DashboardController::new(StubTransport { failing: None });
        assert_eq!(controller.select_range(0).await, RefreshOutcome::Failed);
        assert_eq!(controller.state(), DashboardState::Error);
    }
}
