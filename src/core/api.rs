//! HTTP API for the analytics aggregation service
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /api/analytics/emotion-distribution?days=N
//! - GET /api/analytics/daily-mood?days=N
//! - GET /api/analytics/emotion-trends?days=N
//! - GET /api/analytics/emotion-frequency?days=N
//! - GET /api/analytics/emotional-balance?days=N
//! - GET /api/analytics/sentiment-trends?days=N
//! - GET /api/analytics/summary?days=N
//!
//! `days` defaults to 30 and must be between 1 and `MAX_RANGE_DAYS`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::core::aggregate::AnalyticsAggregator;
use crate::types::{EmotionRecord, MetricKind};
use crate::{ANALYTICS_PREFIX, DEFAULT_RANGE_DAYS, MAX_RANGE_DAYS};

/// App state
pub struct AppState {
    pub aggregator: RwLock<AnalyticsAggregator>,
}

/// Query string accepted by every analytics endpoint
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub days: Option<u32>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub records: usize,
}

/// Create the API router over a set of records
pub fn create_router(records: Vec<EmotionRecord>) -> Router {
    let state = Arc::new(AppState {
        aggregator: RwLock::new(AnalyticsAggregator::new(records)),
    });

    Router::new()
        .route("/health", get(health))
        .route(&format!("{}/:metric", ANALYTICS_PREFIX), get(metric))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let aggregator = state.aggregator.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        records: aggregator.records().len(),
    })
}

/// One metric for the requested window
async fn metric(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Value>, StatusCode> {
    let kind = MetricKind::from_slug(&slug).ok_or(StatusCode::NOT_FOUND)?;
    let days = query.days.unwrap_or(DEFAULT_RANGE_DAYS);
    if days == 0 || days > MAX_RANGE_DAYS {
        return Err(StatusCode::BAD_REQUEST);
    }

    debug!(metric = %kind, days, "serving metric");
    let aggregator = state.aggregator.read().await;
    Ok(Json(aggregator.metric_json(kind, days, Utc::now())))
}

/// Run the API server
pub async fn run_server(addr: &str, records: Vec<EmotionRecord>) -> Result<(), std::io::Error> {
    let count = records.len();
    let router = create_router(records);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, records = count, "analytics API listening");
    println!("📊 Mindtrack analytics API running on {}", addr);
    println!("  GET  /health");
    for kind in MetricKind::ALL {
        println!("  GET  {}?days=N", kind.endpoint());
    }
    axum::serve(listener, router).await
}
