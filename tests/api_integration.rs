//! Integration tests for the analytics HTTP API
//!
//! Exercises every endpoint through the router without binding a socket

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use mindtrack::core::create_router;
use mindtrack::types::{EmotionRecord, MetricKind};
use mindtrack::MAX_RANGE_DAYS;
use serde_json::Value;
use tower::ServiceExt;

fn records() -> Vec<EmotionRecord> {
    let now = Utc::now();
    vec![
        EmotionRecord::new("joy", now - Duration::hours(1)).with_sentiment(0.6).with_intensity(0.8),
        EmotionRecord::new("joy", now - Duration::days(1)).with_sentiment(0.2),
        EmotionRecord::new("fear", now - Duration::days(2)).with_sentiment(-0.4).with_intensity(0.3),
        EmotionRecord::new("sadness", now - Duration::days(20)).with_sentiment(-0.8),
    ]
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, json) = get_json(create_router(records()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["records"], 4);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_every_metric_endpoint_answers() {
    let app = create_router(records());
    for kind in MetricKind::ALL {
        let uri = format!("{}?days=30", kind.endpoint());
        let (status, _) = get_json(app.clone(), &uri).await;
        assert_eq!(status, StatusCode::OK, "endpoint {} failed", uri);
    }
}

#[tokio::test]
async fn test_days_narrows_window() {
    let app = create_router(records());

    let (_, wide) = get_json(app.clone(), "/api/analytics/emotion-frequency?days=30").await;
    assert_eq!(wide["sadness"], 1);

    let (_, narrow) = get_json(app, "/api/analytics/emotion-frequency?days=7").await;
    assert!(narrow.get("sadness").is_none());
    assert_eq!(narrow["joy"], 2);
    assert_eq!(narrow["fear"], 1);
}

#[tokio::test]
async fn test_days_defaults_to_thirty() {
    let (status, json) = get_json(create_router(records()), "/api/analytics/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_entries"], 4);
    assert_eq!(json["most_common_emotion"], "joy");
}

#[tokio::test]
async fn test_zero_days_rejected() {
    let (status, _) = get_json(create_router(records()), "/api/analytics/summary?days=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_range_past_limit_rejected() {
    let app = create_router(records());

    let (status, _) = get_json(app.clone(), "/api/analytics/summary?days=4000000000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/analytics/daily-mood?days={}", MAX_RANGE_DAYS + 1);
    let (status, _) = get_json(app.clone(), &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/analytics/summary?days={}", MAX_RANGE_DAYS);
    let (status, json) = get_json(app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_entries"], 4);
}

#[tokio::test]
async fn test_unknown_metric_not_found() {
    let (status, _) = get_json(create_router(records()), "/api/analytics/happiness-index").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_records_give_empty_payloads() {
    let app = create_router(Vec::new());

    let (_, dist) = get_json(app.clone(), "/api/analytics/emotion-distribution").await;
    assert_eq!(dist, serde_json::json!({}));

    let (_, mood) = get_json(app.clone(), "/api/analytics/daily-mood").await;
    assert_eq!(mood, serde_json::json!([]));

    let (_, summary) = get_json(app, "/api/analytics/summary").await;
    assert_eq!(summary["total_entries"], 0);
    assert_eq!(summary["most_common_emotion"], "none");
}

#[tokio::test]
async fn test_trends_use_chart_points() {
    let (_, trends) = get_json(create_router(records()), "/api/analytics/emotion-trends?days=7").await;

    let joy = trends["joy"].as_array().unwrap();
    assert!(!joy.is_empty());
    assert!(joy[0]["x"].is_string());
    assert!(joy[0]["y"].is_u64());
}
