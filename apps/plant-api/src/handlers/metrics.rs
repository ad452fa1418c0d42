//! 健康检查与指标快照。
//!
//! - GET /health（无需认证）
//! - GET /metrics

use api_contract::{ApiResponse, MetricsSnapshotDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use plant_telemetry::metrics;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    (
        StatusCode::OK,
        Json(ApiResponse::success(MetricsSnapshotDto {
            connections_accepted: snapshot.connections_accepted,
            connections_rejected: snapshot.connections_rejected,
            connections_closed: snapshot.connections_closed,
            commands_processed: snapshot.commands_processed,
            commands_failed: snapshot.commands_failed,
            notifications_received: snapshot.notifications_received,
            reservations_accepted: snapshot.reservations_accepted,
            reservations_rejected: snapshot.reservations_rejected,
            gateway_requests: snapshot.gateway_requests,
            gateway_failures: snapshot.gateway_failures,
        })),
    )
        .into_response()
}
