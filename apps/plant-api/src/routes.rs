//! 路由定义
//!
//! 需要认证的 API 路由（/health 在 `create_app` 中单独挂载，无需认证）：
//! - 产能：/capacity, /capacities, /capacity/:fecha
//! - 分配：/allocations, /allocations/:id, /allocations/:id/status
//! - 指标：/metrics

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{get, post, put},
};

/// 创建 API 路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/capacity", get(get_capacity).post(register_capacity))
        .route("/capacity/:fecha", axum::routing::delete(delete_capacity))
        .route("/capacities", get(list_capacities))
        .route(
            "/allocations",
            post(create_allocation).get(list_allocations),
        )
        .route("/allocations/:id", get(get_allocation))
        .route("/allocations/:id/status", put(update_allocation_status))
        .route("/metrics", get(get_metrics))
}
