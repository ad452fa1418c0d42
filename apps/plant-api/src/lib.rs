//! REST 回收厂服务
//!
//! 以 HTTP 暴露产能查询/登记与分配接收，供 `HttpGateway` 调用。
//! 除 /health 外所有路由都需要 `Authorization: Bearer <token>`。

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod utils;

use axum::{Router, middleware as axum_middleware, routing::get};
use plant_storage::{AllocationStore, CapacityStore};
use service::PlantService;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub capacity_store: Arc<dyn CapacityStore>,
    pub service: Arc<PlantService>,
    pub api_token: Arc<str>,
}

impl AppState {
    pub fn new(
        capacity_store: Arc<dyn CapacityStore>,
        allocation_store: Arc<dyn AllocationStore>,
        api_token: impl Into<Arc<str>>,
    ) -> Self {
        let service = Arc::new(PlantService::new(
            Arc::clone(&capacity_store),
            allocation_store,
        ));
        Self {
            capacity_store,
            service,
            api_token: api_token.into(),
        }
    }
}

/// 组装完整应用：认证路由 + 健康检查 + 请求上下文 + 请求追踪
pub fn create_app(state: AppState) -> Router {
    let protected = routes::create_api_router().route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::require_bearer,
    ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(protected)
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::request_context))
        .layer(TraceLayer::new_for_http())
}
