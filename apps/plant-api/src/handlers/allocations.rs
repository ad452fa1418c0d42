//! 分配 handlers
//!
//! - POST /allocations - 接收分配（预留产能或记录为 REJECTED）
//! - GET /allocations?fecha=&estado= - 列表（按接收时间倒序）
//! - GET /allocations/:id - 详情
//! - PUT /allocations/:id/status - 变更状态（终态不可变更）

use crate::AppState;
use crate::utils::{
    allocation_to_dto, normalize_required, not_found_error, parse_optional_date,
    parse_optional_status, parse_status, service_error, storage_error,
};
use api_contract::{
    AllocationDto, AllocationQuery, AllocationRequest, ApiResponse, UpdateAllocationStatusRequest,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::AllocationNotice;
use plant_storage::AllocationFilter;

#[derive(serde::Deserialize)]
pub struct AllocationPath {
    id: String,
}

/// 接收分配
pub async fn create_allocation(
    State(state): State<AppState>,
    Json(req): Json<AllocationRequest>,
) -> Response {
    let assigned_by = match normalize_required(req.assigned_by, "assignedBy") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let notice = AllocationNotice::new(
        req.date,
        req.total_containers,
        req.total_packages,
        req.estimated_weight_tons,
    )
    .assigned_by(assigned_by)
    .with_container_ids(req.container_ids);

    match state.service.receive_allocation(&notice).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(allocation_to_dto(record))),
        )
            .into_response(),
        Err(err) => service_error(err),
    }
}

/// 分配列表
pub async fn list_allocations(
    State(state): State<AppState>,
    Query(query): Query<AllocationQuery>,
) -> Response {
    let date = match parse_optional_date(query.fecha, "fecha") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let status = match parse_optional_status(query.estado, "estado") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let filter = AllocationFilter { date, status };
    match state.service.allocations().list(&filter).await {
        Ok(records) => {
            let data: Vec<AllocationDto> = records.into_iter().map(allocation_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 分配详情
pub async fn get_allocation(
    State(state): State<AppState>,
    Path(path): Path<AllocationPath>,
) -> Response {
    match state.service.allocations().find(&path.id).await {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(ApiResponse::success(allocation_to_dto(record))),
        )
            .into_response(),
        Ok(None) => not_found_error(format!("allocation not found: {}", path.id)),
        Err(err) => storage_error(err),
    }
}

/// 变更分配状态
pub async fn update_allocation_status(
    State(state): State<AppState>,
    Path(path): Path<AllocationPath>,
    Json(req): Json<UpdateAllocationStatusRequest>,
) -> Response {
    let status = match parse_status(&req.status, "status") {
        Ok(status) => status,
        Err(response) => return response,
    };
    match state.service.update_status(&path.id, status).await {
        Ok(record) => (
            StatusCode::OK,
            Json(ApiResponse::success(allocation_to_dto(record))),
        )
            .into_response(),
        Err(err) => service_error(err),
    }
}
