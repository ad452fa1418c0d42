//! 产能 handlers
//!
//! - GET /capacity?fecha=dd-MM-yyyy - 剩余产能（裸数值响应体）
//! - POST /capacity - 登记或更新某日总产能
//! - GET /capacities?from=&to= - 区间列表（from 缺省为今天，to 缺省不限）
//! - DELETE /capacity/:fecha - 删除某日记录

use crate::AppState;
use crate::utils::{
    bad_request_error, not_found_error, parse_date, parse_optional_date, storage_error,
};
use api_contract::{
    ApiResponse, CapacityDto, CapacityQuery, CapacityRangeDto, CapacityRangeQuery,
    RegisterCapacityRequest,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use domain::CapacityDate;
use plant_storage::StorageError;

/// 查询剩余产能
pub async fn get_capacity(
    State(state): State<AppState>,
    Query(query): Query<CapacityQuery>,
) -> Response {
    let date = match parse_date(query.fecha.trim(), "fecha") {
        Ok(date) => date,
        Err(response) => return response,
    };
    match state.capacity_store.query(date).await {
        Ok(available) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            available.to_string(),
        )
            .into_response(),
        Err(StorageError::NotFound(date)) => {
            not_found_error(format!("No capacity available for date: {date}"))
        }
        Err(err) => storage_error(err),
    }
}

/// 登记产能
pub async fn register_capacity(
    State(state): State<AppState>,
    Json(req): Json<RegisterCapacityRequest>,
) -> Response {
    match state.capacity_store.register(req.date, req.total_tons).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(CapacityDto::from(record))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 区间产能列表
pub async fn list_capacities(
    State(state): State<AppState>,
    Query(query): Query<CapacityRangeQuery>,
) -> Response {
    let from = match parse_optional_date(query.from, "from") {
        Ok(value) => value.unwrap_or_else(CapacityDate::today),
        Err(response) => return response,
    };
    let to = match parse_optional_date(query.to, "to") {
        Ok(value) => value,
        Err(response) => return response,
    };
    if to.is_some_and(|to| to < from) {
        return bad_request_error("from must not be after to");
    }

    let result = match to {
        Some(to) => state.capacity_store.list_between(from, to).await,
        None => state.capacity_store.list_from(from).await,
    };
    match result {
        Ok(records) => {
            let total_tons = records.iter().map(|record| record.total_tons).sum();
            let items = records.into_iter().map(CapacityDto::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(CapacityRangeDto { items, total_tons })),
            )
                .into_response()
        }
        Err(err) => storage_error(err),
    }
}

#[derive(serde::Deserialize)]
pub struct CapacityPath {
    fecha: String,
}

/// 删除某日产能
pub async fn delete_capacity(
    State(state): State<AppState>,
    Path(path): Path<CapacityPath>,
) -> Response {
    let date = match parse_date(&path.fecha, "fecha") {
        Ok(date) => date,
        Err(response) => return response,
    };
    match state.capacity_store.remove(date).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({ "deleted": true }))),
        )
            .into_response(),
        Ok(false) => not_found_error(format!("No capacity available for date: {date}")),
        Err(err) => storage_error(err),
    }
}
