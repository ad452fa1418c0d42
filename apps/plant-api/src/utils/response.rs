//! HTTP 响应辅助函数和 DTO 转换
//!
//! 错误响应统一使用 ApiResponse 格式，HTTP 状态码与错误码一一对应。

use crate::service::ServiceError;
use api_contract::{AllocationDto, ApiResponse};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use plant_storage::{AllocationRecord, StorageError};
use tracing::error;

/// 认证错误响应
pub fn auth_error(status: StatusCode) -> Response {
    (
        status,
        Json(ApiResponse::<()>::error(
            "AUTH.UNAUTHORIZED",
            "unauthorized",
        )),
    )
        .into_response()
}

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error(message: impl Into<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", message.into())),
    )
        .into_response()
}

/// 状态冲突错误响应
pub fn conflict_error(message: impl Into<String>) -> Response {
    (
        StatusCode::CONFLICT,
        Json(ApiResponse::<()>::error("STATE.CONFLICT", message.into())),
    )
        .into_response()
}

/// 存储错误响应
pub fn storage_error(err: StorageError) -> Response {
    match err {
        StorageError::NotFound(_) | StorageError::AllocationNotFound(_) => {
            not_found_error(err.to_string())
        }
        StorageError::InvalidAmount(_) => bad_request_error(err.to_string()),
        StorageError::InsufficientCapacity { .. } | StorageError::InvalidTransition(_) => {
            conflict_error(err.to_string())
        }
        StorageError::Internal(_) => {
            error!(error = %err, "storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("INTERNAL.ERROR", err.to_string())),
            )
                .into_response()
        }
    }
}

/// 业务错误响应
pub fn service_error(err: ServiceError) -> Response {
    match err {
        ServiceError::InvalidAllocation(message) => bad_request_error(message),
        ServiceError::Storage(err) => storage_error(err),
    }
}

/// AllocationRecord 转 AllocationDto
pub fn allocation_to_dto(record: AllocationRecord) -> AllocationDto {
    AllocationDto {
        id: record.id,
        date: record.date,
        total_containers: record.total_containers,
        total_packages: record.total_packages,
        estimated_weight_tons: record.estimated_weight_tons,
        assigned_by: record.assigned_by,
        received_at_ms: record.received_at_ms,
        status: record.status.to_string(),
        message: record.message,
        container_ids: record.container_ids,
    }
}
