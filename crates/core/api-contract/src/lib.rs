//! 稳定的 DTO 与 API 响应契约（REST 回收厂服务与 HttpGateway 共用）。

use domain::{CapacityDate, CapacityRecord};
use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// `GET /capacity?fecha=dd-MM-yyyy` 查询参数。
///
/// 保留原始字符串，由 handler 校验格式后返回统一错误体。
#[derive(Debug, Deserialize)]
pub struct CapacityQuery {
    #[serde(alias = "date")]
    pub fecha: String,
}

/// `GET /capacities?from=&to=` 查询参数。
#[derive(Debug, Default, Deserialize)]
pub struct CapacityRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// 产能登记请求体。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCapacityRequest {
    #[serde(alias = "fecha")]
    pub date: CapacityDate,
    #[serde(alias = "capacidad")]
    pub total_tons: f64,
}

/// 产能记录响应体。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityDto {
    pub date: CapacityDate,
    pub total_tons: f64,
    pub used_tons: f64,
    pub available_tons: f64,
}

impl From<CapacityRecord> for CapacityDto {
    fn from(record: CapacityRecord) -> Self {
        Self {
            date: record.date,
            total_tons: record.total_tons,
            used_tons: record.used_tons,
            available_tons: record.available_tons(),
        }
    }
}

/// 区间产能汇总。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityRangeDto {
    pub items: Vec<CapacityDto>,
    pub total_tons: f64,
}

/// 分配（装载通知）提交请求体。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    pub date: CapacityDate,
    pub total_containers: u32,
    pub total_packages: u32,
    pub estimated_weight_tons: f64,
    pub assigned_by: String,
    #[serde(default)]
    pub container_ids: Vec<String>,
}

/// 分配记录响应体。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationDto {
    pub id: String,
    pub date: CapacityDate,
    pub total_containers: u32,
    pub total_packages: u32,
    pub estimated_weight_tons: f64,
    pub assigned_by: String,
    pub received_at_ms: i64,
    /// PENDING / PROCESSING / COMPLETED / REJECTED
    pub status: String,
    pub message: Option<String>,
    pub container_ids: Vec<String>,
}

/// `GET /allocations?fecha=&estado=` 查询参数。
#[derive(Debug, Default, Deserialize)]
pub struct AllocationQuery {
    #[serde(alias = "date")]
    pub fecha: Option<String>,
    #[serde(alias = "status")]
    pub estado: Option<String>,
}

/// 分配状态变更请求体。
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateAllocationStatusRequest {
    #[serde(alias = "estado")]
    pub status: String,
}

/// 进程指标快照（`GET /metrics`）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub connections_accepted: u64,
    pub connections_rejected: u64,
    pub connections_closed: u64,
    pub commands_processed: u64,
    pub commands_failed: u64,
    pub notifications_received: u64,
    pub reservations_accepted: u64,
    pub reservations_rejected: u64,
    pub gateway_requests: u64,
    pub gateway_failures: u64,
}
