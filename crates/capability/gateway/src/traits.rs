//! 网关接口定义

use crate::error::GatewayError;
use async_trait::async_trait;
use domain::{AllocationNotice, CapacityDate, TransportKind};

/// 回收厂网关
///
/// 调用方只依赖此接口；HTTP 与 Socket 两种实现对同一产能状态返回相同的数值，
/// 并把“该日期无数据”统一映射为 `GatewayError::Unavailable`。
/// 每次调用只尝试一次，不做重试。
#[async_trait]
pub trait PlantGateway: Send + Sync {
    /// 查询某日剩余产能（吨）。
    async fn query_capacity(&self, date: CapacityDate) -> Result<f64, GatewayError>;

    /// 向回收厂报告预计装载量，返回回收厂的确认消息。
    async fn notify(&self, notice: &AllocationNotice) -> Result<String, GatewayError>;

    /// 回收厂显示名称。
    fn name(&self) -> &str;

    fn transport_kind(&self) -> TransportKind;
}
