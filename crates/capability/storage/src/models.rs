//! 数据模型
//!
//! - 产能记录：`domain::CapacityRecord`（由 CapacityStore 独占）
//! - 分配模型：AllocationRecord、AllocationStatus、AllocationFilter

use domain::{AllocationNotice, CapacityDate};
use std::fmt;
use std::str::FromStr;

/// 分配状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocationStatus {
    Pending,
    Processing,
    Completed,
    Rejected,
}

impl AllocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Completed => "COMPLETED",
            Self::Rejected => "REJECTED",
        }
    }

    /// 终态不允许再变更。
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "PROCESSING" => Ok(Self::Processing),
            "COMPLETED" => Ok(Self::Completed),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(format!("invalid allocation status: {s}")),
        }
    }
}

/// 分配记录：一次装载通知及其受理结果。
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationRecord {
    pub id: String,
    pub date: CapacityDate,
    pub total_containers: u32,
    pub total_packages: u32,
    pub estimated_weight_tons: f64,
    pub assigned_by: String,
    pub container_ids: Vec<String>,
    pub received_at_ms: i64,
    pub status: AllocationStatus,
    pub message: Option<String>,
}

impl AllocationRecord {
    /// 以 PENDING 状态创建新记录，生成 ID 与接收时间。
    pub fn from_notice(notice: &AllocationNotice) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date: notice.date,
            total_containers: notice.containers,
            total_packages: notice.packages,
            estimated_weight_tons: notice.estimated_weight_tons,
            assigned_by: notice.assigned_by.clone(),
            container_ids: notice.container_ids.clone(),
            received_at_ms: now_epoch_ms(),
            status: AllocationStatus::Pending,
            message: None,
        }
    }
}

/// 分配列表过滤条件。
#[derive(Debug, Clone, Default)]
pub struct AllocationFilter {
    pub date: Option<CapacityDate>,
    pub status: Option<AllocationStatus>,
}

/// 获取当前时间戳（毫秒）
pub fn now_epoch_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
