//! 存储层错误类型
//!
//! 区分调用方可处理的业务错误（记录不存在、产能不足、非法数量、非法状态变更）
//! 与内部错误（锁中毒等，调用方应记录日志并终止当前操作）。

use domain::CapacityDate;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    /// 该日期没有登记产能
    #[error("no capacity registered for date: {0}")]
    NotFound(CapacityDate),

    /// 预留量超过剩余产能
    #[error("insufficient capacity for {date}: requested {requested}, available {available}")]
    InsufficientCapacity {
        date: CapacityDate,
        requested: f64,
        available: f64,
    },

    /// 数量非法（负数、非有限值或低于已占用量）
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// 分配记录不存在
    #[error("allocation not found: {0}")]
    AllocationNotFound(String),

    /// 分配状态不允许变更
    #[error("invalid status transition: {0}")]
    InvalidTransition(String),

    /// 内部错误
    #[error("internal storage error: {0}")]
    Internal(String),
}

impl StorageError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
