//! 存储接口 Trait 定义
//!
//! - CapacityStore：按日期的产能表
//! - AllocationStore：分配记录
//!
//! 设计原则：
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发（`Arc<dyn CapacityStore>` 在连接间共享）

use crate::error::StorageError;
use crate::models::{AllocationFilter, AllocationRecord, AllocationStatus};
use crate::seed::CapacitySeeder;
use async_trait::async_trait;
use domain::{CapacityDate, CapacityRecord};

/// 产能存储接口
///
/// 所有修改都在单个临界区内完成检查与更新，保证 `0 <= used <= total`。
#[async_trait]
pub trait CapacityStore: Send + Sync {
    /// 登记（或更新）某日的总产能；新总量不得低于已占用量。
    async fn register(
        &self,
        date: CapacityDate,
        total_tons: f64,
    ) -> Result<CapacityRecord, StorageError>;

    /// 读取完整记录。
    async fn get(&self, date: CapacityDate) -> Result<Option<CapacityRecord>, StorageError>;

    /// 查询剩余产能，纯读操作。
    async fn query(&self, date: CapacityDate) -> Result<f64, StorageError> {
        self.get(date)
            .await?
            .map(|record| record.available_tons())
            .ok_or(StorageError::NotFound(date))
    }

    /// 原子地检查 `amount <= available` 并增加占用量。
    async fn reserve(
        &self,
        date: CapacityDate,
        amount: f64,
    ) -> Result<CapacityRecord, StorageError>;

    /// 释放占用量，下限为 0。
    async fn release(
        &self,
        date: CapacityDate,
        amount: f64,
    ) -> Result<CapacityRecord, StorageError>;

    /// 删除某日记录（管理操作）。
    async fn remove(&self, date: CapacityDate) -> Result<bool, StorageError>;

    /// 列出 `[start, end]` 区间内的记录，按日期升序。
    async fn list_between(
        &self,
        start: CapacityDate,
        end: CapacityDate,
    ) -> Result<Vec<CapacityRecord>, StorageError>;

    /// 列出 `start` 及之后的记录，按日期升序。
    async fn list_from(&self, start: CapacityDate) -> Result<Vec<CapacityRecord>, StorageError>;

    /// 区间内总产能之和。
    async fn total_between(
        &self,
        start: CapacityDate,
        end: CapacityDate,
    ) -> Result<f64, StorageError> {
        Ok(self
            .list_between(start, end)
            .await?
            .iter()
            .map(|record| record.total_tons)
            .sum())
    }

    /// 从 `start` 起连续登记 `days` 天的产能（启动演示数据）。
    async fn initialize_window(
        &self,
        start: CapacityDate,
        days: u64,
        seeder: &CapacitySeeder,
    ) -> Result<Vec<CapacityRecord>, StorageError> {
        let values = seeder.values(days as usize);
        let mut records = Vec::with_capacity(values.len());
        for (offset, total_tons) in values.into_iter().enumerate() {
            let date = start
                .add_days(offset as u64)
                .ok_or_else(|| StorageError::internal("date overflow"))?;
            records.push(self.register(date, total_tons).await?);
        }
        Ok(records)
    }
}

/// 分配记录存储接口
#[async_trait]
pub trait AllocationStore: Send + Sync {
    async fn insert(&self, record: AllocationRecord) -> Result<AllocationRecord, StorageError>;

    async fn find(&self, id: &str) -> Result<Option<AllocationRecord>, StorageError>;

    /// 按过滤条件列出，接收时间倒序。
    async fn list(&self, filter: &AllocationFilter) -> Result<Vec<AllocationRecord>, StorageError>;

    /// 变更状态；终态记录不可变更。
    async fn update_status(
        &self,
        id: &str,
        status: AllocationStatus,
    ) -> Result<AllocationRecord, StorageError>;

    async fn count_by_status(&self, status: AllocationStatus) -> Result<u64, StorageError>;
}
