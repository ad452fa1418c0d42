//! 产能表内存实现
//!
//! 整张表由一把 `RwLock` 保护：`reserve` 的检查与更新在同一个写锁内完成，
//! 并发预留不会同时通过检查；纯读操作只取读锁。

use crate::error::StorageError;
use crate::traits::CapacityStore;
use async_trait::async_trait;
use domain::{CapacityDate, CapacityRecord};
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::{debug, info, warn};

/// 产能内存存储
pub struct InMemoryCapacityStore {
    records: RwLock<BTreeMap<CapacityDate, CapacityRecord>>,
}

impl InMemoryCapacityStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// 以已知记录预置（测试用）。
    pub fn with_records(records: impl IntoIterator<Item = (CapacityDate, f64)>) -> Self {
        let map = records
            .into_iter()
            .map(|(date, total_tons)| (date, CapacityRecord::new(date, total_tons)))
            .collect();
        Self {
            records: RwLock::new(map),
        }
    }

    /// 记录数量（用于测试）。
    pub fn len(&self) -> usize {
        self.records.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryCapacityStore {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_amount(amount: f64) -> Result<(), StorageError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(StorageError::InvalidAmount(format!(
            "amount must be a positive number, got {amount}"
        )))
    }
}

#[async_trait]
impl CapacityStore for InMemoryCapacityStore {
    async fn register(
        &self,
        date: CapacityDate,
        total_tons: f64,
    ) -> Result<CapacityRecord, StorageError> {
        ensure_amount(total_tons)?;
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::internal("lock failed"))?;
        let record = match records.get_mut(&date) {
            Some(existing) => {
                if total_tons < existing.used_tons {
                    return Err(StorageError::InvalidAmount(format!(
                        "new capacity {total_tons} is below used capacity {}",
                        existing.used_tons
                    )));
                }
                existing.total_tons = total_tons;
                *existing
            }
            None => {
                let record = CapacityRecord::new(date, total_tons);
                records.insert(date, record);
                record
            }
        };
        info!(date = %date, total_tons, "capacity registered");
        Ok(record)
    }

    async fn get(&self, date: CapacityDate) -> Result<Option<CapacityRecord>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::internal("lock failed"))?;
        Ok(records.get(&date).copied())
    }

    async fn reserve(
        &self,
        date: CapacityDate,
        amount: f64,
    ) -> Result<CapacityRecord, StorageError> {
        ensure_amount(amount)?;
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::internal("lock failed"))?;
        let record = records.get_mut(&date).ok_or(StorageError::NotFound(date))?;

        let available = record.available_tons();
        if amount > available {
            warn!(date = %date, requested = amount, available, "insufficient capacity");
            return Err(StorageError::InsufficientCapacity {
                date,
                requested: amount,
                available,
            });
        }

        record.used_tons = (record.used_tons + amount).min(record.total_tons);
        debug!(date = %date, amount, used_tons = record.used_tons, "capacity reserved");
        Ok(*record)
    }

    async fn release(
        &self,
        date: CapacityDate,
        amount: f64,
    ) -> Result<CapacityRecord, StorageError> {
        ensure_amount(amount)?;
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::internal("lock failed"))?;
        let record = records.get_mut(&date).ok_or(StorageError::NotFound(date))?;
        record.used_tons = (record.used_tons - amount).max(0.0);
        debug!(date = %date, amount, used_tons = record.used_tons, "capacity released");
        Ok(*record)
    }

    async fn remove(&self, date: CapacityDate) -> Result<bool, StorageError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::internal("lock failed"))?;
        let removed = records.remove(&date).is_some();
        if removed {
            info!(date = %date, "capacity removed");
        }
        Ok(removed)
    }

    async fn list_between(
        &self,
        start: CapacityDate,
        end: CapacityDate,
    ) -> Result<Vec<CapacityRecord>, StorageError> {
        if end < start {
            return Ok(Vec::new());
        }
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::internal("lock failed"))?;
        Ok(records.range(start..=end).map(|(_, record)| *record).collect())
    }

    async fn list_from(&self, start: CapacityDate) -> Result<Vec<CapacityRecord>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::internal("lock failed"))?;
        Ok(records.range(start..).map(|(_, record)| *record).collect())
    }
}
