//! 分配记录内存实现

use crate::error::StorageError;
use crate::models::{AllocationFilter, AllocationRecord, AllocationStatus};
use crate::traits::AllocationStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// 分配记录内存存储
pub struct InMemoryAllocationStore {
    records: RwLock<HashMap<String, AllocationRecord>>,
}

impl InMemoryAllocationStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryAllocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AllocationStore for InMemoryAllocationStore {
    async fn insert(&self, record: AllocationRecord) -> Result<AllocationRecord, StorageError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::internal("lock failed"))?;
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn find(&self, id: &str) -> Result<Option<AllocationRecord>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::internal("lock failed"))?;
        Ok(records.get(id).cloned())
    }

    async fn list(&self, filter: &AllocationFilter) -> Result<Vec<AllocationRecord>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::internal("lock failed"))?;
        let mut items: Vec<AllocationRecord> = records
            .values()
            .filter(|record| filter.date.is_none_or(|date| record.date == date))
            .filter(|record| filter.status.is_none_or(|status| record.status == status))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.received_at_ms.cmp(&a.received_at_ms));
        Ok(items)
    }

    async fn update_status(
        &self,
        id: &str,
        status: AllocationStatus,
    ) -> Result<AllocationRecord, StorageError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::internal("lock failed"))?;
        let record = records
            .get_mut(id)
            .ok_or_else(|| StorageError::AllocationNotFound(id.to_string()))?;
        if record.status.is_terminal() {
            return Err(StorageError::InvalidTransition(format!(
                "allocation {id} is {} and cannot change",
                record.status
            )));
        }
        record.status = status;
        Ok(record.clone())
    }

    async fn count_by_status(&self, status: AllocationStatus) -> Result<u64, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::internal("lock failed"))?;
        Ok(records.values().filter(|record| record.status == status).count() as u64)
    }
}
