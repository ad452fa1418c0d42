//! 回收厂业务服务
//!
//! 分配接收规则：
//! - 容器数必须大于 0，包装数与预估重量不得为负
//! - 当日无产能记录或剩余不足时，记录以 REJECTED 状态保存并附带原因
//! - 否则在产能表上预留预估重量，记录保持 PENDING
//!
//! REJECTED / COMPLETED 为终态，不允许再变更。

use domain::AllocationNotice;
use plant_storage::{
    AllocationRecord, AllocationStatus, AllocationStore, CapacityStore, StorageError,
};
use plant_telemetry::record_reservation;
use std::sync::Arc;
use tracing::{info, warn};

/// 分配服务错误
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid allocation: {0}")]
    InvalidAllocation(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub const ACCEPTED_MESSAGE: &str = "Allocation accepted";

pub struct PlantService {
    capacity: Arc<dyn CapacityStore>,
    allocations: Arc<dyn AllocationStore>,
}

impl PlantService {
    pub fn new(capacity: Arc<dyn CapacityStore>, allocations: Arc<dyn AllocationStore>) -> Self {
        Self {
            capacity,
            allocations,
        }
    }

    pub fn capacity(&self) -> &Arc<dyn CapacityStore> {
        &self.capacity
    }

    pub fn allocations(&self) -> &Arc<dyn AllocationStore> {
        &self.allocations
    }

    /// 接收一条分配；产能不足不是错误，而是保存为 REJECTED 的记录。
    pub async fn receive_allocation(
        &self,
        notice: &AllocationNotice,
    ) -> Result<AllocationRecord, ServiceError> {
        validate(notice)?;
        let mut record = AllocationRecord::from_notice(notice);

        match self.reserve(notice).await {
            Ok(()) => {
                record.message = Some(ACCEPTED_MESSAGE.to_string());
                record_reservation(true);
                info!(
                    id = %record.id,
                    date = %notice.date,
                    weight = notice.estimated_weight_tons,
                    "allocation accepted"
                );
            }
            Err(StorageError::NotFound(date)) => {
                record.status = AllocationStatus::Rejected;
                record.message = Some(format!("No capacity registered for date: {date}"));
                record_reservation(false);
            }
            Err(StorageError::InsufficientCapacity {
                requested,
                available,
                ..
            }) => {
                record.status = AllocationStatus::Rejected;
                record.message = Some(format!(
                    "Insufficient capacity. Required: {requested} tons, available: {available} tons"
                ));
                record_reservation(false);
            }
            Err(err) => return Err(err.into()),
        }

        if record.status == AllocationStatus::Rejected {
            warn!(
                id = %record.id,
                date = %notice.date,
                reason = record.message.as_deref().unwrap_or_default(),
                "allocation rejected"
            );
        }
        Ok(self.allocations.insert(record).await?)
    }

    /// 零重量的分配不占用产能，但日期仍须有产能记录。
    async fn reserve(&self, notice: &AllocationNotice) -> Result<(), StorageError> {
        if notice.estimated_weight_tons == 0.0 {
            return match self.capacity.get(notice.date).await? {
                Some(_) => Ok(()),
                None => Err(StorageError::NotFound(notice.date)),
            };
        }
        self.capacity
            .reserve(notice.date, notice.estimated_weight_tons)
            .await
            .map(|_| ())
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: AllocationStatus,
    ) -> Result<AllocationRecord, ServiceError> {
        let record = self.allocations.update_status(id, status).await?;
        info!(id = %id, status = %status, "allocation status updated");
        Ok(record)
    }
}

fn validate(notice: &AllocationNotice) -> Result<(), ServiceError> {
    if notice.containers == 0 {
        return Err(ServiceError::InvalidAllocation(
            "totalContainers must be greater than 0".to_string(),
        ));
    }
    if !notice.estimated_weight_tons.is_finite() || notice.estimated_weight_tons < 0.0 {
        return Err(ServiceError::InvalidAllocation(
            "estimatedWeightTons must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}
