use crate::date::CapacityDate;
use serde::{Deserialize, Serialize};

/// 某一日的产能记录（单位：吨）。
///
/// 不变量：`0 <= used_tons <= total_tons`，由 CapacityStore 在每次修改时维护。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityRecord {
    pub date: CapacityDate,
    pub total_tons: f64,
    pub used_tons: f64,
}

impl CapacityRecord {
    /// 新登记的记录，尚无占用。
    pub fn new(date: CapacityDate, total_tons: f64) -> Self {
        Self {
            date,
            total_tons,
            used_tons: 0.0,
        }
    }

    /// 剩余可用产能。
    pub fn available_tons(&self) -> f64 {
        (self.total_tons - self.used_tons).max(0.0)
    }

    pub fn can_accommodate(&self, amount: f64) -> bool {
        amount <= self.available_tons()
    }
}
