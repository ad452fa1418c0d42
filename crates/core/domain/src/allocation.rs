use crate::date::CapacityDate;

/// 协调端发给回收厂的装载通知。
///
/// Socket 传输只携带容器数与包装数；HTTP 传输会把预估重量登记为当日的占用。
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationNotice {
    pub date: CapacityDate,
    pub containers: u32,
    pub packages: u32,
    pub estimated_weight_tons: f64,
    pub assigned_by: String,
    pub container_ids: Vec<String>,
}

impl AllocationNotice {
    pub fn new(date: CapacityDate, containers: u32, packages: u32, estimated_weight_tons: f64) -> Self {
        Self {
            date,
            containers,
            packages,
            estimated_weight_tons,
            assigned_by: String::new(),
            container_ids: Vec::new(),
        }
    }

    pub fn assigned_by(mut self, assigned_by: impl Into<String>) -> Self {
        self.assigned_by = assigned_by.into();
        self
    }

    pub fn with_container_ids(mut self, container_ids: Vec<String>) -> Self {
        self.container_ids = container_ids;
        self
    }
}
