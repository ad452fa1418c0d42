//! 回收厂产能领域模型：所有模块共享的基础类型。

pub mod allocation;
pub mod capacity;
pub mod date;
pub mod endpoint;

pub use allocation::AllocationNotice;
pub use capacity::CapacityRecord;
pub use date::{CapacityDate, DATE_FORMAT, DateParseError};
pub use endpoint::{EndpointParseError, GatewayEndpoint, TransportKind};
