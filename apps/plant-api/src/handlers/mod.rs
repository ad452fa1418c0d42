//! Handlers 模块

pub mod allocations;
pub mod capacity;
pub mod metrics;

pub use allocations::*;
pub use capacity::*;
pub use metrics::*;
