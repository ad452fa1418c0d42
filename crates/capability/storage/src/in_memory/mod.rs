//! 内存存储实现模块
//!
//! 进程启动时创建一次，通过 `Arc` 传给所有使用方；进程退出即丢失。
//!
//! - CapacityStore: InMemoryCapacityStore
//! - AllocationStore: InMemoryAllocationStore

pub mod allocation;
pub mod capacity;

pub use allocation::*;
pub use capacity::*;
