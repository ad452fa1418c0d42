//! # Plant Storage 模块
//!
//! 回收厂产能数据的存储抽象层。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：CapacityStore、AllocationStore 异步 Trait
//! 2. **数据模型层** (`models.rs`)：分配记录与状态
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **演示数据** (`seed.rs`)：可复现的产能生成器
//! 5. **实现层** (`in_memory/`)：`RwLock` 保护的内存实现
//!
//! ## 并发约束
//!
//! CapacityStore 是各连接之间唯一共享的状态。`reserve` 的“检查剩余量 + 增加占用量”
//! 必须在同一个临界区内完成，否则两个并发预留会同时通过检查，破坏
//! `used_tons <= total_tons`。内存实现用整表写锁满足这一点。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use plant_storage::{CapacitySeeder, CapacityStore, InMemoryCapacityStore};
//! use domain::CapacityDate;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn CapacityStore> = Arc::new(InMemoryCapacityStore::new());
//! store
//!     .initialize_window(CapacityDate::today(), 10, &CapacitySeeder::default().with_seed(7))
//!     .await?;
//! let available = store.query(CapacityDate::today()).await?;
//! ```

pub mod error;
pub mod in_memory;
pub mod models;
pub mod seed;
pub mod traits;

pub use error::*;
pub use models::*;
pub use seed::CapacitySeeder;
pub use traits::*;

pub use in_memory::{InMemoryAllocationStore, InMemoryCapacityStore};
