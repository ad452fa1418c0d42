//! 回收厂网关
//!
//! 协调端通过 `PlantGateway` 查询任一回收厂的剩余产能，不关心对方使用哪种传输：
//!
//! - `HttpGateway`：请求/响应式 HTTP（bearer 凭据）
//! - `SocketGateway`：CAPACIDAD 行协议，每次调用一个连接
//!
//! `GatewayFactory` 按 `GatewayEndpoint` 的传输类型构造网关，
//! `GatewayRegistry` 提供按回收厂名称的查找。

pub mod error;
pub mod factory;
pub mod http;
pub mod socket;
pub mod traits;

pub use error::GatewayError;
pub use factory::{AnyGateway, GatewayFactory, GatewayRegistry};
pub use http::{HttpGateway, HttpGatewayConfig};
pub use socket::{SocketGateway, SocketGatewayConfig};
pub use traits::PlantGateway;
