//! 行协议能力模块
//!
//! 提供 CAPACIDAD / NOTIFICAR / SALIR 行协议的编解码、单连接状态机和 TCP 服务器。

pub mod codec;
pub mod error;
pub mod handler;
pub mod server;

pub use codec::{
    Command, CommandError, NO_CAPACITY_MESSAGE, NO_CAPACITY_MESSAGE_ES, Response,
    is_no_capacity_message,
};
pub use error::ProtocolError;
pub use handler::{ConnectionHandler, ConnectionState, MAX_LINE_BYTES};
pub use server::{ProtocolServer, ProtocolServerConfig, SERVER_BUSY_LINE};
