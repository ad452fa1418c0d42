//! 中间件模块

pub mod auth;

pub use auth::{bearer_token, request_context, require_bearer};
