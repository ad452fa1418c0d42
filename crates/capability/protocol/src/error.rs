//! 协议错误类型定义

/// 协议通信错误（连接级，单条命令的校验错误见 `CommandError`）
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// 连接错误
    #[error("connection error: {0}")]
    Connection(String),

    /// IO 错误
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// 配置解析错误
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// 响应行无法解析
    #[error("malformed reply: {0}")]
    MalformedReply(String),

    /// 超时错误
    #[error("timeout: {0}")]
    Timeout(String),

    /// 内部错误（连接将被强制关闭）
    #[error("internal error: {0}")]
    Internal(String),
}
