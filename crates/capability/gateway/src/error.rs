//! 网关错误类型定义

/// 网关调用错误
///
/// 调用方只依赖错误类别，不关心具体传输方式。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// 回收厂没有该日期的产能数据
    #[error("capacity unavailable: {0}")]
    Unavailable(String),

    /// 连接失败、超时、IO 错误或非预期的 HTTP 状态
    #[error("transport error: {0}")]
    Transport(String),

    /// 响应无法解析，或对端报告了协议错误
    #[error("protocol error: {0}")]
    Protocol(String),

    /// 通知被回收厂拒绝（如产能不足）
    #[error("rejected by plant: {0}")]
    Rejected(String),

    /// 端点配置错误
    #[error("gateway config error: {0}")]
    Config(String),
}

impl GatewayError {
    /// 错误类别名称（日志与命令行输出使用）。
    pub fn category(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "unavailable",
            Self::Transport(_) => "transport",
            Self::Protocol(_) => "protocol",
            Self::Rejected(_) => "rejected",
            Self::Config(_) => "config",
        }
    }
}
