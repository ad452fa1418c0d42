//! 回收厂网关端点描述。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 端点配置解析错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointParseError {
    #[error("unknown transport kind: {0}")]
    UnknownKind(String),
    #[error("invalid endpoint entry, expected name=kind@address[#token]: {0}")]
    InvalidEntry(String),
}

/// 回收厂使用的传输协议。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// 请求/响应式 HTTP
    Http,
    /// 行协议 TCP
    Socket,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Socket => write!(f, "socket"),
        }
    }
}

impl FromStr for TransportKind {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" | "rest" | "springboot" => Ok(Self::Http),
            "socket" | "tcp" => Ok(Self::Socket),
            other => Err(EndpointParseError::UnknownKind(other.to_string())),
        }
    }
}

/// 网关端点：构造后不可变，由调用方持有。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayEndpoint {
    kind: TransportKind,
    address: String,
    display_name: String,
    credential: Option<String>,
}

impl GatewayEndpoint {
    /// `address` 对 HTTP 是 base URL，对 Socket 是 `host:port`。
    pub fn new(
        kind: TransportKind,
        address: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            address: address.into(),
            display_name: display_name.into(),
            credential: None,
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// 解析 `name=kind@address[#token]` 形式的配置项。
    pub fn parse_entry(entry: &str) -> Result<Self, EndpointParseError> {
        let invalid = || EndpointParseError::InvalidEntry(entry.to_string());
        let (name, rest) = entry.trim().split_once('=').ok_or_else(invalid)?;
        let (kind, target) = rest.split_once('@').ok_or_else(invalid)?;
        let (address, credential) = match target.split_once('#') {
            Some((address, token)) => (address, Some(token)),
            None => (target, None),
        };
        let name = name.trim();
        let address = address.trim();
        if name.is_empty() || address.is_empty() {
            return Err(invalid());
        }

        let endpoint = Self::new(kind.parse()?, address, name);
        Ok(match credential.map(str::trim).filter(|token| !token.is_empty()) {
            Some(token) => endpoint.with_credential(token),
            None => endpoint,
        })
    }
}
