//! Socket 网关实现
//!
//! 每次调用新建一个 TCP 连接（不复用），发送一行命令、读取一行响应后即释放连接。
//! 连接与读写半部都归本次调用的栈帧所有，任何返回路径都会随 drop 关闭。

use crate::error::GatewayError;
use crate::traits::PlantGateway;
use async_trait::async_trait;
use domain::{AllocationNotice, CapacityDate, GatewayEndpoint, TransportKind};
use plant_protocol::{Command, Response, is_no_capacity_message};
use plant_telemetry::record_gateway_request;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Socket 网关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocketGatewayConfig {
    /// 连接超时（毫秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
    /// 读取响应超时（毫秒）
    #[serde(default = "default_read_timeout")]
    pub read_timeout_ms: u64,
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_read_timeout() -> u64 {
    5000
}

impl Default for SocketGatewayConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout(),
            read_timeout_ms: default_read_timeout(),
        }
    }
}

impl SocketGatewayConfig {
    pub fn from_json(json: &str) -> Result<Self, GatewayError> {
        serde_json::from_str(json).map_err(|e| GatewayError::Config(e.to_string()))
    }
}

/// Socket 网关
#[derive(Debug, Clone)]
pub struct SocketGateway {
    name: String,
    host: String,
    port: u16,
    config: SocketGatewayConfig,
}

impl SocketGateway {
    pub fn new(endpoint: &GatewayEndpoint) -> Result<Self, GatewayError> {
        Self::with_config(endpoint, SocketGatewayConfig::default())
    }

    pub fn with_config(
        endpoint: &GatewayEndpoint,
        config: SocketGatewayConfig,
    ) -> Result<Self, GatewayError> {
        if endpoint.kind() != TransportKind::Socket {
            return Err(GatewayError::Config(format!(
                "endpoint {} is not a socket endpoint",
                endpoint.display_name()
            )));
        }
        let (host, port) = parse_host_port(endpoint.address())?;

        Ok(Self {
            name: endpoint.display_name().to_string(),
            host,
            port,
            config,
        })
    }

    pub fn target(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// 建立连接，发送一行，读取一行。
    async fn exchange(&self, command: &Command) -> Result<Response, GatewayError> {
        let target = self.target();
        let connect_timeout = Duration::from_millis(self.config.connect_timeout_ms);
        let read_timeout = Duration::from_millis(self.config.read_timeout_ms);

        let stream = timeout(connect_timeout, TcpStream::connect(&target))
            .await
            .map_err(|_| GatewayError::Transport(format!("connect to {target} timed out")))?
            .map_err(|e| GatewayError::Transport(format!("connect to {target} failed: {e}")))?;

        let (read_half, mut write_half) = stream.into_split();
        let mut line = command.encode();
        debug!(plant = %self.name, target = %target, request = %line, "sending command");
        line.push('\n');
        write_half
            .write_all(line.as_bytes())
            .await
            .map_err(|e| GatewayError::Transport(format!("write to {target} failed: {e}")))?;

        let mut reader = BufReader::new(read_half);
        let mut reply = String::new();
        let read = timeout(read_timeout, reader.read_line(&mut reply))
            .await
            .map_err(|_| {
                GatewayError::Transport(format!(
                    "no reply from {target} within {}ms",
                    self.config.read_timeout_ms
                ))
            })?
            .map_err(|e| GatewayError::Transport(format!("read from {target} failed: {e}")))?;
        if read == 0 {
            return Err(GatewayError::Transport(format!(
                "{target} closed the connection without replying"
            )));
        }

        debug!(plant = %self.name, reply = reply.trim(), "received reply");
        Response::parse(&reply).map_err(|e| GatewayError::Protocol(e.to_string()))
    }

    async fn fetch_capacity(&self, date: CapacityDate) -> Result<f64, GatewayError> {
        match self.exchange(&Command::Capacity(date)).await? {
            Response::Ok(value) => value.parse::<f64>().map_err(|_| {
                GatewayError::Protocol(format!("expected a numeric capacity, got: {value}"))
            }),
            Response::Error(message) if is_no_capacity_message(&message) => {
                Err(GatewayError::Unavailable(message))
            }
            Response::Error(message) => Err(GatewayError::Protocol(message)),
            Response::Goodbye => Err(GatewayError::Protocol(
                "unexpected ADIOS reply to capacity query".to_string(),
            )),
        }
    }

    async fn send_notification(&self, notice: &AllocationNotice) -> Result<String, GatewayError> {
        let command = Command::Notify {
            containers: notice.containers,
            packages: notice.packages,
        };
        match self.exchange(&command).await? {
            Response::Ok(message) => Ok(message),
            Response::Error(message) => Err(GatewayError::Rejected(message)),
            Response::Goodbye => Err(GatewayError::Protocol(
                "unexpected ADIOS reply to notification".to_string(),
            )),
        }
    }
}

fn parse_host_port(address: &str) -> Result<(String, u16), GatewayError> {
    let invalid = || GatewayError::Config(format!("expected host:port, got: {address}"));
    let (host, port) = address.trim().rsplit_once(':').ok_or_else(invalid)?;
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.is_empty() {
        return Err(invalid());
    }
    let port = port.parse::<u16>().map_err(|_| invalid())?;
    Ok((host.to_string(), port))
}

#[async_trait]
impl PlantGateway for SocketGateway {
    async fn query_capacity(&self, date: CapacityDate) -> Result<f64, GatewayError> {
        let result = self.fetch_capacity(date).await;
        record_gateway_request(result.is_ok());
        if let Err(e) = &result {
            warn!(plant = %self.name, date = %date, category = e.category(), error = %e, "socket capacity query failed");
        }
        result
    }

    async fn notify(&self, notice: &AllocationNotice) -> Result<String, GatewayError> {
        let result = self.send_notification(notice).await;
        record_gateway_request(result.is_ok());
        result
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn transport_kind(&self) -> TransportKind {
        TransportKind::Socket
    }
}
