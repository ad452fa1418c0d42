//! TCP 服务器实现
//!
//! 监听 TCP 端口，为每个接入连接派生独立任务处理行协议请求。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! let config = ProtocolServerConfig::default();
//! let server = ProtocolServer::bind(config, store).await?;
//! server.serve(async { let _ = tokio::signal::ctrl_c().await; }).await?;
//! ```

use crate::error::ProtocolError;
use crate::handler::ConnectionHandler;
use plant_storage::CapacityStore;
use plant_telemetry::{new_connection_id, record_connection_accepted, record_connection_rejected};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tracing::{Instrument, error, info, info_span, warn};

/// 连接数已满时发给新连接的响应行。
pub const SERVER_BUSY_LINE: &str = "ERROR|Server busy\n";

/// TCP 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口（0 表示由系统分配）
    #[serde(default = "default_port")]
    pub listen_port: u16,
    /// 最大并发连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// 空闲超时（秒），0 表示不限
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    /// accept 失败后的退避（毫秒），避免文件描述符耗尽时空转
    #[serde(default = "default_accept_backoff")]
    pub accept_backoff_ms: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_max_connections() -> usize {
    100
}

fn default_idle_timeout() -> u64 {
    300
}

fn default_accept_backoff() -> u64 {
    100
}

impl Default for ProtocolServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            listen_port: default_port(),
            max_connections: default_max_connections(),
            idle_timeout_secs: default_idle_timeout(),
            accept_backoff_ms: default_accept_backoff(),
        }
    }
}

impl ProtocolServerConfig {
    /// 从 JSON 配置字符串解析
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(json).map_err(|e| ProtocolError::ConfigParse(e.to_string()))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.listen_port)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }

    pub fn accept_backoff(&self) -> Duration {
        Duration::from_millis(self.accept_backoff_ms.max(1))
    }
}

/// 行协议 TCP 服务器
pub struct ProtocolServer {
    config: ProtocolServerConfig,
    listener: TcpListener,
    store: Arc<dyn CapacityStore>,
    limiter: Arc<Semaphore>,
}

impl ProtocolServer {
    /// 绑定监听端口；端口被占用等错误在此返回。
    pub async fn bind(
        config: ProtocolServerConfig,
        store: Arc<dyn CapacityStore>,
    ) -> Result<Self, ProtocolError> {
        if config.max_connections == 0 {
            return Err(ProtocolError::ConfigParse(
                "max_connections must be greater than 0".to_string(),
            ));
        }
        let addr = config.bind_addr();
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            ProtocolError::Connection(format!("failed to bind {addr}: {e}"))
        })?;
        let limiter = Arc::new(Semaphore::new(config.max_connections));

        Ok(Self {
            config,
            listener,
            store,
            limiter,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ProtocolError> {
        Ok(self.listener.local_addr()?)
    }

    pub fn config(&self) -> &ProtocolServerConfig {
        &self.config
    }

    /// 运行服务器直到 `shutdown` 完成；随后停止接收新连接，已建立的连接继续处理至关闭。
    pub async fn serve<F>(self, shutdown: F) -> Result<(), ProtocolError>
    where
        F: Future<Output = ()> + Send,
    {
        let local_addr = self.local_addr()?;
        info!(
            addr = %local_addr,
            max_connections = self.config.max_connections,
            idle_timeout_secs = self.config.idle_timeout_secs,
            "tcp server listening"
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(addr = %local_addr, "shutdown requested, listener closed");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer_addr)) => self.dispatch(stream, peer_addr),
                    Err(e) => {
                        error!("failed to accept connection: {}", e);
                        tokio::select! {
                            _ = &mut shutdown => {
                                info!(addr = %local_addr, "shutdown requested, listener closed");
                                break;
                            }
                            _ = tokio::time::sleep(self.config.accept_backoff()) => {}
                        }
                    }
                },
            }
        }

        Ok(())
    }

    /// 不带停止信号运行。
    pub async fn run(self) -> Result<(), ProtocolError> {
        self.serve(std::future::pending()).await
    }

    fn dispatch(&self, stream: TcpStream, peer_addr: SocketAddr) {
        let permit = match Arc::clone(&self.limiter).try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!(peer = %peer_addr, "connection limit reached, rejecting");
                record_connection_rejected();
                tokio::spawn(async move {
                    let mut stream = stream;
                    let _ = stream.write_all(SERVER_BUSY_LINE.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
                return;
            }
        };

        record_connection_accepted();
        let connection_id = new_connection_id();
        info!(peer = %peer_addr, connection_id = %connection_id, "new connection");

        let handler = ConnectionHandler::new(Arc::clone(&self.store), peer_addr.to_string())
            .with_idle_timeout(self.config.idle_timeout());
        let span = info_span!("connection", connection_id = %connection_id, peer = %peer_addr);

        tokio::spawn(
            async move {
                let _permit = permit;
                if let Err(e) = handler.run(stream).await {
                    warn!("connection error from {}: {}", peer_addr, e);
                }
            }
            .instrument(span),
        );
    }
}
