//! 单连接处理
//!
//! 每个连接由一个 `ConnectionHandler` 在独立任务中驱动，状态流转：
//!
//! ```text
//! Reading ──行──▶ Processing ──▶ Responding ──▶ Reading
//!    │                               │
//!    └── EOF / 空闲超时 / IO 错误 ──▶ Closed ◀── SALIR / 内部错误
//! ```
//!
//! 输入按字节读取后有损解码为 UTF-8，非法字节不会中断连接，而是作为普通命令回复 `ERROR`。
//! 单行超过 [`MAX_LINE_BYTES`] 时丢弃至下一个换行并回复 `ERROR|Line too long`。

use crate::codec::{self, Command, Response};
use crate::error::ProtocolError;
use plant_storage::{CapacityStore, StorageError};
use plant_telemetry::{record_command, record_connection_closed, record_notification};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tracing::{debug, info, warn};

/// 内部错误时发给客户端的最后一行。
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

const LINE_TOO_LONG_MESSAGE: &str = "Line too long";

/// 单行上限（字节，含换行符）。
pub const MAX_LINE_BYTES: usize = 8 * 1024;

/// 一次读取的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Line,
    TooLong,
    Closed,
}

/// 连接状态
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    Reading,
    Processing,
    Responding { response: Response, close: bool },
    Closed,
}

/// 单连接处理器
pub struct ConnectionHandler {
    store: Arc<dyn CapacityStore>,
    peer: String,
    idle_timeout: Option<Duration>,
}

impl ConnectionHandler {
    pub fn new(store: Arc<dyn CapacityStore>, peer: impl Into<String>) -> Self {
        Self {
            store,
            peer: peer.into(),
            idle_timeout: None,
        }
    }

    /// 读等待超过该时长即关闭连接；`None` 表示不限。
    pub fn with_idle_timeout(mut self, idle_timeout: Option<Duration>) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// 驱动连接直到关闭；返回时连接资源已释放。
    pub async fn run<S>(self, stream: S) -> Result<(), ProtocolError>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send,
    {
        let (reader, mut writer) = tokio::io::split(stream);
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::with_capacity(256);
        let mut line = String::new();
        let mut state = ConnectionState::Reading;

        let result = loop {
            state = match state {
                ConnectionState::Reading => match self.read_line(&mut reader, &mut buf).await {
                    Ok(Frame::Line) => {
                        line = String::from_utf8_lossy(&buf).into_owned();
                        ConnectionState::Processing
                    }
                    Ok(Frame::TooLong) => {
                        warn!(peer = %self.peer, limit = MAX_LINE_BYTES, "line too long, discarded");
                        record_command(false);
                        ConnectionState::Responding {
                            response: Response::Error(LINE_TOO_LONG_MESSAGE.to_string()),
                            close: false,
                        }
                    }
                    Ok(Frame::Closed) => ConnectionState::Closed,
                    Err(e) => break Err(e),
                },
                ConnectionState::Processing => match self.process(&line).await {
                    Ok((response, close)) => ConnectionState::Responding { response, close },
                    Err(e) => {
                        let reply = Response::Error(INTERNAL_ERROR_MESSAGE.to_string());
                        let _ = write_response(&mut writer, &reply).await;
                        break Err(e);
                    }
                },
                ConnectionState::Responding { response, close } => {
                    if let Err(e) = write_response(&mut writer, &response).await {
                        break Err(e);
                    }
                    if close {
                        ConnectionState::Closed
                    } else {
                        ConnectionState::Reading
                    }
                }
                ConnectionState::Closed => break Ok(()),
            };
        };

        let _ = writer.shutdown().await;
        record_connection_closed();
        info!(peer = %self.peer, "connection closed");
        result
    }

    /// 读取一行原始字节；EOF 或空闲超时返回 `Frame::Closed`。
    async fn read_line<R>(&self, reader: &mut R, buf: &mut Vec<u8>) -> Result<Frame, ProtocolError>
    where
        R: AsyncBufRead + Unpin,
    {
        let frame = match self.idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, read_frame(reader, buf)).await {
                Ok(frame) => frame?,
                Err(_) => {
                    info!(peer = %self.peer, idle_secs = limit.as_secs_f64(), "idle timeout");
                    return Ok(Frame::Closed);
                }
            },
            None => read_frame(reader, buf).await?,
        };

        if frame == Frame::Closed {
            debug!(peer = %self.peer, "peer closed connection");
        }
        Ok(frame)
    }

    /// 处理一行请求，返回响应以及是否随后关闭连接。
    async fn process(&self, line: &str) -> Result<(Response, bool), ProtocolError> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(err) => {
                debug!(peer = %self.peer, request = line.trim(), error = %err, "rejected command");
                record_command(false);
                return Ok((Response::Error(err.to_string()), false));
            }
        };
        debug!(peer = %self.peer, verb = command.verb(), "processing command");

        let outcome = match command {
            Command::Capacity(date) => match self.store.query(date).await {
                Ok(available) => (Response::capacity(available), false),
                Err(StorageError::NotFound(_)) => (codec::no_capacity(date), false),
                Err(err) => {
                    warn!(peer = %self.peer, error = %err, "capacity query failed");
                    record_command(false);
                    return Err(ProtocolError::Internal(err.to_string()));
                }
            },
            Command::Notify {
                containers,
                packages,
            } => {
                info!(peer = %self.peer, containers, packages, "allocation notification received");
                record_notification();
                (
                    Response::Ok(format!(
                        "Notification received: {containers} containers, {packages} packages"
                    )),
                    false,
                )
            }
            Command::Quit => (Response::Goodbye, true),
        };

        record_command(outcome.0.is_ok());
        Ok(outcome)
    }
}

/// 读到换行、EOF 或 `MAX_LINE_BYTES` 为止；超长行的剩余部分按块丢弃。
async fn read_frame<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let read = (&mut *reader)
        .take(MAX_LINE_BYTES as u64)
        .read_until(b'\n', buf)
        .await?;
    if read == 0 {
        return Ok(Frame::Closed);
    }
    if read < MAX_LINE_BYTES || buf.last() == Some(&b'\n') {
        return Ok(Frame::Line);
    }

    loop {
        buf.clear();
        let read = (&mut *reader)
            .take(MAX_LINE_BYTES as u64)
            .read_until(b'\n', buf)
            .await?;
        if read == 0 || buf.last() == Some(&b'\n') {
            break;
        }
    }
    buf.clear();
    Ok(Frame::TooLong)
}

async fn write_response<W>(writer: &mut W, response: &Response) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = response.encode();
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
