//! 行协议编解码
//!
//! 每条消息一行（`\n` 结尾），字段以 `|` 分隔：
//!
//! | 请求 | 成功 | 失败 |
//! |---|---|---|
//! | `CAPACIDAD|dd-MM-yyyy` | `OK|123.45` | `ERROR|消息` |
//! | `NOTIFICAR|容器数|包装数` | `OK|消息` | `ERROR|消息` |
//! | `SALIR` | `ADIOS` | 无 |

use crate::error::ProtocolError;
use domain::{CapacityDate, DateParseError};
use std::fmt;

pub const VERB_CAPACITY: &str = "CAPACIDAD";
pub const VERB_NOTIFY: &str = "NOTIFICAR";
pub const VERB_QUIT: &str = "SALIR";

pub const STATUS_OK: &str = "OK";
pub const STATUS_ERROR: &str = "ERROR";
pub const STATUS_GOODBYE: &str = "ADIOS";

pub const FIELD_SEPARATOR: char = '|';

/// 无产能记录时 ERROR 消息的固定前缀，网关据此映射为 Unavailable。
pub const NO_CAPACITY_MESSAGE: &str = "No capacity available for date";

/// 西班牙语版本回收厂使用的同义前缀，仅用于识别对端回复。
pub const NO_CAPACITY_MESSAGE_ES: &str = "No hay capacidad disponible";

/// 单条命令的校验错误；服务端回复 `ERROR|<消息>` 后保持连接。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}. Valid commands: CAPACIDAD, NOTIFICAR, SALIR")]
    UnknownVerb(String),
    #[error("Invalid format. Use: {0}")]
    Usage(&'static str),
    #[error("Invalid date format. Use: dd-MM-yyyy")]
    MalformedDate,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Container and package counts must be integers")]
    NotInteger,
    #[error("Container and package counts must be positive")]
    NotPositive,
}

/// 解析后的客户端请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Capacity(CapacityDate),
    Notify { containers: u32, packages: u32 },
    Quit,
}

impl Command {
    /// 解析一行请求；动词不区分大小写，字段两端空白被忽略。
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        let parts: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
        let verb = parts[0].to_ascii_uppercase();
        let args = &parts[1..];

        match verb.as_str() {
            VERB_CAPACITY => parse_capacity(args),
            VERB_NOTIFY => parse_notify(args),
            VERB_QUIT => Ok(Self::Quit),
            _ => Err(CommandError::UnknownVerb(verb)),
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Capacity(_) => VERB_CAPACITY,
            Self::Notify { .. } => VERB_NOTIFY,
            Self::Quit => VERB_QUIT,
        }
    }

    /// 编码为一行（不含换行符）。
    pub fn encode(&self) -> String {
        match self {
            Self::Capacity(date) => format!("{VERB_CAPACITY}{FIELD_SEPARATOR}{date}"),
            Self::Notify {
                containers,
                packages,
            } => format!("{VERB_NOTIFY}{FIELD_SEPARATOR}{containers}{FIELD_SEPARATOR}{packages}"),
            Self::Quit => VERB_QUIT.to_string(),
        }
    }
}

fn parse_capacity(args: &[&str]) -> Result<Command, CommandError> {
    let [date] = args else {
        return Err(CommandError::Usage("CAPACIDAD|dd-MM-yyyy"));
    };
    CapacityDate::parse(date)
        .map(Command::Capacity)
        .map_err(|err| match err {
            DateParseError::Malformed(_) => CommandError::MalformedDate,
            DateParseError::Invalid(value) => CommandError::InvalidDate(value),
        })
}

fn parse_notify(args: &[&str]) -> Result<Command, CommandError> {
    let [containers, packages] = args else {
        return Err(CommandError::Usage("NOTIFICAR|containers|packages"));
    };
    Ok(Command::Notify {
        containers: parse_count(containers)?,
        packages: parse_count(packages)?,
    })
}

fn parse_count(value: &str) -> Result<u32, CommandError> {
    let parsed = value.parse::<i64>().map_err(|_| CommandError::NotInteger)?;
    if parsed <= 0 {
        return Err(CommandError::NotPositive);
    }
    u32::try_from(parsed).map_err(|_| CommandError::NotInteger)
}

/// 服务端响应。
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Ok(String),
    Error(String),
    Goodbye,
}

impl Response {
    /// 产能值的成功响应。
    /// 产能值固定保留两位小数。
    pub fn capacity(value: f64) -> Self {
        Self::Ok(format!("{value:.2}"))
    }

    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Error(_))
    }

    /// 编码为一行（不含换行符）。
    pub fn encode(&self) -> String {
        match self {
            Self::Ok(payload) => format!("{STATUS_OK}{FIELD_SEPARATOR}{payload}"),
            Self::Error(message) => format!("{STATUS_ERROR}{FIELD_SEPARATOR}{message}"),
            Self::Goodbye => STATUS_GOODBYE.to_string(),
        }
    }

    /// 客户端解析响应行；状态字段区分大小写。
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim();
        if line == STATUS_GOODBYE {
            return Ok(Self::Goodbye);
        }
        match line.split_once(FIELD_SEPARATOR) {
            Some((STATUS_OK, payload)) => Ok(Self::Ok(payload.trim().to_string())),
            Some((STATUS_ERROR, message)) => Ok(Self::Error(message.trim().to_string())),
            _ => Err(ProtocolError::MalformedReply(line.to_string())),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// 判断 ERROR 消息是否表示“该日期无产能记录”。
/// 判断 `ERROR` 消息是否表示“该日期无产能记录”。
///
/// 网关据此把回复映射为不可用而非协议错误，因此与服务端的消息文本耦合：
/// 接受本服务的英文前缀以及西班牙语回收厂的原始前缀，其余文本一律视为协议错误。
pub fn is_no_capacity_message(message: &str) -> bool {
    message.starts_with(NO_CAPACITY_MESSAGE) || message.starts_with(NO_CAPACITY_MESSAGE_ES)
}

/// 构造“无产能记录”的 ERROR 响应。
pub fn no_capacity(date: CapacityDate) -> Response {
    Response::Error(format!("{NO_CAPACITY_MESSAGE}: {date}"))
}
