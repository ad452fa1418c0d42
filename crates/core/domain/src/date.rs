//! 产能日期（dd-MM-yyyy）。
//!
//! 行协议与 HTTP 接口都使用固定的 `dd-MM-yyyy` 文本格式：两位日、两位月、四位年。

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// chrono 格式串，对应 `dd-MM-yyyy`。
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// 日期解析错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("invalid date format, expected dd-MM-yyyy: {0}")]
    Malformed(String),
    #[error("date does not exist: {0}")]
    Invalid(String),
}

/// 产能表的键：不含时间部分的日历日。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CapacityDate(NaiveDate);

impl CapacityDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// 本地时区的今天。
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// 严格解析 `dd-MM-yyyy`，拒绝 `1-1-2025` 之类的写法和不存在的日期。
    pub fn parse(value: &str) -> Result<Self, DateParseError> {
        if !is_well_formed(value) {
            return Err(DateParseError::Malformed(value.to_string()));
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Self)
            .map_err(|_| DateParseError::Invalid(value.to_string()))
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// 向后偏移若干天；溢出时返回 None。
    pub fn add_days(&self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }
}

fn is_well_formed(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            2 | 5 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

impl fmt::Display for CapacityDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CapacityDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CapacityDate {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CapacityDate> for String {
    fn from(value: CapacityDate) -> Self {
        value.to_string()
    }
}

impl From<NaiveDate> for CapacityDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}
