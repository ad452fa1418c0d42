//! 输入验证辅助函数
//!
//! 失败时直接返回 bad_request_error 响应，handler 用 `match` 提前返回。

use crate::utils::response::bad_request_error;
use axum::response::Response;
use domain::CapacityDate;
use plant_storage::AllocationStatus;

/// 解析必填日期参数（dd-MM-yyyy）
pub fn parse_date(value: &str, field: &str) -> Result<CapacityDate, Response> {
    CapacityDate::parse(value).map_err(|err| bad_request_error(format!("{field}: {err}")))
}

/// 解析可选日期参数，空字符串视为未提供
pub fn parse_optional_date(
    value: Option<String>,
    field: &str,
) -> Result<Option<CapacityDate>, Response> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => parse_date(value, field).map(Some),
        _ => Ok(None),
    }
}

/// 解析可选分配状态，空字符串视为未提供
pub fn parse_optional_status(
    value: Option<String>,
    field: &str,
) -> Result<Option<AllocationStatus>, Response> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => parse_status(value, field).map(Some),
        _ => Ok(None),
    }
}

/// 解析分配状态（不区分大小写）
pub fn parse_status(value: &str, field: &str) -> Result<AllocationStatus, Response> {
    value
        .parse::<AllocationStatus>()
        .map_err(|err| bad_request_error(format!("{field}: {err}")))
}

/// 验证必填字段，去除空格并检查非空
pub fn normalize_required(value: String, field: &str) -> Result<String, Response> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(bad_request_error(format!("{field} required")));
    }
    Ok(trimmed.to_string())
}
