//! 认证中间件
//!
//! - request_context：注入 request_id/trace_id，并写回响应头
//! - require_bearer：校验 `Authorization: Bearer <token>`（常量时间比较）
//! - bearer_token：从 Authorization 头提取 token

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::Response,
};
use plant_telemetry::new_request_ids;
use subtle::ConstantTimeEq;
use tracing::{Instrument, info_span, warn};

use crate::AppState;
use crate::utils::response::auth_error;

/// 请求上下文中间件：注入 request_id/trace_id
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ids = new_request_ids();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(ids.clone());

    let span = info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %method,
        path = %path
    );

    let mut response: Response = next.run(req).instrument(span).await;
    response.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&ids.request_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response.headers_mut().insert(
        "x-trace-id",
        HeaderValue::from_str(&ids.trace_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response
}

/// Bearer token 校验中间件
pub async fn require_bearer(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let authorized = bearer_token(req.headers())
        .is_some_and(|token| token_matches(token, &state.api_token));
    if !authorized {
        warn!(path = %req.uri().path(), "missing or invalid bearer token");
        return auth_error(StatusCode::UNAUTHORIZED);
    }
    next.run(req).await
}

/// 从请求头中提取 Bearer token
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header_value = headers.get(header::AUTHORIZATION)?;
    let auth_str = header_value.to_str().ok()?;
    auth_str.strip_prefix("Bearer ")
}

fn token_matches(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
