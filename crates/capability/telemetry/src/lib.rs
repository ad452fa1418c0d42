//! 日志初始化、追踪 ID 与基础计数指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub connections_accepted: u64,
    pub connections_rejected: u64,
    pub connections_closed: u64,
    pub commands_processed: u64,
    pub commands_failed: u64,
    pub notifications_received: u64,
    pub reservations_accepted: u64,
    pub reservations_rejected: u64,
    pub gateway_requests: u64,
    pub gateway_failures: u64,
}

/// 进程级计数指标。
pub struct TelemetryMetrics {
    connections_accepted: AtomicU64,
    connections_rejected: AtomicU64,
    connections_closed: AtomicU64,
    commands_processed: AtomicU64,
    commands_failed: AtomicU64,
    notifications_received: AtomicU64,
    reservations_accepted: AtomicU64,
    reservations_rejected: AtomicU64,
    gateway_requests: AtomicU64,
    gateway_failures: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            connections_accepted: AtomicU64::new(0),
            connections_rejected: AtomicU64::new(0),
            connections_closed: AtomicU64::new(0),
            commands_processed: AtomicU64::new(0),
            commands_failed: AtomicU64::new(0),
            notifications_received: AtomicU64::new(0),
            reservations_accepted: AtomicU64::new(0),
            reservations_rejected: AtomicU64::new(0),
            gateway_requests: AtomicU64::new(0),
            gateway_failures: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_accepted: self.connections_accepted.load(Ordering::Relaxed),
            connections_rejected: self.connections_rejected.load(Ordering::Relaxed),
            connections_closed: self.connections_closed.load(Ordering::Relaxed),
            commands_processed: self.commands_processed.load(Ordering::Relaxed),
            commands_failed: self.commands_failed.load(Ordering::Relaxed),
            notifications_received: self.notifications_received.load(Ordering::Relaxed),
            reservations_accepted: self.reservations_accepted.load(Ordering::Relaxed),
            reservations_rejected: self.reservations_rejected.load(Ordering::Relaxed),
            gateway_requests: self.gateway_requests.load(Ordering::Relaxed),
            gateway_failures: self.gateway_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info，可用 RUST_LOG 覆盖）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 生成 TCP 连接标识（日志 span 使用）。
pub fn new_connection_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// 记录接受的连接。
pub fn record_connection_accepted() {
    metrics().connections_accepted.fetch_add(1, Ordering::Relaxed);
}

/// 记录因连接数上限被拒绝的连接。
pub fn record_connection_rejected() {
    metrics().connections_rejected.fetch_add(1, Ordering::Relaxed);
}

/// 记录关闭的连接。
pub fn record_connection_closed() {
    metrics().connections_closed.fetch_add(1, Ordering::Relaxed);
}

/// 记录处理的命令；`ok = false` 表示回复了 ERROR。
pub fn record_command(ok: bool) {
    let metrics = metrics();
    metrics.commands_processed.fetch_add(1, Ordering::Relaxed);
    if !ok {
        metrics.commands_failed.fetch_add(1, Ordering::Relaxed);
    }
}

/// 记录收到的装载通知。
pub fn record_notification() {
    metrics()
        .notifications_received
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录产能预留结果。
pub fn record_reservation(accepted: bool) {
    let metrics = metrics();
    if accepted {
        metrics.reservations_accepted.fetch_add(1, Ordering::Relaxed);
    } else {
        metrics.reservations_rejected.fetch_add(1, Ordering::Relaxed);
    }
}

/// 记录网关调用结果。
pub fn record_gateway_request(ok: bool) {
    let metrics = metrics();
    metrics.gateway_requests.fetch_add(1, Ordering::Relaxed);
    if !ok {
        metrics.gateway_failures.fetch_add(1, Ordering::Relaxed);
    }
}
