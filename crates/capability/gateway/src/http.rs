//! HTTP 网关实现
//!
//! - 查询：`GET {base_url}/capacity?fecha=dd-MM-yyyy`，响应体为裸数值
//! - 通知：`POST {base_url}/allocations`，响应为 `ApiResponse<AllocationDto>`
//!
//! 请求携带 `Authorization: Bearer <token>`（端点配置了凭据时）。

use crate::error::GatewayError;
use crate::traits::PlantGateway;
use api_contract::{AllocationDto, AllocationRequest, ApiResponse};
use async_trait::async_trait;
use domain::{AllocationNotice, CapacityDate, GatewayEndpoint, TransportKind};
use plant_telemetry::record_gateway_request;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// 被回收厂拒绝的分配状态。
const REJECTED_STATUS: &str = "REJECTED";

/// HTTP 网关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpGatewayConfig {
    /// 连接超时（毫秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
    /// 整体请求超时（毫秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_request_timeout() -> u64 {
    10000
}

impl Default for HttpGatewayConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl HttpGatewayConfig {
    pub fn from_json(json: &str) -> Result<Self, GatewayError> {
        serde_json::from_str(json).map_err(|e| GatewayError::Config(e.to_string()))
    }
}

/// HTTP 网关
#[derive(Debug, Clone)]
pub struct HttpGateway {
    name: String,
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl HttpGateway {
    pub fn new(endpoint: &GatewayEndpoint) -> Result<Self, GatewayError> {
        Self::with_config(endpoint, HttpGatewayConfig::default())
    }

    pub fn with_config(
        endpoint: &GatewayEndpoint,
        config: HttpGatewayConfig,
    ) -> Result<Self, GatewayError> {
        if endpoint.kind() != TransportKind::Http {
            return Err(GatewayError::Config(format!(
                "endpoint {} is not an http endpoint",
                endpoint.display_name()
            )));
        }
        let base_url = endpoint.address().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(GatewayError::Config(format!(
                "base url must start with http:// or https://: {base_url}"
            )));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            name: endpoint.display_name().to_string(),
            base_url,
            token: endpoint.credential().map(str::to_string),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch_capacity(&self, date: CapacityDate) -> Result<f64, GatewayError> {
        let url = format!("{}/capacity?fecha={}", self.base_url, date);
        debug!(plant = %self.name, url = %url, "querying capacity over http");

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("GET {url} failed: {e}")))?;

        match response.status() {
            status if status.is_success() => {
                let body = response
                    .text()
                    .await
                    .map_err(|e| GatewayError::Transport(format!("failed to read body: {e}")))?;
                body.trim().parse::<f64>().map_err(|_| {
                    GatewayError::Protocol(format!("expected a numeric body, got: {}", body.trim()))
                })
            }
            StatusCode::NOT_FOUND => Err(GatewayError::Unavailable(format!(
                "no capacity for {date} at {}",
                self.name
            ))),
            status => {
                let text = response.text().await.unwrap_or_default();
                Err(GatewayError::Transport(format!("HTTP {status}: {}", text.trim())))
            }
        }
    }

    async fn submit_allocation(&self, notice: &AllocationNotice) -> Result<String, GatewayError> {
        let url = format!("{}/allocations", self.base_url);
        let request = AllocationRequest {
            date: notice.date,
            total_containers: notice.containers,
            total_packages: notice.packages,
            estimated_weight_tons: notice.estimated_weight_tons,
            assigned_by: notice.assigned_by.clone(),
            container_ids: notice.container_ids.clone(),
        };
        debug!(plant = %self.name, url = %url, date = %notice.date, "submitting allocation");

        let response = self
            .authorize(self.client.post(&url))
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("POST {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::Transport(format!("HTTP {status}: {}", text.trim())));
        }

        let body: ApiResponse<AllocationDto> = response
            .json()
            .await
            .map_err(|e| GatewayError::Protocol(format!("invalid allocation response: {e}")))?;
        let allocation = match body {
            ApiResponse {
                success: true,
                data: Some(allocation),
                ..
            } => allocation,
            ApiResponse { error, .. } => {
                let message = error.map(|e| e.message).unwrap_or_default();
                return Err(GatewayError::Protocol(format!(
                    "allocation response without data: {message}"
                )));
            }
        };

        let message = allocation.message.unwrap_or_default();
        if allocation.status == REJECTED_STATUS {
            return Err(GatewayError::Rejected(message));
        }
        Ok(format!("allocation {} {}: {}", allocation.id, allocation.status, message))
    }
}

#[async_trait]
impl PlantGateway for HttpGateway {
    async fn query_capacity(&self, date: CapacityDate) -> Result<f64, GatewayError> {
        let result = self.fetch_capacity(date).await;
        record_gateway_request(result.is_ok());
        if let Err(e) = &result {
            warn!(plant = %self.name, date = %date, category = e.category(), error = %e, "http capacity query failed");
        }
        result
    }

    async fn notify(&self, notice: &AllocationNotice) -> Result<String, GatewayError> {
        let result = self.submit_allocation(notice).await;
        record_gateway_request(result.is_ok());
        result
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn transport_kind(&self) -> TransportKind {
        TransportKind::Http
    }
}
