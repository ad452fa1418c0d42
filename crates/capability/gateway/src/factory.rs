//! 网关工厂与注册表
//!
//! `GatewayFactory` 按端点的传输类型构造网关（枚举分发，不做运行时类型判断）；
//! `GatewayRegistry` 维护“回收厂名称 → 网关”的查找表。

use crate::error::GatewayError;
use crate::http::{HttpGateway, HttpGatewayConfig};
use crate::socket::{SocketGateway, SocketGatewayConfig};
use crate::traits::PlantGateway;
use async_trait::async_trait;
use domain::{AllocationNotice, CapacityDate, GatewayEndpoint, TransportKind};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// 两种传输实现的标签联合。
#[derive(Debug, Clone)]
pub enum AnyGateway {
    Http(HttpGateway),
    Socket(SocketGateway),
}

#[async_trait]
impl PlantGateway for AnyGateway {
    async fn query_capacity(&self, date: CapacityDate) -> Result<f64, GatewayError> {
        match self {
            Self::Http(gateway) => gateway.query_capacity(date).await,
            Self::Socket(gateway) => gateway.query_capacity(date).await,
        }
    }

    async fn notify(&self, notice: &AllocationNotice) -> Result<String, GatewayError> {
        match self {
            Self::Http(gateway) => gateway.notify(notice).await,
            Self::Socket(gateway) => gateway.notify(notice).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Http(gateway) => gateway.name(),
            Self::Socket(gateway) => gateway.name(),
        }
    }

    fn transport_kind(&self) -> TransportKind {
        match self {
            Self::Http(_) => TransportKind::Http,
            Self::Socket(_) => TransportKind::Socket,
        }
    }
}

/// 网关工厂
#[derive(Debug, Clone, Default)]
pub struct GatewayFactory {
    http: HttpGatewayConfig,
    socket: SocketGatewayConfig,
}

impl GatewayFactory {
    pub fn new(http: HttpGatewayConfig, socket: SocketGatewayConfig) -> Self {
        Self { http, socket }
    }

    /// 按端点传输类型构造网关。
    pub fn create(&self, endpoint: &GatewayEndpoint) -> Result<AnyGateway, GatewayError> {
        let gateway = match endpoint.kind() {
            TransportKind::Http => {
                AnyGateway::Http(HttpGateway::with_config(endpoint, self.http.clone())?)
            }
            TransportKind::Socket => {
                AnyGateway::Socket(SocketGateway::with_config(endpoint, self.socket.clone())?)
            }
        };
        Ok(gateway)
    }
}

/// 回收厂网关注册表
#[derive(Clone, Default)]
pub struct GatewayRegistry {
    gateways: BTreeMap<String, Arc<dyn PlantGateway>>,
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用工厂为每个端点构造网关；名称重复时报配置错误。
    pub fn from_endpoints(
        factory: &GatewayFactory,
        endpoints: &[GatewayEndpoint],
    ) -> Result<Self, GatewayError> {
        let mut registry = Self::new();
        for endpoint in endpoints {
            let gateway = factory.create(endpoint)?;
            registry.register(Arc::new(gateway))?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, gateway: Arc<dyn PlantGateway>) -> Result<(), GatewayError> {
        let name = gateway.name().to_string();
        if self.gateways.contains_key(&name) {
            return Err(GatewayError::Config(format!("duplicate plant name: {name}")));
        }
        info!(plant = %name, transport = %gateway.transport_kind(), "gateway registered");
        self.gateways.insert(name, gateway);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn PlantGateway>> {
        self.gateways.get(name).cloned()
    }

    /// 按名称查询产能；未注册的名称报配置错误。
    pub async fn query_capacity(&self, name: &str, date: CapacityDate) -> Result<f64, GatewayError> {
        let gateway = self
            .get(name)
            .ok_or_else(|| GatewayError::Config(format!("unknown plant: {name}")))?;
        gateway.query_capacity(date).await
    }

    /// 按名称顺序排列的网关名列表。
    pub fn names(&self) -> Vec<&str> {
        self.gateways.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn PlantGateway>)> {
        self.gateways.iter().map(|(name, gateway)| (name.as_str(), gateway))
    }

    pub fn len(&self) -> usize {
        self.gateways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gateways.is_empty()
    }
}
