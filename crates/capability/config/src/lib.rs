//! 应用运行配置加载。

use domain::GatewayEndpoint;
use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub socket_host: String,
    pub socket_port: u16,
    pub max_connections: usize,
    pub idle_timeout_seconds: u64,
    pub http_addr: String,
    pub api_token: Option<String>,
    pub seed_days: u64,
    pub seed: Option<u64>,
    pub seed_min_tons: f64,
    pub seed_max_tons: f64,
    pub gateways: Vec<GatewayEndpoint>,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let socket_host = env::var("PLANT_SOCKET_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let socket_port = read_u16_with_default("PLANT_SOCKET_PORT", 8090)?;
        let max_connections = read_u64_with_default("PLANT_MAX_CONNECTIONS", 100)? as usize;
        let idle_timeout_seconds = read_u64_with_default("PLANT_IDLE_TIMEOUT_SECONDS", 300)?;
        let http_addr =
            env::var("PLANT_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8083".to_string());
        let api_token = read_optional("PLANT_API_TOKEN");
        let seed_days = read_u64_with_default("PLANT_SEED_DAYS", 10)?;
        let seed = read_optional_u64("PLANT_SEED")?;
        let seed_min_tons = read_f64_with_default("PLANT_SEED_MIN_TONS", 80.0)?;
        let seed_max_tons = read_f64_with_default("PLANT_SEED_MAX_TONS", 150.0)?;
        if seed_min_tons <= 0.0 || seed_max_tons < seed_min_tons {
            return Err(ConfigError::Invalid(
                "PLANT_SEED_MAX_TONS".to_string(),
                format!("{seed_min_tons}..{seed_max_tons}"),
            ));
        }
        let gateways = read_gateways("PLANT_GATEWAYS")?;

        Ok(Self {
            socket_host,
            socket_port,
            max_connections,
            idle_timeout_seconds,
            http_addr,
            api_token,
            seed_days,
            seed,
            seed_min_tons,
            seed_max_tons,
            gateways,
        })
    }

    /// REST 服务必须配置 bearer token。
    pub fn require_api_token(&self) -> Result<&str, ConfigError> {
        self.api_token
            .as_deref()
            .ok_or_else(|| ConfigError::Missing("PLANT_API_TOKEN".to_string()))
    }
}

/// 解析 `name=kind@address[#token]`，多个条目以逗号分隔。
pub fn parse_gateways(value: &str) -> Result<Vec<GatewayEndpoint>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            GatewayEndpoint::parse_entry(entry)
                .map_err(|err| ConfigError::Invalid("PLANT_GATEWAYS".to_string(), err.to_string()))
        })
        .collect()
}

fn read_gateways(key: &str) -> Result<Vec<GatewayEndpoint>, ConfigError> {
    match env::var(key) {
        Ok(value) => parse_gateways(&value),
        Err(_) => Ok(Vec::new()),
    }
}

fn read_u16_with_default(key: &str, default: u16) -> Result<u16, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u16>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_f64_with_default(key: &str, default: f64) -> Result<f64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or(ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_optional_u64(key: &str) -> Result<Option<u64>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key.to_string(), value)),
        Err(_) => Ok(None),
    }
}
