//! 协调端产能探测。
//!
//! 用法：`capacity-probe [dd-MM-yyyy] [回收厂名称]`
//!
//! 日期缺省为今天；未指定名称时查询 `PLANT_GATEWAYS` 中的所有回收厂。

use domain::CapacityDate;
use plant_config::AppConfig;
use plant_gateway::{GatewayFactory, GatewayRegistry, PlantGateway};
use plant_telemetry::init_tracing;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let mut args = std::env::args().skip(1);
    let date = match args.next() {
        Some(value) => CapacityDate::parse(&value)?,
        None => CapacityDate::today(),
    };
    let only = args.next();

    let registry = GatewayRegistry::from_endpoints(&GatewayFactory::default(), &config.gateways)?;
    if registry.is_empty() {
        warn!("no plants configured, set PLANT_GATEWAYS=name=kind@address[#token],...");
        return Ok(());
    }

    let targets: Vec<(&str, &Arc<dyn PlantGateway>)> = registry
        .iter()
        .filter(|(name, _)| only.as_deref().is_none_or(|only| only == *name))
        .collect();
    if targets.is_empty() {
        return Err(format!("unknown plant: {}", only.unwrap_or_default()).into());
    }

    info!(date = %date, plants = targets.len(), "querying capacity");
    for (name, gateway) in targets {
        match gateway.query_capacity(date).await {
            Ok(value) => println!("{name}\t{}\t{date}\t{value:.2}", gateway.transport_kind()),
            Err(e) => println!("{name}\t{}\t{date}\t{}: {e}", gateway.transport_kind(), e.category()),
        }
    }
    Ok(())
}
