//! REST 回收厂服务入口。

use plant_api::{AppState, create_app};
use plant_config::AppConfig;
use plant_storage::{CapacitySeeder, CapacityStore, InMemoryAllocationStore, InMemoryCapacityStore};
use plant_telemetry::init_tracing;
use domain::CapacityDate;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let api_token = config.require_api_token()?.to_string();

    // 产能表在进程启动时创建一次，所有 handler 共享
    let capacity_store = Arc::new(InMemoryCapacityStore::new());
    let mut seeder = CapacitySeeder::new(config.seed_min_tons, config.seed_max_tons);
    if let Some(seed) = config.seed {
        seeder = seeder.with_seed(seed);
    }
    let seeded = capacity_store
        .initialize_window(CapacityDate::today(), config.seed_days, &seeder)
        .await?;
    info!(days = seeded.len(), seed = ?config.seed, "capacity window seeded");

    let state = AppState::new(
        capacity_store,
        Arc::new(InMemoryAllocationStore::new()),
        api_token,
    );
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(addr = %config.http_addr, "plant api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for ctrl-c: {}", e);
            }
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
