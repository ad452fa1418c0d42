//! 行协议回收厂服务入口。
//!
//! 启动时为今天起的若干天生成演示产能，随后在配置端口上提供行协议服务，
//! Ctrl-C 后停止接收新连接并退出。

use domain::CapacityDate;
use plant_config::AppConfig;
use plant_protocol::{ProtocolServer, ProtocolServerConfig};
use plant_storage::{CapacitySeeder, CapacityStore, InMemoryCapacityStore};
use plant_telemetry::{init_tracing, metrics};
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

    // 产能表在进程启动时创建一次，所有连接共享
    let store = Arc::new(InMemoryCapacityStore::new());
    let mut seeder = CapacitySeeder::new(config.seed_min_tons, config.seed_max_tons);
    if let Some(seed) = config.seed {
        seeder = seeder.with_seed(seed);
    }
    let seeded = store
        .initialize_window(CapacityDate::today(), config.seed_days, &seeder)
        .await?;
    for record in &seeded {
        info!(date = %record.date, total_tons = record.total_tons, "seeded capacity");
    }

    let server_config = ProtocolServerConfig {
        host: config.socket_host.clone(),
        listen_port: config.socket_port,
        max_connections: config.max_connections,
        idle_timeout_secs: config.idle_timeout_seconds,
        ..ProtocolServerConfig::default()
    };
    let server = ProtocolServer::bind(server_config, store).await?;

    server
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for ctrl-c: {}", e);
            }
        })
        .await?;

    let snapshot = metrics().snapshot();
    info!(
        connections = snapshot.connections_accepted,
        rejected = snapshot.connections_rejected,
        commands = snapshot.commands_processed,
        failed = snapshot.commands_failed,
        notifications = snapshot.notifications_received,
        "protocol server stopped"
    );
    Ok(())
}
