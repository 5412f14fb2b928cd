//! MQTT → InfluxDB 桥接：订阅 topic 掩码，批量写入时序库。

mod cli;
mod monitor;

use bridge_config::AppConfig;
use bridge_ingest::{IngressHandler, MqttBus, MqttSourceConfig};
use bridge_pipeline::{BatchQueue, BatchWriter};
use bridge_storage::{InfluxConfig, InfluxStore};
use bridge_telemetry::init_tracing;
use clap::Parser;
use cli::Cli;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    // 初始化结构化日志
    init_tracing();
    // 环境变量为底，命令行参数覆盖
    let config = AppConfig::from_env()?
        .with_overrides(cli.into_overrides())
        .validate()?;

    // MQTT 连接与订阅
    let mut bus = MqttBus::connect(MqttSourceConfig {
        host: config.mqtt_host.clone(),
        port: config.mqtt_port,
        username: config.mqtt_username.clone(),
        password: config.mqtt_password.clone(),
        topic: config.topic.clone(),
    })
    .await?;

    // InfluxDB 写入端，仅由写入任务使用
    let influx = InfluxConfig::new(
        config.influx_host.clone(),
        config.influx_port,
        config.influx_database.clone(),
    )
    .with_credentials(
        config.influx_username.clone(),
        config.influx_password.clone(),
    );
    let store = InfluxStore::new(influx)?;
    info!(
        target: "bridge.pipeline",
        url = %store.write_url(),
        database = %config.influx_database,
        "influx_store_ready"
    );

    // 接入 → 队列 → 写入任务
    let queue = Arc::new(BatchQueue::new());
    let handler = IngressHandler::new(queue.clone(), bus.origin());
    let writer = BatchWriter::new(queue, Arc::new(store)).spawn();

    // 任一侧失败即退出（非零退出码）
    monitor::supervise(&mut bus, &handler, writer).await?;
    Ok(())
}
