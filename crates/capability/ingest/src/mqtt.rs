//! MQTT 消息总线（rumqttc）
//!
//! 连接参数、订阅在 `connect` 中完成；`process` 每次轮询一次事件循环，
//! ConnAck 交给 `on_connect`，Publish 交给 `on_message`。
//! 不做重连：事件循环报错即返回错误。

use crate::{ConnectStatus, IngestError, MessageBus, MessageHandler};
use async_trait::async_trait;
use domain::{Envelope, Origin};
use rumqttc::{
    AsyncClient, ConnectReturnCode, ConnectionError, Event, EventLoop, MqttOptions, Packet, QoS,
};
use std::time::Duration;
use tracing::info;

/// 心跳间隔。
const KEEP_ALIVE: Duration = Duration::from_secs(30);
/// 收发报文上限，取 MQTT 协议允许的最大剩余长度（256 MiB）。
const MAX_PACKET_SIZE: usize = 268_435_455;

/// MQTT 采集源配置。
#[derive(Debug, Clone)]
pub struct MqttSourceConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// 订阅的 topic 模式（可含 `+` / `#` 通配符）。
    pub topic: String,
}

/// MQTT 总线连接。
pub struct MqttBus {
    // 保持请求通道存活，客户端全部释放后事件循环会终止
    _client: AsyncClient,
    eventloop: EventLoop,
    origin: Origin,
}

impl MqttBus {
    /// 建立连接参数并订阅 topic（实际连接在首次 `process` 时发生）。
    pub async fn connect(config: MqttSourceConfig) -> Result<Self, IngestError> {
        let client_id = format!("mqtt-influx-{}", now_epoch_ms());
        let options = mqtt_options(&config, &client_id);

        let (client, eventloop) = AsyncClient::new(options, 10);
        client
            .subscribe(config.topic.clone(), QoS::AtMostOnce)
            .await
            .map_err(|err| IngestError::Source(err.to_string()))?;
        info!(
            target: "bridge.ingest",
            host = %config.host,
            port = config.port,
            topic = %config.topic,
            client_id = %client_id,
            "mqtt_subscribed"
        );

        Ok(Self {
            _client: client,
            eventloop,
            origin: Origin::new(client_id),
        })
    }

    /// 本连接的来源标识（client id）。
    pub fn origin(&self) -> Origin {
        self.origin.clone()
    }
}

#[async_trait]
impl MessageBus for MqttBus {
    async fn process(&mut self, handler: &dyn MessageHandler) -> Result<(), IngestError> {
        match self.eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                handler.on_connect(connect_status(ack.code));
                Ok(())
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => handler.on_message(Envelope {
                topic: publish.topic,
                payload: publish.payload.to_vec(),
                retain: publish.retain,
            }),
            Ok(_) => Ok(()),
            Err(ConnectionError::ConnectionRefused(code)) => {
                let reason = format!("connection refused: {:?}", code);
                handler.on_connect(connect_status(code));
                Err(IngestError::Source(reason))
            }
            Err(err) => Err(IngestError::Source(err.to_string())),
        }
    }
}

fn mqtt_options(config: &MqttSourceConfig, client_id: &str) -> MqttOptions {
    let mut options = MqttOptions::new(client_id, config.host.clone(), config.port);
    options.set_keep_alive(KEEP_ALIVE);
    options.set_clean_session(true);
    options.set_max_packet_size(MAX_PACKET_SIZE, MAX_PACKET_SIZE);
    if let Some(username) = config.username.as_ref() {
        options.set_credentials(username, config.password.clone().unwrap_or_default());
    }
    options
}

fn connect_status(code: ConnectReturnCode) -> ConnectStatus {
    match code {
        ConnectReturnCode::Success => ConnectStatus::Accepted,
        other => ConnectStatus::Refused(format!("{:?}", other)),
    }
}

fn now_epoch_ms() -> i64 {
    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_config(username: Option<&str>) -> MqttSourceConfig {
        MqttSourceConfig {
            host: "broker.local".to_string(),
            port: 1884,
            username: username.map(str::to_string),
            password: Some("secret".to_string()),
            topic: "/devices/+/controls/+".to_string(),
        }
    }

    #[test]
    fn options_accept_large_payloads() {
        let options = mqtt_options(&source_config(None), "mqtt-influx-1");
        assert_eq!(options.max_packet_size(), MAX_PACKET_SIZE);
        assert!(options.max_packet_size() > 16 * 1024);
        assert_eq!(options.keep_alive(), KEEP_ALIVE);
        assert!(options.clean_session());
        assert_eq!(options.client_id(), "mqtt-influx-1");
        assert_eq!(options.broker_address(), ("broker.local".to_string(), 1884));
    }

    #[test]
    fn options_carry_credentials_only_with_username() {
        let options = mqtt_options(&source_config(None), "c");
        assert!(options.credentials().is_none());

        let options = mqtt_options(&source_config(Some("reader")), "c");
        assert!(options.credentials().is_some());
    }

    #[test]
    fn connect_status_maps_return_codes() {
        assert_eq!(
            connect_status(ConnectReturnCode::Success),
            ConnectStatus::Accepted
        );
        assert_eq!(
            connect_status(ConnectReturnCode::BadUserNamePassword),
            ConnectStatus::Refused("BadUserNamePassword".to_string())
        );
    }
}
