//! 数据接入：消息总线抽象、接入处理器与 MQTT 实现。

pub mod handler;
pub mod mqtt;

pub use handler::IngressHandler;
pub use mqtt::{MqttBus, MqttSourceConfig};

use async_trait::async_trait;
use domain::Envelope;

/// 采集错误。
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("payload decode error: {0}")]
    Decode(String),
    #[error("source error: {0}")]
    Source(String),
}

/// 总线连接结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectStatus {
    Accepted,
    Refused(String),
}

/// 消息回调。
///
/// 在总线的投递上下文中同步调用，实现不得阻塞。
pub trait MessageHandler: Send + Sync {
    fn on_connect(&self, status: ConnectStatus);

    /// 返回错误表示投递方违反约定（如非 UTF-8 负载），由总线单步向上传递。
    fn on_message(&self, envelope: Envelope) -> Result<(), IngestError>;
}

/// 消息总线：每次 `process` 执行一步收发并把事件分发给回调。
#[async_trait]
pub trait MessageBus: Send {
    async fn process(&mut self, handler: &dyn MessageHandler) -> Result<(), IngestError>;
}
