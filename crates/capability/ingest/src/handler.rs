//! 接入处理器
//!
//! 校验并解码消息，合格的读数入队：
//! - retained 消息是历史快照，直接跳过
//! - topic 必须恰好 5 段（`.../<device_id>/.../<control_id>`），第 2、4 段分别为设备与控件
//! - 负载必须是 UTF-8，否则视为致命错误

use crate::{ConnectStatus, IngestError, MessageHandler};
use bridge_pipeline::BatchQueue;
use bridge_telemetry::{
    record_dropped_retained, record_dropped_topic, record_item_enqueued, record_message_received,
};
use domain::{Envelope, Item, Origin};
use std::sync::Arc;
use tracing::{debug, error, info};

/// topic 段数。
const TOPIC_SEGMENTS: usize = 5;

/// 接入处理器：持有队列与来源标识，在构造时注入。
#[derive(Clone)]
pub struct IngressHandler {
    queue: Arc<BatchQueue>,
    origin: Origin,
}

impl IngressHandler {
    pub fn new(queue: Arc<BatchQueue>, origin: Origin) -> Self {
        Self { queue, origin }
    }
}

impl MessageHandler for IngressHandler {
    fn on_connect(&self, status: ConnectStatus) {
        match status {
            ConnectStatus::Accepted => {
                info!(target: "bridge.ingest", origin = %self.origin, "mqtt_connected");
            }
            ConnectStatus::Refused(reason) => {
                error!(
                    target: "bridge.ingest",
                    origin = %self.origin,
                    reason = %reason,
                    "mqtt_connect_failed"
                );
            }
        }
    }

    fn on_message(&self, envelope: Envelope) -> Result<(), IngestError> {
        record_message_received();
        if envelope.retain {
            record_dropped_retained();
            debug!(target: "bridge.ingest", topic = %envelope.topic, "retained_message_skipped");
            return Ok(());
        }

        let Some((device_id, control_id)) = topic_ids(&envelope.topic) else {
            record_dropped_topic();
            debug!(target: "bridge.ingest", topic = %envelope.topic, "topic_skipped");
            return Ok(());
        };

        let raw_value = String::from_utf8(envelope.payload)
            .map_err(|err| IngestError::Decode(format!("{}: {}", envelope.topic, err)))?;

        debug!(
            target: "bridge.ingest",
            topic = %envelope.topic,
            device_id = %device_id,
            control_id = %control_id,
            value = %raw_value,
            "message_received"
        );

        self.queue.enqueue(Item {
            origin: self.origin.clone(),
            device_id: device_id.to_string(),
            control_id: control_id.to_string(),
            raw_value,
        });
        record_item_enqueued();
        Ok(())
    }
}

/// 从 topic 取出 `(device_id, control_id)`；段数不符或目标段为空时返回 `None`。
fn topic_ids(topic: &str) -> Option<(&str, &str)> {
    let parts: Vec<&str> = topic.split('/').collect();
    if parts.len() != TOPIC_SEGMENTS {
        return None;
    }
    let (device_id, control_id) = (parts[2], parts[4]);
    if device_id.is_empty() || control_id.is_empty() {
        return None;
    }
    Some((device_id, control_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_ids_take_fixed_segments() {
        assert_eq!(
            topic_ids("/devices/wb-msw/controls/Temperature"),
            Some(("wb-msw", "Temperature"))
        );
        assert_eq!(topic_ids("x/y/dev42/z/ctrl7"), Some(("dev42", "ctrl7")));
    }

    #[test]
    fn topic_ids_reject_other_shapes() {
        assert_eq!(topic_ids("/devices/wb-msw/controls"), None);
        assert_eq!(topic_ids("/devices/wb-msw/controls/Temperature/on"), None);
        assert_eq!(topic_ids(""), None);
        assert_eq!(topic_ids("/devices//controls/Temperature"), None);
        assert_eq!(topic_ids("/devices/wb-msw/controls/"), None);
    }
}
