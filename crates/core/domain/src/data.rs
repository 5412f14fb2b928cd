use crate::Origin;
use serde::Serialize;

/// 写入存储时使用的固定 measurement 名称。
pub const MEASUREMENT: &str = "mqtt_data";

/// 消息总线投递的原始消息。
#[derive(Debug, Clone)]
pub struct Envelope {
    pub topic: String,
    pub payload: Vec<u8>,
    pub retain: bool,
}

/// 解码后的单条读数。
///
/// 由接入层按消息创建，入队一次、被写入循环消费一次，之后即丢弃。
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub origin: Origin,
    pub device_id: String,
    pub control_id: String,
    pub raw_value: String,
}

/// 存储记录的 tag 集合。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordTags {
    pub device_id: String,
    pub control_id: String,
}

/// 存储记录的唯一字段：数值（`value_f`）或字符串（`value_s`），二者必居其一。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FieldValue {
    #[serde(rename = "value_f")]
    Float(f64),
    #[serde(rename = "value_s")]
    String(String),
}

impl FieldValue {
    /// 字段名（`value_f` / `value_s`）。
    pub fn key(&self) -> &'static str {
        match self {
            FieldValue::Float(_) => "value_f",
            FieldValue::String(_) => "value_s",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Float(_) => None,
            FieldValue::String(v) => Some(v),
        }
    }
}

/// 写入时序存储的记录（measurement + tags + 单字段）。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageRecord {
    pub measurement: &'static str,
    pub tags: RecordTags,
    pub fields: FieldValue,
}

impl StorageRecord {
    /// 以固定 measurement 构造记录。
    pub fn new(
        device_id: impl Into<String>,
        control_id: impl Into<String>,
        fields: FieldValue,
    ) -> Self {
        Self {
            measurement: MEASUREMENT,
            tags: RecordTags {
                device_id: device_id.into(),
                control_id: control_id.into(),
            },
            fields,
        }
    }
}
