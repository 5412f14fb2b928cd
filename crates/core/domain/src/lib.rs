pub mod data;

pub use data::{Envelope, FieldValue, Item, MEASUREMENT, RecordTags, StorageRecord};

use std::fmt;
use std::sync::Arc;

/// 生产者来源：产生消息的连接标识（MQTT client id）。
///
/// 仅用于批次统计（区分来源数量），不会写入存储。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin(Arc<str>);

impl Origin {
    /// 以连接标识构造来源。
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
