//! 存储接口 Trait 定义
//!
//! - RecordSink：时序记录批量写入
//!
//! 设计原则：
//! - 一次调用对应一次后端写入
//! - 返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use async_trait::async_trait;
use domain::StorageRecord;

/// 时序记录写入接口
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// 批量写入记录；空批次不应触发后端请求。
    async fn write_batch(&self, records: &[StorageRecord]) -> Result<(), StorageError>;
}
