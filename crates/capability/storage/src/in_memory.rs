//! 时序写入内存实现
//!
//! 仅用于本地测试和演示。

use crate::error::StorageError;
use crate::traits::RecordSink;
use domain::StorageRecord;
use std::sync::RwLock;

/// 时序写入内存存储
pub struct InMemoryRecordStore {
    records: RwLock<Vec<StorageRecord>>,
    batches: RwLock<Vec<usize>>,
}

impl InMemoryRecordStore {
    /// 创建新的内存存储
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            batches: RwLock::new(Vec::new()),
        }
    }

    /// 当前累计的记录数
    pub fn len(&self) -> usize {
        self.records.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按写入顺序返回全部记录的副本
    pub fn records(&self) -> Vec<StorageRecord> {
        self.records.read().map(|v| v.clone()).unwrap_or_default()
    }

    /// 每次批量写入的记录条数
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.read().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RecordSink for InMemoryRecordStore {
    async fn write_batch(&self, records: &[StorageRecord]) -> Result<(), StorageError> {
        if records.is_empty() {
            return Ok(());
        }
        let mut store = self
            .records
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        store.extend(records.iter().cloned());
        drop(store);
        self.batches
            .write()
            .map_err(|_| StorageError::new("lock failed"))?
            .push(records.len());
        Ok(())
    }
}
