//! 批量写入循环
//!
//! 收集 → 写入 两个阶段无限循环：
//! 1. 从队列取一批（`min_interval` / `max_items`）
//! 2. 逐条序列化，丢弃空值，统计来源数
//! 3. 非空批次一次写入存储；空批次跳过写入
//! 4. 每轮结束后短暂空闲
//!
//! 写入失败即结束循环（不重试），任务结束由存活监控感知。

use crate::queue::BatchQueue;
use crate::{PipelineConfig, PipelineError};
use bridge_normalize::serialize;
use bridge_storage::RecordSink;
use bridge_telemetry::{
    record_batch_written, record_dropped_empty, record_write_failure, record_write_latency_ms,
};
use domain::Origin;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// 单轮写入统计。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// 从队列取出的条数（含被丢弃的空值）。
    pub drained: usize,
    /// 写入存储的记录数。
    pub written: usize,
    /// 写入记录涉及的不同来源数。
    pub origins: usize,
}

/// 批量写入器：独占存储客户端，在独立任务中运行。
pub struct BatchWriter {
    queue: Arc<BatchQueue>,
    sink: Arc<dyn RecordSink>,
    config: PipelineConfig,
}

impl BatchWriter {
    pub fn new(queue: Arc<BatchQueue>, sink: Arc<dyn RecordSink>) -> Self {
        Self::with_config(queue, sink, PipelineConfig::default())
    }

    pub fn with_config(
        queue: Arc<BatchQueue>,
        sink: Arc<dyn RecordSink>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            queue,
            sink,
            config: config.sanitized(),
        }
    }

    /// 在独立任务中启动写入循环；任务结束即表示写入失败。
    pub fn spawn(self) -> JoinHandle<Result<(), PipelineError>> {
        tokio::spawn(self.run())
    }

    /// 写入循环，仅在写入失败时返回。
    pub async fn run(self) -> Result<(), PipelineError> {
        info!(
            target: "bridge.pipeline",
            min_interval_ms = self.config.min_interval.as_millis() as u64,
            max_items = self.config.max_items,
            "batch_writer_started"
        );
        loop {
            self.run_cycle().await?;
            tokio::time::sleep(self.config.cycle_idle).await;
        }
    }

    /// 执行一轮 收集 → 序列化 → 写入。
    pub async fn run_cycle(&self) -> Result<BatchStats, PipelineError> {
        let items = self
            .queue
            .drain(self.config.min_interval, self.config.max_items)
            .await;
        let drained = items.len();

        let mut records = Vec::with_capacity(drained);
        let mut origins: HashSet<Origin> = HashSet::new();
        for item in items {
            if let Some(record) = serialize(&item) {
                records.push(record);
                origins.insert(item.origin);
            }
        }

        let dropped = drained - records.len();
        if dropped > 0 {
            record_dropped_empty(dropped as u64);
        }
        if records.is_empty() {
            return Ok(BatchStats {
                drained,
                ..BatchStats::default()
            });
        }

        let write_started_at = Instant::now();
        if let Err(err) = self.sink.write_batch(&records).await {
            record_write_failure();
            error!(
                target: "bridge.pipeline",
                records = records.len(),
                origins = origins.len(),
                error = %err,
                "batch_write_failed"
            );
            return Err(PipelineError::Writer(err.to_string()));
        }
        record_write_latency_ms(write_started_at.elapsed().as_millis() as u64);
        record_batch_written(records.len() as u64);

        info!(
            target: "bridge.pipeline",
            drained = drained,
            written = records.len(),
            origins = origins.len(),
            backlog = self.queue.len(),
            "batch_written"
        );
        debug!(
            target: "bridge.pipeline",
            body = %serde_json::to_string(&records).unwrap_or_default(),
            "batch_body"
        );

        Ok(BatchStats {
            drained,
            written: records.len(),
            origins: origins.len(),
        })
    }
}
