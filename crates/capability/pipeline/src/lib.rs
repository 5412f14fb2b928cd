//! 批处理流水线：有界时间批量队列 + 批量写入循环。
//!
//! 接入层把 `Item` 入队（不阻塞），写入循环在独立任务中按
//! `min_interval` / `max_items` 取出一批，序列化后一次性写入存储。

pub mod queue;
pub mod writer;

pub use queue::BatchQueue;
pub use writer::{BatchStats, BatchWriter};

use std::time::Duration;

/// Pipeline 处理错误。
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("writer error: {0}")]
    Writer(String),
}

/// Pipeline 参数。
///
/// 默认值即线上固定值，暂不开放命令行/环境变量配置。
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// 单次取批最长等待时间。
    pub min_interval: Duration,
    /// 单批最多条数。
    pub max_items: usize,
    /// 每轮写入后的空闲间隔。
    pub cycle_idle: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(50),
            max_items: 50,
            cycle_idle: Duration::from_millis(10),
        }
    }
}

impl PipelineConfig {
    fn sanitized(mut self) -> Self {
        if self.max_items == 0 {
            self.max_items = 1;
        }
        self
    }
}
