//! 日志初始化与流水线计数指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub messages_received: u64,
    pub dropped_retained: u64,
    pub dropped_topic: u64,
    pub items_enqueued: u64,
    pub dropped_empty: u64,
    pub batches_written: u64,
    pub records_written: u64,
    pub write_failure: u64,
    pub write_latency_ms_total: u64,
    pub write_latency_ms_count: u64,
}

impl MetricsSnapshot {
    /// 平均写入延迟（毫秒）；尚无写入时为 `None`。
    pub fn avg_write_latency_ms(&self) -> Option<u64> {
        self.write_latency_ms_total
            .checked_div(self.write_latency_ms_count)
    }
}

/// 流水线计数指标。
pub struct TelemetryMetrics {
    messages_received: AtomicU64,
    dropped_retained: AtomicU64,
    dropped_topic: AtomicU64,
    items_enqueued: AtomicU64,
    dropped_empty: AtomicU64,
    batches_written: AtomicU64,
    records_written: AtomicU64,
    write_failure: AtomicU64,
    write_latency_ms_total: AtomicU64,
    write_latency_ms_count: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            messages_received: AtomicU64::new(0),
            dropped_retained: AtomicU64::new(0),
            dropped_topic: AtomicU64::new(0),
            items_enqueued: AtomicU64::new(0),
            dropped_empty: AtomicU64::new(0),
            batches_written: AtomicU64::new(0),
            records_written: AtomicU64::new(0),
            write_failure: AtomicU64::new(0),
            write_latency_ms_total: AtomicU64::new(0),
            write_latency_ms_count: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            messages_received: self.messages_received.load(Ordering::Relaxed),
            dropped_retained: self.dropped_retained.load(Ordering::Relaxed),
            dropped_topic: self.dropped_topic.load(Ordering::Relaxed),
            items_enqueued: self.items_enqueued.load(Ordering::Relaxed),
            dropped_empty: self.dropped_empty.load(Ordering::Relaxed),
            batches_written: self.batches_written.load(Ordering::Relaxed),
            records_written: self.records_written.load(Ordering::Relaxed),
            write_failure: self.write_failure.load(Ordering::Relaxed),
            write_latency_ms_total: self.write_latency_ms_total.load(Ordering::Relaxed),
            write_latency_ms_count: self.write_latency_ms_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info，可用 RUST_LOG 覆盖）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 记录收到的 MQTT 消息次数。
pub fn record_message_received() {
    metrics().messages_received.fetch_add(1, Ordering::Relaxed);
}

/// 记录 retained 消息丢弃次数。
pub fn record_dropped_retained() {
    metrics().dropped_retained.fetch_add(1, Ordering::Relaxed);
}

/// 记录 topic 结构不符的丢弃次数。
pub fn record_dropped_topic() {
    metrics().dropped_topic.fetch_add(1, Ordering::Relaxed);
}

/// 记录入队次数。
pub fn record_item_enqueued() {
    metrics().items_enqueued.fetch_add(1, Ordering::Relaxed);
}

/// 记录空值丢弃次数（规整后为空）。
pub fn record_dropped_empty(count: u64) {
    metrics().dropped_empty.fetch_add(count, Ordering::Relaxed);
}

/// 记录一次批量写入成功及其记录条数。
pub fn record_batch_written(records: u64) {
    let metrics = metrics();
    metrics.batches_written.fetch_add(1, Ordering::Relaxed);
    metrics.records_written.fetch_add(records, Ordering::Relaxed);
}

/// 记录写入失败次数。
pub fn record_write_failure() {
    metrics().write_failure.fetch_add(1, Ordering::Relaxed);
}

/// 记录写入延迟（毫秒）。
pub fn record_write_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .write_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .write_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}
