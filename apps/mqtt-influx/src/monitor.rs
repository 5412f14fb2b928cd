//! 存活监控
//!
//! 主任务驱动消息总线，同时监视写入任务：写入任务一旦结束（写入失败或异常退出），
//! 或总线单步返回错误，即记录原因与指标快照并返回致命错误。

use bridge_ingest::{MessageBus, MessageHandler};
use bridge_pipeline::PipelineError;
use bridge_telemetry::metrics;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 致命错误，进程以非零码退出。
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    #[error("storage write error: {0}")]
    StorageWrite(String),
    #[error("message read error: {0}")]
    MessageRead(String),
}

/// 驱动总线直到出现致命错误。
pub async fn supervise<B>(
    bus: &mut B,
    handler: &dyn MessageHandler,
    mut writer: JoinHandle<Result<(), PipelineError>>,
) -> Result<(), FatalError>
where
    B: MessageBus + ?Sized,
{
    loop {
        tokio::select! {
            biased;
            joined = &mut writer => {
                let reason = match joined {
                    Ok(Ok(())) => "writer stopped".to_string(),
                    Ok(Err(err)) => err.to_string(),
                    Err(err) => err.to_string(),
                };
                error!(target: "bridge.monitor", error = %reason, "storage_write_failed");
                log_metrics();
                return Err(FatalError::StorageWrite(reason));
            }
            step = bus.process(handler) => {
                if let Err(err) = step {
                    writer.abort();
                    error!(target: "bridge.monitor", error = %err, "message_read_failed");
                    log_metrics();
                    return Err(FatalError::MessageRead(err.to_string()));
                }
            }
        }
    }
}

fn log_metrics() {
    let snapshot = metrics().snapshot();
    info!(
        target: "bridge.monitor",
        messages_received = snapshot.messages_received,
        items_enqueued = snapshot.items_enqueued,
        dropped_retained = snapshot.dropped_retained,
        dropped_topic = snapshot.dropped_topic,
        dropped_empty = snapshot.dropped_empty,
        batches_written = snapshot.batches_written,
        records_written = snapshot.records_written,
        write_failure = snapshot.write_failure,
        write_latency_ms_total = snapshot.write_latency_ms_total,
        write_latency_ms_count = snapshot.write_latency_ms_count,
        write_latency_ms_avg = snapshot.avg_write_latency_ms().unwrap_or_default(),
        "metrics_snapshot"
    );
}
