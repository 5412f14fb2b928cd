//! 有界时间批量队列
//!
//! 多生产者入队、单消费者按时间/数量上限批量取出的 FIFO 队列。
//! 容量不设上限：持续过载时内存随积压增长，生产者既不会被阻塞也不会被丢弃。

use domain::Item;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// 批量队列。
///
/// 互斥只覆盖入队与队首弹出，`drain` 的等待发生在锁外。
#[derive(Debug, Default)]
pub struct BatchQueue {
    items: Mutex<VecDeque<Item>>,
}

impl BatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加到队尾，不阻塞调用方。
    pub fn enqueue(&self, item: Item) {
        self.lock().push_back(item);
    }

    /// 从队首收集，直到凑满 `max_items` 或自调用起经过 `min_interval`，以先到者为准。
    ///
    /// 队列为空时按 `min_interval` 的 10% 休眠（不超过剩余时间），不会越过截止时间；
    /// 返回条数可能少于 `max_items`，包括 0。
    pub async fn drain(&self, min_interval: Duration, max_items: usize) -> Vec<Item> {
        let started = Instant::now();
        let idle_step = min_interval / 10;
        let mut items = Vec::new();

        loop {
            let elapsed = started.elapsed();
            if elapsed >= min_interval || items.len() >= max_items {
                break;
            }
            let room = max_items - items.len();
            let taken = self.pop_into(&mut items, room);
            if taken == 0 {
                let remaining = min_interval.saturating_sub(elapsed);
                tokio::time::sleep(idle_step.min(remaining)).await;
            }
        }

        items
    }

    /// 当前积压条数。
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn pop_into(&self, out: &mut Vec<Item>, limit: usize) -> usize {
        let mut queue = self.lock();
        let count = limit.min(queue.len());
        out.extend(queue.drain(..count));
        count
    }

    // 中毒时直接取回内部数据
    fn lock(&self) -> MutexGuard<'_, VecDeque<Item>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
