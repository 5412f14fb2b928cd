use bridge_pipeline::BatchQueue;
use domain::{Item, Origin};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn sample_item(origin: &str, raw_value: &str) -> Item {
    Item {
        origin: Origin::new(origin),
        device_id: "device-1".to_string(),
        control_id: "control-1".to_string(),
        raw_value: raw_value.to_string(),
    }
}

fn values(items: &[Item]) -> Vec<&str> {
    items.iter().map(|item| item.raw_value.as_str()).collect()
}

#[tokio::test]
async fn drain_on_empty_queue_returns_after_interval() {
    let queue = BatchQueue::new();
    let interval = Duration::from_millis(50);

    let started = Instant::now();
    let items = queue.drain(interval, 50).await;
    let elapsed = started.elapsed();

    assert!(items.is_empty());
    assert!(elapsed >= interval, "returned early: {elapsed:?}");
    assert!(elapsed < interval + Duration::from_millis(200), "returned late: {elapsed:?}");
}

#[tokio::test]
async fn drain_returns_max_items_immediately_in_order() {
    let queue = BatchQueue::new();
    for value in ["1", "2", "3", "4", "5"] {
        queue.enqueue(sample_item("client-a", value));
    }

    let started = Instant::now();
    let items = queue.drain(Duration::from_secs(5), 3).await;

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(values(&items), vec!["1", "2", "3"]);
    assert_eq!(queue.len(), 2);

    let rest = queue.drain(Duration::from_millis(20), 10).await;
    assert_eq!(values(&rest), vec!["4", "5"]);
    assert!(queue.is_empty());
}

#[tokio::test]
async fn drain_keeps_enqueue_order_across_origins() {
    let queue = BatchQueue::new();
    queue.enqueue(sample_item("client-a", "A1"));
    queue.enqueue(sample_item("client-b", "B1"));
    queue.enqueue(sample_item("client-a", "A2"));
    queue.enqueue(sample_item("client-b", "B2"));

    let items = queue.drain(Duration::from_millis(30), 4).await;

    assert_eq!(values(&items), vec!["A1", "B1", "A2", "B2"]);
    assert_eq!(items[1].origin, Origin::new("client-b"));
}

#[tokio::test]
async fn drain_collects_items_arriving_while_waiting() {
    let queue = Arc::new(BatchQueue::new());
    let producer = {
        let queue = queue.clone();
        tokio::spawn(async move {
            for value in ["x", "y", "z"] {
                tokio::time::sleep(Duration::from_millis(10)).await;
                queue.enqueue(sample_item("client-a", value));
            }
        })
    };

    let started = Instant::now();
    let items = queue.drain(Duration::from_secs(2), 3).await;

    assert_eq!(values(&items), vec!["x", "y", "z"]);
    assert!(started.elapsed() < Duration::from_secs(1));
    producer.await.expect("producer");
}

#[tokio::test]
async fn drain_with_zero_bounds_returns_nothing() {
    let queue = BatchQueue::new();
    queue.enqueue(sample_item("client-a", "1"));

    assert!(queue.drain(Duration::from_millis(20), 0).await.is_empty());
    assert!(queue.drain(Duration::ZERO, 10).await.is_empty());
    assert_eq!(queue.len(), 1);
}

#[test]
fn enqueue_from_many_threads_keeps_every_item() {
    let queue = Arc::new(BatchQueue::new());
    let handles: Vec<_> = (0..4)
        .map(|producer| {
            let queue = queue.clone();
            std::thread::spawn(move || {
                for index in 0..250 {
                    queue.enqueue(sample_item(&format!("client-{producer}"), &index.to_string()));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("producer thread");
    }

    assert_eq!(queue.len(), 1000);
}
