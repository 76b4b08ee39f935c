use quequ::{GetError, PutError, QueueBuilder};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_channel_send_receive() {
    let (producer, consumer) = QueueBuilder::new().with_capacity(64).build_channel().unwrap();

    assert_eq!(producer.send(String::from("hello")), Ok(1));
    assert_eq!(consumer.receive().as_deref(), Ok("hello"));
    assert_eq!(consumer.receive(), Err(GetError::Empty { count: 0 }));
}

#[test]
fn test_receive_timeout_on_empty_channel() {
    let (_producer, consumer) = QueueBuilder::new().build_channel::<u32>().unwrap();

    let start = Instant::now();
    assert_eq!(consumer.receive_timeout(Duration::from_millis(20)), None);
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[test]
fn test_receive_timeout_gets_late_message() {
    let (producer, consumer) = QueueBuilder::new().build_channel::<u32>().unwrap();

    let sender = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        producer.send(7).unwrap();
    });

    assert_eq!(consumer.receive_timeout(Duration::from_secs(5)), Some(7));
    sender.join().unwrap();
}

#[test]
fn test_send_timeout_on_full_channel() {
    let (producer, consumer) = QueueBuilder::new().with_capacity(8).build_channel().unwrap();
    for i in 0..6 {
        producer.send(i).unwrap();
    }

    let err = producer.send_timeout(6, Duration::from_millis(10)).unwrap_err();
    assert!(err.is_full());
    assert_eq!(err.into_inner(), 6);

    // A consumer frees room while the producer is retrying.
    let drainer = {
        let consumer = consumer.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            consumer.receive().unwrap()
        })
    };
    assert!(producer.send_timeout(6, Duration::from_secs(5)).is_ok());
    assert_eq!(drainer.join().unwrap(), 0);
    assert_eq!(consumer.receive_batch(usize::MAX), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_send_batch_returns_unsent_tail() {
    let (producer, consumer) = QueueBuilder::new().with_capacity(8).build_channel().unwrap();

    assert_eq!(producer.send_batch(vec![1, 2, 3]), Ok(()));
    assert_eq!(producer.send_batch(vec![4, 5, 6, 7, 8]), Err(vec![7, 8]));

    assert_eq!(consumer.receive_batch(4), vec![1, 2, 3, 4]);
    assert_eq!(consumer.receive_batch(10), vec![5, 6]);
    assert!(consumer.receive_batch(10).is_empty());
}

#[test]
fn test_cloned_handles_share_the_ring() {
    let (producer, consumer) = QueueBuilder::new().with_capacity(256).build_channel().unwrap();
    let received = Arc::new(AtomicU64::new(0));
    let sum = Arc::new(AtomicU64::new(0));

    let mut handles = vec![];
    for p in 0..4u64 {
        let producer = producer.clone();
        handles.push(thread::spawn(move || {
            for i in 0..1_000u64 {
                let value = p * 1_000 + i;
                producer.send_timeout(value, Duration::from_secs(10)).unwrap();
            }
        }));
    }
    for _ in 0..4 {
        let consumer = consumer.clone();
        let received = received.clone();
        let sum = sum.clone();
        handles.push(thread::spawn(move || {
            while received.load(Ordering::Acquire) < 4_000 {
                if let Some(value) = consumer.receive_timeout(Duration::from_millis(5)) {
                    sum.fetch_add(value, Ordering::Relaxed);
                    received.fetch_add(1, Ordering::AcqRel);
                }
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(received.load(Ordering::SeqCst), 4_000);
    assert_eq!(sum.load(Ordering::SeqCst), (0..4_000u64).sum::<u64>());
    assert!(producer.queue().is_empty());
}

#[test]
fn test_put_error_display() {
    let (producer, _consumer) = QueueBuilder::new().with_capacity(8).build_channel().unwrap();
    for i in 0..6 {
        producer.send(i).unwrap();
    }
    match producer.send(6) {
        Err(err @ PutError::Full { .. }) => {
            assert_eq!(err.to_string(), "queue is full (6 items buffered)")
        }
        other => panic!("expected Full, got {other:?}"),
    }
    assert!(format!("{producer:?}").starts_with("Producer { queue: RingQueue {"));
}
