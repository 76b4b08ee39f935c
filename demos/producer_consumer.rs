// In demos/producer_consumer.rs
//
// cargo run --release --example producer_consumer -- <num_messages> [producers] [consumers]
use quequ::QueueBuilder;
use sha2::{Digest, Sha256};
use std::env;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn digest(index: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("message_{}", index).as_bytes());
    format!("{:x}", hasher.finalize())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <num_messages> [producers] [consumers]", args[0]);
        std::process::exit(1);
    }

    let num_messages: usize = args[1].parse()?;
    let producers: usize = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(4).max(1);
    let consumers: usize = args.get(3).map(|s| s.parse()).transpose()?.unwrap_or(4).max(1);

    let (producer, consumer) = QueueBuilder::new()
        .with_capacity(4096)
        .build_channel::<(usize, String)>()?;
    println!("Pipeline: {:?}", producer.queue());

    let keep_alive = Arc::new(AtomicBool::new(true));
    let keep_alive_for_handler = Arc::clone(&keep_alive);

    // Handle Ctrl+C to stop both sides early
    ctrlc::set_handler(move || {
        keep_alive_for_handler.store(false, Ordering::SeqCst);
    })?;

    let start = Instant::now();
    let received = Arc::new(AtomicUsize::new(0));
    let corrupted = Arc::new(AtomicUsize::new(0));
    let mut handles = vec![];

    for p in 0..producers {
        let producer = producer.clone();
        let keep_alive = Arc::clone(&keep_alive);
        handles.push(thread::spawn(move || {
            // Each producer hashes and sends every `producers`-th message.
            for index in (p..num_messages).step_by(producers) {
                let mut message = (index, digest(index));
                loop {
                    if !keep_alive.load(Ordering::Relaxed) {
                        return;
                    }
                    match producer.send_timeout(message, Duration::from_millis(100)) {
                        Ok(_) => break,
                        Err(e) => message = e.into_inner(),
                    }
                }
            }
        }));
    }

    for _ in 0..consumers {
        let consumer = consumer.clone();
        let keep_alive = Arc::clone(&keep_alive);
        let received = Arc::clone(&received);
        let corrupted = Arc::clone(&corrupted);
        handles.push(thread::spawn(move || {
            while keep_alive.load(Ordering::Relaxed) && received.load(Ordering::Acquire) < num_messages {
                let Some((index, hash)) = consumer.receive_timeout(Duration::from_millis(100)) else {
                    continue;
                };
                if digest(index) != hash {
                    corrupted.fetch_add(1, Ordering::Relaxed);
                }
                let seen = received.fetch_add(1, Ordering::AcqRel) + 1;
                if seen % 100_000 == 0 {
                    println!("--- Received {} messages ---", seen);
                }
            }
        }));
    }

    for h in handles {
        h.join().map_err(|_| "pipeline thread panicked")?;
    }

    let elapsed = start.elapsed();
    let received = received.load(Ordering::SeqCst);
    println!("Pipeline: Received {} of {} messages in {:.2?}", received, num_messages, elapsed);
    println!(
        "Pipeline: Throughput: {:.2} messages/sec",
        received as f64 / elapsed.as_secs_f64()
    );
    println!("Pipeline: Corrupted messages: {}", corrupted.load(Ordering::SeqCst));
    println!("Pipeline: {:?}", producer.queue().stats());

    Ok(())
}
