use quequ::{GetError, PutError, RingQueue};

#[test]
fn scenario_put_three_get_three() {
    // 4 is below the default floor of 8.
    let q = RingQueue::new(4);
    assert_eq!(q.capacity(), 8);

    assert_eq!(q.put("a"), Ok(1));
    assert_eq!(q.put("b"), Ok(2));
    assert_eq!(q.put("c"), Ok(3));

    assert_eq!(q.get(), Ok(("a", 2)));
    assert_eq!(q.get(), Ok(("b", 1)));
    assert_eq!(q.get(), Ok(("c", 0)));
    assert_eq!(q.get(), Err(GetError::Empty { count: 0 }));
}

#[test]
fn capacity_rounding() {
    assert_eq!(RingQueue::<u8>::new(0).capacity(), 8);
    assert_eq!(RingQueue::<u8>::new(3).capacity(), 8);
    assert_eq!(RingQueue::<u8>::new(8).capacity(), 8);
    assert_eq!(RingQueue::<u8>::new(9).capacity(), 16);
    assert_eq!(RingQueue::<u8>::new(1000).capacity(), 1024);
}

#[test]
fn fifo_order() {
    let q = RingQueue::new(16);

    for i in 0..10 {
        q.put(i).unwrap();
    }

    for i in 0..10 {
        assert_eq!(q.get().unwrap().0, i);
    }
}

#[test]
fn full_buffer_keeps_two_slot_margin() {
    let q = RingQueue::new(8);

    // Fill buffer: capacity - 2 puts fit
    for i in 0..6 {
        assert_eq!(q.put(i), Ok(i + 1));
    }

    // Next put should fail and hand the value back
    let err = q.put(99).unwrap_err();
    assert_eq!(err, PutError::Full { value: 99, count: 6 });
    assert_eq!(err.into_inner(), 99);
    assert_eq!(q.count(), 6);

    // Dequeue one
    assert_eq!(q.get(), Ok((0, 5)));

    // Put should succeed now
    assert_eq!(q.put(6), Ok(6));
}

#[test]
fn empty_stays_empty_until_a_put() {
    let q = RingQueue::<u32>::new(8);
    for _ in 0..100 {
        assert!(q.get().unwrap_err().is_empty());
    }
    assert!(q.is_empty());

    q.put(5).unwrap();
    assert_eq!(q.get(), Ok((5, 0)));
    assert!(q.get().unwrap_err().is_empty());
}

#[test]
fn many_laps_through_a_small_ring() {
    let q = RingQueue::new(8);
    let mut next_out = 0u64;
    for i in 0..10_000u64 {
        q.put(i).unwrap();
        if q.count() >= 5 {
            while let Ok((value, _)) = q.get() {
                assert_eq!(value, next_out);
                next_out += 1;
            }
        }
    }
    while let Ok((value, _)) = q.get() {
        assert_eq!(value, next_out);
        next_out += 1;
    }
    assert_eq!(next_out, 10_000);
}

#[test]
fn count_stays_below_capacity() {
    let q = RingQueue::new(16);
    for round in 0..50 {
        while q.put(round).is_ok() {
            assert!(q.count() < q.capacity());
        }
        assert!(q.count() <= q.capacity() - 2);
        while q.get().is_ok() {
            assert!(q.count() < q.capacity());
        }
    }
}

#[test]
fn buffered_values_are_dropped_with_the_queue() {
    use std::rc::Rc;

    let tracker = Rc::new(());
    {
        let q = RingQueue::new(8);
        for _ in 0..4 {
            q.put(Rc::clone(&tracker)).unwrap();
        }
        drop(q.get().unwrap());
        assert_eq!(Rc::strong_count(&tracker), 4);
    }
    assert_eq!(Rc::strong_count(&tracker), 1);
}

#[test]
fn stats_and_debug() {
    let q = RingQueue::new(32);
    q.put(1u8).unwrap();
    q.put(2u8).unwrap();

    let stats = q.stats();
    assert_eq!(stats.capacity, 32);
    assert_eq!(stats.count, 2);
    assert_eq!(stats.evicted, 0);
    assert_eq!(stats.placeholders, 0);

    let rendered = format!("{q:?}");
    assert!(rendered.contains("capacity: 32"));
    assert!(rendered.contains("count: 2"));
}
