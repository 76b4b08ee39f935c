use proptest::prelude::*;
use quequ::Core::{resolve_capacity, MAX_CAPACITY, MIN_CAPACITY};
use quequ::{QueueBuilder, RingQueue};

proptest! {
    #[test]
    fn capacity_is_smallest_power_of_two_above_request(
        requested in 0usize..(u32::MAX as usize),
        minimum in 4u32..(1 << 20),
    ) {
        let cap = resolve_capacity(requested, minimum);
        let wanted = requested.max(minimum as usize);

        prop_assert!(cap.is_power_of_two());
        if wanted >= MAX_CAPACITY as usize {
            prop_assert_eq!(cap, MAX_CAPACITY);
        } else {
            prop_assert!(cap as usize >= wanted);
            prop_assert!((cap as usize) / 2 < wanted);
        }
    }

    #[test]
    fn queue_capacity_matches_resolver(requested in 0usize..5_000) {
        let q = RingQueue::<u8>::new(requested);
        prop_assert_eq!(q.capacity(), resolve_capacity(requested, MIN_CAPACITY));
        prop_assert!(q.capacity() >= 8);
    }

    #[test]
    fn usable_slots_are_capacity_minus_two(requested in 0usize..300, minimum in 4u32..64) {
        let q = QueueBuilder::new()
            .with_capacity(requested)
            .with_min_capacity(minimum)
            .with_yield_on_failure(false)
            .build::<usize>()
            .unwrap();
        let mut accepted = 0;
        while q.put(accepted).is_ok() {
            accepted += 1;
        }
        prop_assert_eq!(accepted, q.capacity() as usize - 2);
        prop_assert!(q.count() < q.capacity());
    }
}
