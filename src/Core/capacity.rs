// Capacity rounding for the ring. Slot indices are computed with `cursor & mask`,
// so every capacity handed to the ring must be a power of two.

/// Default floor applied to every requested capacity.
/// A very small ring maximizes CAS contention per operation.
pub const MIN_CAPACITY: u32 = 8;

/// Smallest floor the builder accepts. The put path keeps a 2-slot margin
/// below raw capacity, so a ring of 4 has 2 usable slots.
pub const MIN_CAPACITY_FLOOR: u32 = 4;

/// Largest power of two representable in the 32-bit cursors.
pub const MAX_CAPACITY: u32 = 1 << 31;

/// Returns the smallest power of two that is `>= max(requested, minimum)`.
///
/// Requests at or above [`MAX_CAPACITY`] saturate to it instead of wrapping
/// to zero, and a `requested` of 0 simply yields the minimum.
pub fn resolve_capacity(requested: usize, minimum: u32) -> u32 {
    let floor = minimum.max(1) as usize;
    let wanted = requested.max(floor);
    if wanted >= MAX_CAPACITY as usize {
        return MAX_CAPACITY;
    }
    round_up_pow2(wanted as u32)
}

/// Bit-smearing round-up. Caller guarantees `1 <= v <= MAX_CAPACITY`.
#[inline]
fn round_up_pow2(v: u32) -> u32 {
    let mut v = v - 1;
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_next_power_of_two() {
        assert_eq!(resolve_capacity(3, MIN_CAPACITY), 8);
        assert_eq!(resolve_capacity(8, MIN_CAPACITY), 8);
        assert_eq!(resolve_capacity(9, MIN_CAPACITY), 16);
        assert_eq!(resolve_capacity(1000, MIN_CAPACITY), 1024);
        assert_eq!(resolve_capacity(1025, MIN_CAPACITY), 2048);
    }

    #[test]
    fn zero_uses_minimum() {
        assert_eq!(resolve_capacity(0, MIN_CAPACITY), MIN_CAPACITY);
        assert_eq!(resolve_capacity(0, 5), 8);
        assert_eq!(resolve_capacity(0, MIN_CAPACITY_FLOOR), 4);
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        assert_eq!(resolve_capacity(MAX_CAPACITY as usize, MIN_CAPACITY), MAX_CAPACITY);
        assert_eq!(resolve_capacity(MAX_CAPACITY as usize + 1, MIN_CAPACITY), MAX_CAPACITY);
        assert_eq!(resolve_capacity(usize::MAX, MIN_CAPACITY), MAX_CAPACITY);
        assert_eq!(resolve_capacity((MAX_CAPACITY as usize >> 1) + 1, MIN_CAPACITY), MAX_CAPACITY);
    }
}
