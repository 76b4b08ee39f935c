/// Approximate number of buffered items given a snapshot of both cursors.
///
/// The result is only as fresh as the snapshot: either cursor may move the
/// instant after it was loaded. It is used for admission control and for
/// diagnostics, never for slot correctness (the generation counters decide
/// that).
///
/// Unsigned wrapping subtraction keeps the distance correct when the write
/// cursor has wrapped past `u32::MAX` and the read cursor has not. Callers
/// must load `read` before `write`; both only grow, so the distance is then
/// never negative.
#[inline]
pub fn estimate(read: u32, write: u32) -> u32 {
    write.wrapping_sub(read)
}

/// [`estimate`], clamped into `[0, capacity)` for reporting.
#[inline]
pub fn estimate_clamped(read: u32, write: u32, capacity: u32) -> u32 {
    estimate(read, write).min(capacity - 1)
}
