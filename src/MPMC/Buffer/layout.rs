use crossbeam_utils::CachePadded;

#[cfg(not(loom))]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(loom)]
use loom::sync::atomic::{AtomicU32, Ordering};

/// The two shared cursors of a ring.
///
/// Each cursor counts how many calls of its kind have successfully reserved a
/// slot. They start at 0, only ever move by a CAS of `current -> current + 1`,
/// and wrap at `u32::MAX`. Both wrap the same way, so their distance stays
/// meaningful across the wrap.
///
/// Producers hammer `write` and consumers hammer `read`; padding keeps the two
/// on separate cache lines.
#[repr(C)]
pub struct CursorPair {
    /// The "write" cursor for producers.
    pub write: CachePadded<AtomicU32>,

    /// The "read" cursor for consumers.
    pub read: CachePadded<AtomicU32>,
}

/// A consistent-enough view of both cursors, read-cursor first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorSnapshot {
    pub read: u32,
    pub write: u32,
}

impl CursorPair {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Both cursors start at `origin`. Slot generations must be seeded to match.
    pub(crate) fn starting_at(origin: u32) -> Self {
        Self {
            write: CachePadded::new(AtomicU32::new(origin)),
            read: CachePadded::new(AtomicU32::new(origin)),
        }
    }

    /// Loads the read cursor before the write cursor. Both only grow, so the
    /// snapshot never shows `read` ahead of `write`.
    #[inline]
    pub fn snapshot(&self) -> CursorSnapshot {
        let read = self.read.load(Ordering::Acquire);
        let write = self.write.load(Ordering::Acquire);
        CursorSnapshot { read, write }
    }

    /// Tries to move the write cursor from `seen` to `seen + 1`.
    /// On success the caller owns cursor target `seen + 1`.
    #[inline]
    pub fn reserve_write(&self, seen: u32) -> Option<u32> {
        Self::reserve(&self.write, seen)
    }

    /// Tries to move the read cursor from `seen` to `seen + 1`.
    #[inline]
    pub fn reserve_read(&self, seen: u32) -> Option<u32> {
        Self::reserve(&self.read, seen)
    }

    #[inline]
    fn reserve(cursor: &AtomicU32, seen: u32) -> Option<u32> {
        let target = seen.wrapping_add(1);
        cursor
            .compare_exchange(seen, target, Ordering::AcqRel, Ordering::Relaxed)
            .ok()
            .map(|_| target)
    }
}

impl Default for CursorPair {
    fn default() -> Self {
        Self::new()
    }
}
