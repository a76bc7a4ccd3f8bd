//! Lock-free single-producer single-consumer ring buffer.
//!
//! This is the inter-context store behind [`SpscRxQueue`]: the receive ISR
//! pushes, one consumer task peeks and pops. Both sides are O(1) and free
//! of critical sections, which keeps the ISR's worst-case latency bounded.
//!
//! # Memory ordering
//!
//! Acquire/release on the head and tail indices: the producer writes the
//! slot, then stores `head` with Release; the consumer loads `head` with
//! Acquire before reading the slot, so the data write is visible. The tail
//! update mirrors this to hand the slot back to the producer. Sufficient on
//! single-core Cortex-M where ISR and task share coherent memory.
//!
//! [`SpscRxQueue`]: crate::queue::SpscRxQueue

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicUsize, Ordering};

/// SPSC ring with compile-time capacity.
///
/// `T` must be `Copy` so slot transfer has no drop concerns. `N` must be a
/// power of two, enforced at compile time: it allows bitmask indexing and
/// keeps the wrapping index arithmetic correct across `usize` overflow.
pub struct Spsc<T: Copy, const N: usize> {
    /// Write index, monotonically increasing. Producer-owned.
    /// Aligned away from `tail` to avoid false sharing.
    head: CacheAligned<AtomicUsize>,
    /// Read index, monotonically increasing. Consumer-owned.
    tail: AtomicUsize,
    buf: [UnsafeCell<MaybeUninit<T>>; N],
}

#[repr(align(64))]
struct CacheAligned<T>(T);

// SAFETY: exactly one producer and one consumer may access the ring
// concurrently; that contract is what makes the UnsafeCell slots race-free.
// Each slot is written only by the producer and read only by the consumer,
// with acquire/release ordering between slot access and index update.
unsafe impl<T: Copy + Send, const N: usize> Sync for Spsc<T, N> {}
unsafe impl<T: Copy + Send, const N: usize> Send for Spsc<T, N> {}

impl<T: Copy, const N: usize> Spsc<T, N> {
    /// Creates an empty ring. Usable in `static` initializers.
    pub const fn new() -> Self {
        assert!(N > 0, "SPSC capacity must be non-zero");
        assert!(N & (N - 1) == 0, "SPSC capacity must be a power of two");
        Self {
            head: CacheAligned(AtomicUsize::new(0)),
            tail: AtomicUsize::new(0),
            // SAFETY: MaybeUninit<T> needs no initialization and UnsafeCell
            // is repr(transparent), so the uninitialized array is valid.
            buf: unsafe { MaybeUninit::<[UnsafeCell<MaybeUninit<T>>; N]>::uninit().assume_init() },
        }
    }

    /// Ring capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of elements currently stored. A racy snapshot when called
    /// concurrently with push/pop.
    #[inline]
    pub fn len(&self) -> usize {
        let head = self.head.0.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        head.wrapping_sub(tail)
    }

    /// True if the ring holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pushes a value (producer side). Returns `Err(val)` if full.
    ///
    /// # Safety
    ///
    /// Must only be called from the single producer context.
    #[inline]
    pub unsafe fn push(&self, val: T) -> Result<(), T> {
        let head = self.head.0.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);

        if head.wrapping_sub(tail) >= N {
            return Err(val);
        }

        self.buf[head & (N - 1)].get().write(MaybeUninit::new(val));

        // Release: slot write must be visible before the index advance
        self.head.0.store(head.wrapping_add(1), Ordering::Release);

        Ok(())
    }

    /// Pops the front value (consumer side). Returns `None` if empty.
    ///
    /// # Safety
    ///
    /// Must only be called from the single consumer context.
    #[inline]
    pub unsafe fn pop(&self) -> Option<T> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.0.load(Ordering::Acquire);

        if head == tail {
            return None;
        }

        // SAFETY: the slot was written before head advanced (Release), and
        // we loaded head with Acquire, so the write is visible.
        let val = self.buf[tail & (N - 1)].get().read().assume_init();

        // Release: the read must complete before the slot is handed back
        self.tail.store(tail.wrapping_add(1), Ordering::Release);

        Some(val)
    }

    /// Reads the front value without removing it (consumer side).
    ///
    /// # Safety
    ///
    /// Must only be called from the single consumer context: a concurrent
    /// `pop` could recycle the slot mid-read.
    #[inline]
    pub unsafe fn peek(&self) -> Option<T> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.0.load(Ordering::Acquire);

        if head == tail {
            return None;
        }

        // SAFETY: as in pop; tail is not advanced, so the slot stays valid
        // and a later pop returns the same value.
        Some(self.buf[tail & (N - 1)].get().read().assume_init())
    }
}
