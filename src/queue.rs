//! Provided inter-context receive queue.
//!
//! [`SpscRxQueue`] implements the [`RxQueue`] capability on top of the
//! lock-free ring in [`spsc`](crate::spsc). The receive ISR pushes; one or
//! more cooperative tasks peek and pop, serialized by a critical section.
//!
//! # Overflow policy
//!
//! The producer runs in interrupt context and must never block, so a push
//! onto a full queue drops the new byte and increments a diagnostic
//! counter. The oldest bytes survive, preserving the prefix of the stream.
//!
//! # Blocking peek
//!
//! The ring has no RTOS wait list, so the timed peek is a cooperative
//! poll: check, sleep one millisecond via the scheduler capability,
//! repeat. An RTOS-backed [`RxQueue`] implementation with a native
//! blocking peek can be substituted without touching the driver.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::port::{RxQueue, Scheduler};
use crate::spsc::Spsc;

/// Fixed-capacity ISR-to-task byte queue with drop-newest overflow.
///
/// `N` must be a power of two. Usable in a `static`:
///
/// ```
/// use eoss3_usbserial::queue::SpscRxQueue;
/// # #[derive(Clone)] struct Rtos;
/// # impl eoss3_usbserial::port::Scheduler for Rtos {
/// #     fn sleep_ms(&self, _ms: u32) {}
/// #     fn yield_from_isr(&self, _woken: bool) {}
/// # }
/// # impl Rtos { const fn new() -> Self { Rtos } }
/// static RX_QUEUE: SpscRxQueue<Rtos, { eoss3_usbserial::config::RX_BUFFER_SIZE }> =
///     SpscRxQueue::new(Rtos::new());
/// ```
pub struct SpscRxQueue<S: Scheduler, const N: usize> {
    ring: Spsc<u8, N>,
    sched: S,
    dropped: AtomicU32,
}

impl<S: Scheduler, const N: usize> SpscRxQueue<S, N> {
    /// Creates an empty queue that sleeps through `sched` while peeking.
    pub const fn new(sched: S) -> Self {
        Self {
            ring: Spsc::new(),
            sched,
            dropped: AtomicU32::new(0),
        }
    }

    /// Number of bytes dropped because the queue was full.
    ///
    /// A growing value means the consumer is too slow or `N` is too small.
    pub fn dropped_bytes(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Number of bytes currently queued.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// True if no bytes are queued.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }
}

impl<S: Scheduler, const N: usize> RxQueue for SpscRxQueue<S, N> {
    unsafe fn send_from_isr(&self, byte: u8) -> bool {
        // SAFETY: the caller is the sole producer per the trait contract.
        if unsafe { self.ring.push(byte) }.is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            warn!("usbserial: rx queue full, byte dropped");
        }
        // The poll-based peek has no wait list to signal, so no waiter can
        // need an early yield.
        false
    }

    fn peek(&self, timeout_ms: u32) -> Option<u8> {
        let mut remaining = timeout_ms;
        loop {
            // The critical section serializes consumer-side access against
            // a concurrent try_pop from another task; the producer side
            // never takes it.
            let front = critical_section::with(|_| unsafe { self.ring.peek() });
            if front.is_some() {
                return front;
            }
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            self.sched.sleep_ms(1);
        }
    }

    fn try_pop(&self) -> Option<u8> {
        critical_section::with(|_| unsafe { self.ring.pop() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoSleep;

    impl Scheduler for NoSleep {
        fn sleep_ms(&self, _ms: u32) {}
        fn yield_from_isr(&self, _woken: bool) {}
    }

    #[test]
    fn drops_newest_and_counts_on_overflow() {
        let q: SpscRxQueue<NoSleep, 4> = SpscRxQueue::new(NoSleep);
        for b in 0..6u8 {
            let _ = unsafe { q.send_from_isr(b) };
        }
        assert_eq!(q.dropped_bytes(), 2);
        for b in 0..4u8 {
            assert_eq!(q.try_pop(), Some(b));
        }
        assert_eq!(q.try_pop(), None);
    }

    #[test]
    fn peek_is_non_destructive() {
        let q: SpscRxQueue<NoSleep, 4> = SpscRxQueue::new(NoSleep);
        let _ = unsafe { q.send_from_isr(0x42) };
        assert_eq!(q.peek(0), Some(0x42));
        assert_eq!(q.peek(0), Some(0x42));
        assert_eq!(q.try_pop(), Some(0x42));
        assert_eq!(q.peek(0), None);
    }

    #[test]
    fn zero_timeout_peek_returns_immediately() {
        let q: SpscRxQueue<NoSleep, 4> = SpscRxQueue::new(NoSleep);
        assert_eq!(q.peek(0), None);
    }
}
