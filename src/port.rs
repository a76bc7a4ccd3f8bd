//! Capability interfaces for the platform services the driver consumes.
//!
//! The driver does not own the clock tree, the fabric interrupt controller
//! or the scheduler; it is handed implementations of these traits at
//! initialization. On hardware they bind to the SoC HAL and the RTOS; on
//! the host, tests supply simulated implementations and drive the receive
//! interrupt by calling the handler directly.

/// Fabric clock domains the usbserial IP consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockDomain {
    /// C16: 12 MHz reference clock.
    C16,
    /// C21: 48 MHz or 72 MHz system clock.
    C21,
}

/// Fabric interrupt lines routable to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FabricIrq {
    Irq0,
    Irq1,
    Irq2,
    Irq3,
}

/// Interrupt trigger type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Level,
    Edge,
}

/// Interrupt trigger polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

/// Destination core for a routed fabric interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqTarget {
    /// The M4 subsystem running this driver.
    M4,
    /// The application processor.
    Ap,
}

/// Clock tree controller: rate programming and gating by named domain.
pub trait ClockTree {
    /// Program the rate of a clock domain in Hz.
    fn set_rate(&mut self, domain: ClockDomain, rate_hz: u32);

    /// Ungate a clock domain.
    fn enable(&mut self, domain: ClockDomain);
}

/// Fabric interrupt controller: handler registration, trigger
/// configuration and line control by named source.
pub trait IrqController {
    /// Register `handler` as the service routine for `irq`.
    fn register(&mut self, irq: FabricIrq, handler: fn());

    /// Configure trigger type, polarity and destination core for `irq`.
    fn configure(&mut self, irq: FabricIrq, trigger: Trigger, polarity: Polarity, target: IrqTarget);

    /// Discard any stale pending state on `irq`.
    fn clear_pending(&mut self, irq: FabricIrq);

    /// Enable delivery of `irq`.
    fn enable(&mut self, irq: FabricIrq);
}

/// Scheduler services: cooperative delay and ISR-exit yield.
pub trait Scheduler {
    /// Suspend the calling task cooperatively for roughly `ms` milliseconds.
    /// Other tasks continue to run.
    fn sleep_ms(&self, ms: u32);

    /// Hand control back to the scheduler at ISR exit. `woken` is true if
    /// the ISR made a higher-priority waiter runnable.
    fn yield_from_isr(&self, woken: bool);
}

/// Fixed-capacity byte queue crossing the ISR/task boundary.
///
/// The interrupt service routine is the sole producer; one consumer task
/// peeks and pops. Implementations must never block in `send_from_isr`;
/// the overflow policy (this crate's [`SpscRxQueue`] drops the newest byte
/// and counts it) is the implementation's documented choice.
///
/// [`SpscRxQueue`]: crate::queue::SpscRxQueue
pub trait RxQueue {
    /// Enqueue a byte from interrupt context. Returns true if a
    /// higher-priority waiter was made runnable and the ISR should yield.
    ///
    /// # Safety
    ///
    /// Must only be called from the single interrupt context armed as this
    /// queue's producer.
    unsafe fn send_from_isr(&self, byte: u8) -> bool;

    /// Wait up to `timeout_ms` milliseconds for a byte, without removing
    /// it. A timeout of 0 checks once and returns immediately.
    fn peek(&self, timeout_ms: u32) -> Option<u8>;

    /// Remove and return the front byte, if any. Non-blocking.
    fn try_pop(&self) -> Option<u8>;
}

// Lets a queue live in a `static` (or on the test stack) while the driver
// holds a reference to it.
impl<Q: RxQueue + ?Sized> RxQueue for &Q {
    unsafe fn send_from_isr(&self, byte: u8) -> bool {
        unsafe { (**self).send_from_isr(byte) }
    }

    fn peek(&self, timeout_ms: u32) -> Option<u8> {
        (**self).peek(timeout_ms)
    }

    fn try_pop(&self) -> Option<u8> {
        (**self).try_pop()
    }
}

/// Placeholder queue for polling-mode drivers. Never holds data.
pub struct NoRxQueue;

impl RxQueue for NoRxQueue {
    unsafe fn send_from_isr(&self, _byte: u8) -> bool {
        false
    }

    fn peek(&self, _timeout_ms: u32) -> Option<u8> {
        None
    }

    fn try_pop(&self) -> Option<u8> {
        None
    }
}
