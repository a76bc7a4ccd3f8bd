//! The usbserial driver instance.
//!
//! [`UsbSerial`] owns the register view, the scheduler capability and (in
//! interrupt mode) the inter-context receive queue. It is constructed once
//! through [`UsbSerial::init_polling`] or [`UsbSerial::init_interrupt`];
//! construction runs the one-time configuration sequence and, on an
//! identity or revision mismatch, panics before any interrupt machinery is
//! armed.
//!
//! All operations take `&self`, so a single `static` driver can be shared
//! between the consumer task and the interrupt service routine. The driver
//! applies no cross-call locking on the transmit path: concurrent `putc`
//! callers must serialize externally.

use crate::bus::UsbSerialBus;
use crate::config;
use crate::port::{
    ClockDomain, ClockTree, IrqController, IrqTarget, NoRxQueue, Polarity, RxQueue, Scheduler,
    Trigger,
};

/// One-time configuration parameters.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Run the C21 domain at 72 MHz with the 1.5 divider instead of a
    /// direct 48 MHz clock.
    pub use_high_clock: bool,
    /// USB product id to present on enumeration.
    pub usb_pid: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_high_clock: false,
            usb_pid: config::DEFAULT_USB_PID,
        }
    }
}

/// Outcome of [`UsbSerial::rx_wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxWait {
    /// Interrupt mode: a byte is queued; this is it, still unconsumed.
    Data(u8),
    /// Polling mode: the hardware FIFO reports data available.
    Available,
    /// No data arrived within the timeout.
    TimedOut,
}

impl RxWait {
    /// True unless the wait timed out.
    pub fn has_data(self) -> bool {
        !matches!(self, RxWait::TimedOut)
    }
}

/// Driver for one usbserial peripheral.
///
/// Generic over the register bus `B`, the receive queue `Q` and the
/// scheduler `S` so the whole receive path runs against simulated
/// collaborators in host tests.
pub struct UsbSerial<B, Q, S> {
    bus: B,
    sched: S,
    /// Present exactly when the interrupt-driven receive path is armed.
    /// Fixed at construction.
    rx_queue: Option<Q>,
}

impl<B: UsbSerialBus, S: Scheduler> UsbSerial<B, NoRxQueue, S> {
    /// Initializes the peripheral in polling mode: no interrupt machinery,
    /// receive data is read directly from the hardware FIFO.
    ///
    /// # Panics
    ///
    /// Panics if the loaded FPGA IP does not report the expected identity
    /// and revision.
    pub fn init_polling(bus: B, sched: S, clocks: &mut impl ClockTree, cfg: Config) -> Self {
        Self::configure(&bus, clocks, &cfg);
        UsbSerial {
            bus,
            sched,
            rx_queue: None,
        }
    }
}

impl<B: UsbSerialBus, Q: RxQueue, S: Scheduler> UsbSerial<B, Q, S> {
    /// Initializes the peripheral with the interrupt-driven receive path.
    ///
    /// `isr` is registered against the fabric interrupt line and must
    /// forward to [`UsbSerial::handle_rx_interrupt`] on this driver
    /// instance (typically via a `static`).
    ///
    /// # Panics
    ///
    /// Panics if the loaded FPGA IP does not report the expected identity
    /// and revision; the interrupt line is not touched in that case.
    pub fn init_interrupt(
        bus: B,
        rx_queue: Q,
        sched: S,
        clocks: &mut impl ClockTree,
        irq: &mut impl IrqController,
        isr: fn(),
        cfg: Config,
    ) -> Self {
        Self::configure(&bus, clocks, &cfg);

        irq.register(config::USBSERIAL_IRQ, isr);
        irq.configure(
            config::USBSERIAL_IRQ,
            Trigger::Level,
            Polarity::ActiveHigh,
            IrqTarget::M4,
        );
        irq.clear_pending(config::USBSERIAL_IRQ);
        irq.enable(config::USBSERIAL_IRQ);
        bus.write_rx_interrupt_enable(config::RX_INT_ENABLE);
        debug!("usbserial: rx interrupt armed");

        UsbSerial {
            bus,
            sched,
            rx_queue: Some(rx_queue),
        }
    }

    /// Clock and identity bring-up common to both modes. Each step is a
    /// precondition for the next; the identity check runs last so a
    /// mismatch leaves no interrupt machinery armed.
    fn configure(bus: &B, clocks: &mut impl ClockTree, cfg: &Config) {
        clocks.set_rate(ClockDomain::C16, config::REF_CLOCK_HZ);
        clocks.enable(ClockDomain::C16);

        bus.write_clock_select(if cfg.use_high_clock {
            config::clock_select::DIVIDED
        } else {
            config::clock_select::DIRECT
        });
        bus.write_usb_pid(cfg.usb_pid as u32);

        let sys_rate = if cfg.use_high_clock {
            config::SYS_CLOCK_HIGH_HZ
        } else {
            config::SYS_CLOCK_HZ
        };
        clocks.set_rate(ClockDomain::C21, sys_rate);
        clocks.enable(ClockDomain::C21);

        // The loaded gateware must match this driver; running against a
        // different IP would mean writing meaningless registers.
        let id = bus.device_id();
        if id != config::EXPECTED_DEVICE_ID {
            panic!("usbserial: unexpected device id {:#06x}", id);
        }
        let rev = bus.rev_num();
        if rev != config::EXPECTED_REV_NUM {
            panic!("usbserial: unexpected revision {:#06x}", rev);
        }
        debug!("usbserial: configured, pid={=u16:#x}", cfg.usb_pid);
    }

    /// Reads the identity register of the loaded IP.
    pub fn ip_id(&self) -> u32 {
        self.bus.device_id()
    }

    /// Reads the revision register of the loaded IP.
    pub fn revision(&self) -> u32 {
        self.bus.rev_num()
    }

    /// True if the interrupt-driven receive path is active.
    pub fn is_interrupt_mode(&self) -> bool {
        self.rx_queue.is_some()
    }

    /// Raw receive FIFO flags; non-zero means data is present.
    pub fn data_available(&self) -> u32 {
        self.bus.rx_fifo_flags()
    }

    /// Non-blocking single-byte read.
    ///
    /// In polling mode this pops the hardware FIFO directly. In interrupt
    /// mode it pops the inter-context queue instead — the ISR is the
    /// hardware FIFO's only consumer there, so the two can never race for
    /// the same entry.
    pub fn getc(&self) -> Option<u8> {
        match &self.rx_queue {
            Some(q) => q.try_pop(),
            None => {
                if self.bus.rx_fifo_flags() == 0 {
                    None
                } else {
                    Some(self.bus.read_data())
                }
            }
        }
    }

    /// Blocking single-byte write.
    ///
    /// Spins, without yielding, until the transmit FIFO has room; the
    /// hardware drains it quickly. Unbounded by design — callers needing
    /// backpressure consult [`tx_fifo_near_full`](Self::tx_fifo_near_full)
    /// first.
    pub fn putc(&self, byte: u8) {
        while self.bus.tx_fifo_flags() == config::tx_flags::FULL {}
        self.bus.write_data(byte);
    }

    /// Writes a buffer byte-by-byte, in order.
    ///
    /// Not atomic as a whole: another producer's bytes may interleave
    /// unless transmit callers are serialized externally.
    pub fn write(&self, buf: &[u8]) {
        for &byte in buf {
            self.putc(byte);
        }
    }

    /// True iff the transmit FIFO reports less than one quarter free
    /// (more than 3/4 full). Exact-match query, no side effects.
    pub fn tx_fifo_near_full(&self) -> bool {
        self.bus.tx_fifo_flags() == config::tx_flags::LT_QUARTER_FREE
    }

    /// True iff the transmit FIFO reports completely empty. Exact-match
    /// query, no side effects.
    pub fn tx_fifo_empty(&self) -> bool {
        self.bus.tx_fifo_flags() == config::tx_flags::EMPTY
    }

    /// Waits up to `timeout_ms` milliseconds for receive data, without
    /// consuming any.
    ///
    /// In interrupt mode this peeks the inter-context queue and returns
    /// the queued byte; in polling mode it watches the hardware flags,
    /// sleeping cooperatively for one millisecond between checks, and
    /// returns [`RxWait::Available`]. A timeout of 0 performs a single
    /// immediate check.
    pub fn rx_wait(&self, timeout_ms: u32) -> RxWait {
        match &self.rx_queue {
            Some(q) => match q.peek(timeout_ms) {
                Some(byte) => RxWait::Data(byte),
                None => RxWait::TimedOut,
            },
            None => {
                let mut remaining = timeout_ms;
                loop {
                    if self.bus.rx_fifo_flags() != 0 {
                        return RxWait::Available;
                    }
                    if remaining == 0 {
                        return RxWait::TimedOut;
                    }
                    remaining -= 1;
                    self.sched.sleep_ms(1);
                }
            }
        }
    }

    /// Receive interrupt service routine body.
    ///
    /// Drains every byte the hardware FIFO currently holds into the
    /// inter-context queue, then yields back to the scheduler if an
    /// enqueue woke a higher-priority waiter. The full drain matters: a
    /// partial one would leave the level-triggered line asserted with
    /// stale pending state.
    ///
    /// No-op in polling mode.
    ///
    /// # Safety
    ///
    /// Must only be called from the interrupt context registered at
    /// [`UsbSerial::init_interrupt`] — it is the queue's sole producer.
    pub unsafe fn handle_rx_interrupt(&self) {
        let Some(q) = &self.rx_queue else {
            return;
        };

        let mut woken = false;
        let mut drained = 0usize;
        while self.bus.rx_fifo_flags() != 0 {
            let byte = self.bus.read_data();
            // SAFETY: we are the registered ISR, the sole producer.
            woken |= unsafe { q.send_from_isr(byte) };
            drained += 1;
        }
        if drained > 0 {
            debug!("usbserial: rx isr drained {=usize} bytes", drained);
        }
        self.sched.yield_from_isr(woken);
    }
}

// Lets the driver back `write!`/`writeln!` consoles through a shared
// reference, like any other serial port.
impl<B: UsbSerialBus, Q: RxQueue, S: Scheduler> core::fmt::Write for &UsbSerial<B, Q, S> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write(s.as_bytes());
        Ok(())
    }
}
