//! Driver for the EOS S3 FPGA `usbserial` IP: a USB virtual serial port
//! exposed through a memory-mapped register block with one receive and one
//! transmit hardware FIFO.
//!
//! The driver configures the fabric clocks, validates the loaded IP's
//! identity and revision, and provides byte-level transmit and receive
//! primitives. Reception is either polled from the hardware FIFO or, when
//! armed at initialization, drained by an interrupt service routine into a
//! fixed-capacity queue that consumer tasks wait on with a timeout.
//!
//! Platform services — clock tree, fabric interrupt controller, scheduler
//! and the inter-context queue — are capability traits in [`port`], so the
//! driver binds to any RTOS and runs against simulated collaborators in
//! host tests.
//!
//! # Example
//!
//! ```no_run
//! use eoss3_usbserial::bus::UsbSerial0;
//! use eoss3_usbserial::config::RX_BUFFER_SIZE;
//! use eoss3_usbserial::driver::{Config, RxWait, UsbSerial};
//! use eoss3_usbserial::queue::SpscRxQueue;
//! use static_cell::StaticCell;
//! # #[derive(Clone, Copy)] struct Rtos;
//! # impl eoss3_usbserial::port::Scheduler for Rtos {
//! #     fn sleep_ms(&self, _ms: u32) {}
//! #     fn yield_from_isr(&self, _woken: bool) {}
//! # }
//! # impl Rtos { const fn new() -> Self { Rtos } }
//! # struct Hal;
//! # impl eoss3_usbserial::port::ClockTree for Hal {
//! #     fn set_rate(&mut self, _d: eoss3_usbserial::port::ClockDomain, _hz: u32) {}
//! #     fn enable(&mut self, _d: eoss3_usbserial::port::ClockDomain) {}
//! # }
//! # impl eoss3_usbserial::port::IrqController for Hal {
//! #     fn register(&mut self, _i: eoss3_usbserial::port::FabricIrq, _h: fn()) {}
//! #     fn configure(
//! #         &mut self,
//! #         _i: eoss3_usbserial::port::FabricIrq,
//! #         _t: eoss3_usbserial::port::Trigger,
//! #         _p: eoss3_usbserial::port::Polarity,
//! #         _c: eoss3_usbserial::port::IrqTarget,
//! #     ) {}
//! #     fn clear_pending(&mut self, _i: eoss3_usbserial::port::FabricIrq) {}
//! #     fn enable(&mut self, _i: eoss3_usbserial::port::FabricIrq) {}
//! # }
//! # let mut clocks = Hal;
//! # let mut irq = Hal;
//!
//! type Driver = UsbSerial<UsbSerial0, &'static SpscRxQueue<Rtos, RX_BUFFER_SIZE>, Rtos>;
//!
//! static RX_QUEUE: SpscRxQueue<Rtos, RX_BUFFER_SIZE> = SpscRxQueue::new(Rtos::new());
//! static DRIVER: StaticCell<Driver> = StaticCell::new();
//!
//! fn usbserial_isr() {
//!     // resolve the &'static driver however the firmware stores it
//! }
//!
//! let driver: &'static Driver = DRIVER.init(UsbSerial::init_interrupt(
//!     // SAFETY: the usbserial IP is loaded and this is the only view.
//!     unsafe { UsbSerial0::new() },
//!     &RX_QUEUE,
//!     Rtos::new(),
//!     &mut clocks,
//!     &mut irq,
//!     usbserial_isr,
//!     Config::default(),
//! ));
//!
//! driver.write(b"hello\r\n");
//! if let RxWait::Data(byte) = driver.rx_wait(100) {
//!     assert_eq!(driver.getc(), Some(byte));
//! }
//! ```

#![no_std]

#[macro_use]
mod log;

pub mod bus;
pub mod config;
pub mod driver;
pub mod port;
pub mod queue;
pub mod spsc;

pub use bus::{UsbSerial0, UsbSerialBus, UsbSerialMmio};
pub use driver::{Config, RxWait, UsbSerial};
pub use queue::SpscRxQueue;
