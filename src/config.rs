//! Hardware memory map and configuration constants for the usbserial IP.
//!
//! This module centralizes the peripheral base address, register offsets and
//! identity constants, eliminating magic numbers across driver modules.
//!
//! # Register Map (word offsets from `USBSERIAL_BASE`)
//!
//! | Register            | Byte offset | Access | Notes                        |
//! |---------------------|-------------|--------|------------------------------|
//! | device-id           | 0x00        | RO     | must read `0xA5BD`           |
//! | revision            | 0x04        | RO     | must read `0x0200`           |
//! | clock-select        | 0x0C        | W      | 1 = 1.5 divider, 0 = direct  |
//! | usb-pid             | 0x10        | W      | USB product id               |
//! | rx-fifo-flags       | 0x14        | RO     | non-zero = data available    |
//! | rx-data             | 0x18        | RO     | reading pops one byte        |
//! | tx-fifo-flags       | 0x1C        | RO     | fill-level encoding, 0 = full|
//! | tx-data             | 0x20        | WO     | writing pushes one byte      |
//! | rx-interrupt-enable | 0x24        | W      | 0x01 = FIFO-non-empty irq    |

use crate::port::FabricIrq;

/// Base address of the usbserial register block in the FPGA peripheral space.
pub const USBSERIAL_BASE: usize = 0x4002_0000;

/// Identity value the device-id register must report.
pub const EXPECTED_DEVICE_ID: u32 = 0xA5BD;

/// Revision value the revision register must report.
pub const EXPECTED_REV_NUM: u32 = 0x0200;

/// Stock USB product id programmed when the caller does not supply one.
pub const DEFAULT_USB_PID: u16 = 0x6141;

/// Capacity of the inter-context receive queue, in bytes.
///
/// Must be a power of two (the SPSC ring requires it).
pub const RX_BUFFER_SIZE: usize = 256;

/// Fabric interrupt line wired to the receive-FIFO-non-empty condition.
pub const USBSERIAL_IRQ: FabricIrq = FabricIrq::Irq0;

/// Reference clock rate on domain C16.
pub const REF_CLOCK_HZ: u32 = 12_000_000;

/// System clock rate on domain C21 without the divider.
pub const SYS_CLOCK_HZ: u32 = 48_000_000;

/// System clock rate on domain C21 when the 1.5 divider is selected
/// (72 / 1.5 = 48 MHz at the IP).
pub const SYS_CLOCK_HIGH_HZ: u32 = 72_000_000;

/// usbserial register word offsets (byte offset divided by 4).
pub mod regs {
    /// Device identity register (0x00 >> 2)
    pub const DEVICE_ID: usize = 0x00 >> 2;

    /// Revision register (0x04 >> 2)
    pub const REV_NUM: usize = 0x04 >> 2;

    /// Clock-select register (0x0C >> 2)
    pub const CLOCK_SELECT: usize = 0x0C >> 2;

    /// USB product id register (0x10 >> 2)
    pub const USB_PID: usize = 0x10 >> 2;

    /// Receive FIFO flags register (0x14 >> 2)
    pub const RX_FIFO_FLAGS: usize = 0x14 >> 2;

    /// Receive data port (0x18 >> 2)
    pub const RX_DATA: usize = 0x18 >> 2;

    /// Transmit FIFO flags register (0x1C >> 2)
    pub const TX_FIFO_FLAGS: usize = 0x1C >> 2;

    /// Transmit data port (0x20 >> 2)
    pub const TX_DATA: usize = 0x20 >> 2;

    /// Receive interrupt enable register (0x24 >> 2)
    pub const RX_INT_EN: usize = 0x24 >> 2;
}

/// Clock-select register values.
pub mod clock_select {
    /// Use the C21 input clock as-is.
    pub const DIRECT: u32 = 0;

    /// Insert the 1.5 divider (for the 72 MHz clock variant).
    pub const DIVIDED: u32 = 1;
}

/// Transmit FIFO flag sentinels.
///
/// The flags register reports a fill-level encoding, not a bitmask. The
/// flow-control queries compare for exact equality; a reading outside this
/// set matches none of them.
pub mod tx_flags {
    /// No room in the transmit FIFO.
    pub const FULL: u32 = 0x0;

    /// Less than one quarter of the FIFO is free (more than 3/4 full).
    pub const LT_QUARTER_FREE: u32 = 0x1;

    /// Less than half free.
    pub const LT_HALF_FREE: u32 = 0x2;

    /// More than half free.
    pub const GT_HALF_FREE: u32 = 0x3;

    /// Transmit FIFO is completely empty.
    pub const EMPTY: u32 = 0x4;
}

/// Value written to the rx-interrupt-enable register to arm the
/// FIFO-non-empty interrupt.
pub const RX_INT_ENABLE: u32 = 0x01;
