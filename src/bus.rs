//! Register-level access to the usbserial peripheral.
//!
//! [`UsbSerialBus`] is the driver's view of the register block: one method
//! per register, one access per call. The MMIO implementation performs each
//! access volatile so the compiler never caches or reorders reads of
//! hardware state. Tests substitute a simulated implementation.

use crate::config::regs;

/// One register block's worth of accessors.
///
/// Every call corresponds to exactly one bus access. Implementations must
/// not cache values across calls: the peripheral mutates this state outside
/// program control (a `rx_fifo_flags` reading is stale the moment it
/// returns).
pub trait UsbSerialBus {
    /// Read the device identity register.
    fn device_id(&self) -> u32;

    /// Read the revision register.
    fn rev_num(&self) -> u32;

    /// Write the clock-select register.
    fn write_clock_select(&self, value: u32);

    /// Write the USB product id register.
    fn write_usb_pid(&self, value: u32);

    /// Read the receive FIFO flags. Non-zero means data is available.
    fn rx_fifo_flags(&self) -> u32;

    /// Read one byte from the receive data port, popping it from the FIFO.
    fn read_data(&self) -> u8;

    /// Read the transmit FIFO flags (fill-level encoding, 0 = full).
    fn tx_fifo_flags(&self) -> u32;

    /// Write one byte to the transmit data port, pushing it onto the FIFO.
    ///
    /// Callers must first confirm the FIFO has room; the hardware drops
    /// writes to a full FIFO.
    fn write_data(&self, byte: u8);

    /// Write the receive interrupt enable register.
    fn write_rx_interrupt_enable(&self, value: u32);
}

/// Memory-mapped usbserial register block at a fixed base address.
///
/// A zero-sized view onto hardware; it owns no memory and is never freed.
pub struct UsbSerialMmio<const ADDR: usize>(());

/// The usbserial instance at the stock FPGA peripheral base.
pub type UsbSerial0 = UsbSerialMmio<{ crate::config::USBSERIAL_BASE }>;

impl<const ADDR: usize> UsbSerialMmio<ADDR> {
    /// Create a view of the register block at `ADDR`.
    ///
    /// # Safety
    ///
    /// The usbserial IP must be loaded in the FPGA fabric at `ADDR`, and
    /// only one value per register block may exist at any given time.
    pub const unsafe fn new() -> Self {
        UsbSerialMmio(())
    }

    fn read_reg(&self, offset: usize) -> u32 {
        unsafe { (ADDR as *const u32).add(offset).read_volatile() }
    }

    fn write_reg(&self, offset: usize, value: u32) {
        unsafe { (ADDR as *mut u32).add(offset).write_volatile(value) }
    }
}

impl<const ADDR: usize> UsbSerialBus for UsbSerialMmio<ADDR> {
    fn device_id(&self) -> u32 {
        self.read_reg(regs::DEVICE_ID)
    }

    fn rev_num(&self) -> u32 {
        self.read_reg(regs::REV_NUM)
    }

    fn write_clock_select(&self, value: u32) {
        self.write_reg(regs::CLOCK_SELECT, value);
    }

    fn write_usb_pid(&self, value: u32) {
        self.write_reg(regs::USB_PID, value);
    }

    fn rx_fifo_flags(&self) -> u32 {
        self.read_reg(regs::RX_FIFO_FLAGS)
    }

    fn read_data(&self) -> u8 {
        self.read_reg(regs::RX_DATA) as u8
    }

    fn tx_fifo_flags(&self) -> u32 {
        self.read_reg(regs::TX_FIFO_FLAGS)
    }

    fn write_data(&self, byte: u8) {
        self.write_reg(regs::TX_DATA, byte as u32);
    }

    fn write_rx_interrupt_enable(&self, value: u32) {
        self.write_reg(regs::RX_INT_EN, value);
    }
}
