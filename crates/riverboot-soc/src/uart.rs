//! Polling UART transmitter and hex formatter.

use crate::bus::Bus;

const STATUS: u64 = 0x00;
const SCALER: u64 = 0x04;
const DATA: u64 = 0x10;

/// Status bit 0: transmit FIFO full.
pub const STATUS_TX_FULL: u32 = 1 << 0;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Diagnostic UART. Transmit-only from the firmware's point of view: each
/// byte busy-waits on TX-full, then lands in the data register. No
/// buffering, no interrupts; a stuck peer hangs the hart by design.
#[derive(Clone, Copy)]
pub struct Uart<B: Bus> {
    bus: B,
    base: u64,
}

impl<B: Bus> Uart<B> {
    pub const fn new(bus: B, base: u64) -> Self {
        Self { bus, base }
    }

    pub fn set_scaler(&self, val: u32) {
        self.bus.write_u32(self.base + SCALER, val);
    }

    pub fn transmit(&self, bytes: &[u8]) {
        for &b in bytes {
            while self.bus.read_u32(self.base + STATUS) & STATUS_TX_FULL != 0 {}
            self.bus.write_u32(self.base + DATA, b as u32);
        }
    }

    /// Sixteen lowercase hex nibbles, most significant first.
    pub fn transmit_hex(&self, val: u64) {
        for shift in (0..16).rev() {
            let nibble = ((val >> (shift * 4)) & 0xF) as usize;
            self.transmit(&[HEX_DIGITS[nibble]]);
        }
    }
}

impl<B: Bus> core::fmt::Write for Uart<B> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.transmit(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::UART1_BASE;
    use crate::mock::MockBus;
    use std::vec::Vec;

    fn sent(bus: &MockBus) -> Vec<u8> {
        bus.writes_to(UART1_BASE + DATA)
            .into_iter()
            .map(|v| v as u8)
            .collect()
    }

    #[test]
    fn transmit_writes_each_byte_to_the_data_register() {
        let bus = MockBus::new();
        let uart = Uart::new(&bus, UART1_BASE);
        uart.transmit(b"OK\r\n");
        assert_eq!(sent(&bus), b"OK\r\n");
    }

    #[test]
    fn transmit_spins_until_tx_full_drops() {
        let bus = MockBus::new();
        // Full for two polls, then room for the byte.
        bus.push_read(UART1_BASE + STATUS, STATUS_TX_FULL as u64);
        bus.push_read(UART1_BASE + STATUS, STATUS_TX_FULL as u64);
        let uart = Uart::new(&bus, UART1_BASE);
        uart.transmit(b"A");
        assert_eq!(sent(&bus), b"A");
    }

    #[test]
    fn transmit_hex_emits_sixteen_nibbles_msb_first() {
        let bus = MockBus::new();
        let uart = Uart::new(&bus, UART1_BASE);
        uart.transmit_hex(0x0123_4567_89AB_CDEF);
        assert_eq!(sent(&bus), b"0123456789abcdef");
    }

    #[test]
    fn transmit_hex_pads_small_values() {
        let bus = MockBus::new();
        let uart = Uart::new(&bus, UART1_BASE);
        uart.transmit_hex(0x2);
        assert_eq!(sent(&bus), b"0000000000000002");
    }

    #[test]
    fn scaler_write_targets_the_scaler_register() {
        let bus = MockBus::new();
        let uart = Uart::new(&bus, UART1_BASE);
        uart.set_scaler(0x150);
        assert_eq!(bus.writes_to(UART1_BASE + SCALER), [0x150]);
    }

    #[test]
    fn fmt_write_goes_through_transmit() {
        use core::fmt::Write as _;
        let bus = MockBus::new();
        let mut uart = Uart::new(&bus, UART1_BASE);
        write!(uart, "line {}", 3).unwrap();
        assert_eq!(sent(&bus), b"line 3");
    }
}
