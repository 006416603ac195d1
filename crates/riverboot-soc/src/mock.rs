//! Host-side register backing store for unit tests.

use core::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::vec::Vec;

use crate::bus::Bus;

/// One logged store, in program order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusWrite {
    pub addr: u64,
    pub width: u8,
    pub value: u64,
}

#[derive(Default)]
struct Inner {
    mem: BTreeMap<u64, u8>,
    scripted: BTreeMap<u64, VecDeque<u64>>,
    writes: Vec<BusWrite>,
    fences: usize,
}

/// Sparse byte-addressed store. Unwritten locations read as zero, reads can
/// be scripted per address, and every store lands in an ordered log.
///
/// [`Bus`] is implemented for `&MockBus` so several register views can
/// share one store within a test.
#[derive(Default)]
pub struct MockBus {
    inner: RefCell<Inner>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset_u32(&self, addr: u64, val: u32) {
        self.store_bytes(addr, &val.to_le_bytes());
    }

    pub fn preset_u64(&self, addr: u64, val: u64) {
        self.store_bytes(addr, &val.to_le_bytes());
    }

    pub fn preset_bytes(&self, addr: u64, bytes: &[u8]) {
        self.store_bytes(addr, bytes);
    }

    /// Queue a value for the next read of `addr`, ahead of the backing
    /// store. Used to model transient status bits such as UART TX-full.
    pub fn push_read(&self, addr: u64, val: u64) {
        self.inner
            .borrow_mut()
            .scripted
            .entry(addr)
            .or_default()
            .push_back(val);
    }

    pub fn writes(&self) -> Vec<BusWrite> {
        self.inner.borrow().writes.clone()
    }

    /// Values stored to one address, in order.
    pub fn writes_to(&self, addr: u64) -> Vec<u64> {
        self.inner
            .borrow()
            .writes
            .iter()
            .filter(|w| w.addr == addr)
            .map(|w| w.value)
            .collect()
    }

    pub fn fence_count(&self) -> usize {
        self.inner.borrow().fences
    }

    pub fn mem_bytes(&self, addr: u64, len: usize) -> Vec<u8> {
        let inner = self.inner.borrow();
        (0..len)
            .map(|i| inner.mem.get(&(addr + i as u64)).copied().unwrap_or(0))
            .collect()
    }

    fn store_bytes(&self, addr: u64, bytes: &[u8]) {
        let mut inner = self.inner.borrow_mut();
        for (i, b) in bytes.iter().enumerate() {
            inner.mem.insert(addr + i as u64, *b);
        }
    }

    fn load(&self, addr: u64, width: u8) -> u64 {
        let mut inner = self.inner.borrow_mut();
        if let Some(queue) = inner.scripted.get_mut(&addr) {
            if let Some(val) = queue.pop_front() {
                return val;
            }
        }
        let mut val = 0u64;
        for i in (0..width as u64).rev() {
            val = (val << 8) | inner.mem.get(&(addr + i)).copied().unwrap_or(0) as u64;
        }
        val
    }

    fn store(&self, addr: u64, width: u8, value: u64) {
        let mut inner = self.inner.borrow_mut();
        inner.writes.push(BusWrite { addr, width, value });
        for i in 0..width as u64 {
            inner.mem.insert(addr + i, (value >> (i * 8)) as u8);
        }
    }
}

impl Bus for &MockBus {
    fn read_u8(&self, addr: u64) -> u8 {
        self.load(addr, 1) as u8
    }

    fn write_u8(&self, addr: u64, val: u8) {
        self.store(addr, 1, val as u64);
    }

    fn read_u32(&self, addr: u64) -> u32 {
        self.load(addr, 4) as u32
    }

    fn write_u32(&self, addr: u64, val: u32) {
        self.store(addr, 4, val as u64);
    }

    fn read_u64(&self, addr: u64) -> u64 {
        self.load(addr, 8)
    }

    fn write_u64(&self, addr: u64, val: u64) {
        self.store(addr, 8, val);
    }

    fn fence(&self) {
        self.inner.borrow_mut().fences += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritten_locations_read_zero() {
        let bus = MockBus::new();
        assert_eq!((&bus).read_u32(0x1000), 0);
        assert_eq!((&bus).read_u64(0x2000), 0);
    }

    #[test]
    fn stores_round_trip_and_land_in_the_log() {
        let bus = MockBus::new();
        (&bus).write_u32(0x100, 0xDEAD_BEEF);
        assert_eq!((&bus).read_u32(0x100), 0xDEAD_BEEF);
        assert_eq!(
            bus.writes(),
            [BusWrite {
                addr: 0x100,
                width: 4,
                value: 0xDEAD_BEEF
            }]
        );
    }

    #[test]
    fn scripted_reads_drain_before_the_backing_store() {
        let bus = MockBus::new();
        bus.preset_u32(0x10, 7);
        bus.push_read(0x10, 1);
        bus.push_read(0x10, 2);
        assert_eq!((&bus).read_u32(0x10), 1);
        assert_eq!((&bus).read_u32(0x10), 2);
        assert_eq!((&bus).read_u32(0x10), 7);
    }

    #[test]
    fn mixed_width_access_shares_one_byte_store() {
        let bus = MockBus::new();
        (&bus).write_u64(0x40, 0x0102_0304_0506_0708);
        assert_eq!((&bus).read_u8(0x40), 0x08);
        assert_eq!((&bus).read_u32(0x44), 0x0102_0304);
    }
}
