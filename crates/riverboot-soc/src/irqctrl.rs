//! External interrupt controller registers.

use crate::bus::Bus;

const MASK: u64 = 0x00;
const PENDING: u64 = 0x04;
const CLEAR: u64 = 0x08;
const RISE: u64 = 0x0C;
const ISR_TABLE: u64 = 0x10;
const DBG_CAUSE: u64 = 0x18;
const DBG_EPC: u64 = 0x20;
const LOCK: u64 = 0x28;
const CAUSE_IDX: u64 = 0x2C;

/// Mask register value disabling every line (1 = disabled).
pub const MASK_ALL: u32 = 0xFFFF_FFFF;

/// Interrupt controller view. One bit per line in `mask`/`pending`/
/// `clear`/`rise`; the `isr_table` register holds the base address of the
/// in-memory indirect handler vector.
#[derive(Clone, Copy)]
pub struct IrqCtrl<B: Bus> {
    bus: B,
    base: u64,
}

impl<B: Bus> IrqCtrl<B> {
    pub const fn new(bus: B, base: u64) -> Self {
        Self { bus, base }
    }

    pub fn set_mask(&self, mask: u32) {
        self.bus.write_u32(self.base + MASK, mask);
    }

    pub fn mask(&self) -> u32 {
        self.bus.read_u32(self.base + MASK)
    }

    /// Sample the pending bitmask under the controller's transient lock.
    ///
    /// The lock covers only the sample; the matching [`clear`] is issued
    /// afterwards, unguarded. Lines asserted between the sample and the
    /// clear stay pending and are serviced on the next trap.
    ///
    /// [`clear`]: IrqCtrl::clear
    pub fn sample_pending(&self) -> u32 {
        self.bus.write_u32(self.base + LOCK, 1);
        let pending = self.bus.read_u32(self.base + PENDING);
        self.bus.write_u32(self.base + LOCK, 0);
        pending
    }

    /// Acknowledge lines at the device level. Write-only; bits not set in
    /// `bits` are untouched.
    pub fn clear(&self, bits: u32) {
        self.bus.write_u32(self.base + CLEAR, bits);
    }

    /// Software-assert lines (test hook on the real controller).
    pub fn raise(&self, bits: u32) {
        self.bus.write_u32(self.base + RISE, bits);
    }

    pub fn set_isr_table(&self, addr: u64) {
        self.bus.write_u64(self.base + ISR_TABLE, addr);
    }

    pub fn isr_table(&self) -> u64 {
        self.bus.read_u64(self.base + ISR_TABLE)
    }

    /// Record which line is being serviced, for downstream diagnostics.
    pub fn set_cause_index(&self, line: u32) {
        self.bus.write_u32(self.base + CAUSE_IDX, line);
    }

    /// Diagnostic snapshot of an unhandled trap.
    pub fn record_debug(&self, cause: u64, epc: u64) {
        self.bus.write_u64(self.base + DBG_CAUSE, cause);
        self.bus.write_u64(self.base + DBG_EPC, epc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::IRQCTRL_BASE;
    use crate::mock::MockBus;

    #[test]
    fn sample_pending_frames_the_read_with_the_lock() {
        let bus = MockBus::new();
        bus.preset_u32(IRQCTRL_BASE + PENDING, 0b1010);
        let ctrl = IrqCtrl::new(&bus, IRQCTRL_BASE);
        assert_eq!(ctrl.sample_pending(), 0b1010);
        assert_eq!(bus.writes_to(IRQCTRL_BASE + LOCK), [1, 0]);
    }

    #[test]
    fn clear_is_outside_the_lock_window() {
        let bus = MockBus::new();
        bus.preset_u32(IRQCTRL_BASE + PENDING, 0b1);
        let ctrl = IrqCtrl::new(&bus, IRQCTRL_BASE);
        let pending = ctrl.sample_pending();
        ctrl.clear(pending);
        let writes = bus.writes();
        // lock=1, lock=0, then the clear.
        assert_eq!(writes[writes.len() - 1].addr, IRQCTRL_BASE + CLEAR);
        assert_eq!(writes[writes.len() - 2].addr, IRQCTRL_BASE + LOCK);
        assert_eq!(writes[writes.len() - 2].value, 0);
    }

    #[test]
    fn isr_table_pointer_round_trips() {
        let bus = MockBus::new();
        let ctrl = IrqCtrl::new(&bus, IRQCTRL_BASE);
        ctrl.set_isr_table(0x1234_5678_9ABC);
        assert_eq!(ctrl.isr_table(), 0x1234_5678_9ABC);
    }

    #[test]
    fn record_debug_writes_cause_then_epc() {
        let bus = MockBus::new();
        let ctrl = IrqCtrl::new(&bus, IRQCTRL_BASE);
        ctrl.record_debug(0x2, 0x1000_0040);
        assert_eq!(bus.writes_to(IRQCTRL_BASE + DBG_CAUSE), [0x2]);
        assert_eq!(bus.writes_to(IRQCTRL_BASE + DBG_EPC), [0x1000_0040]);
    }
}
