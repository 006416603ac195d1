//! Read-only plug-and-play descriptor block.

use crate::bus::Bus;

const HWID: u64 = 0x00;
const FWID: u64 = 0x04;
const TECH: u64 = 0x08;

/// Technology identifier of an inferred (simulation) netlist. A simulation
/// image pre-loads execution RAM directly, so relocation is skipped.
pub const TECH_INFERRED: u8 = 0;

/// Capability byte value when the analog detector is absent.
pub const CAP_ABSENT: u8 = 0xFF;

/// PnP descriptor view. Consulted once at boot, before any mutation of
/// target memory.
#[derive(Clone, Copy)]
pub struct PnpMap<B: Bus> {
    bus: B,
    base: u64,
}

impl<B: Bus> PnpMap<B> {
    pub const fn new(bus: B, base: u64) -> Self {
        Self { bus, base }
    }

    pub fn hwid(&self) -> u32 {
        self.bus.read_u32(self.base + HWID)
    }

    /// Firmware-present id; zero means no image is loaded in RAM yet.
    pub fn fwid(&self) -> u32 {
        self.bus.read_u32(self.base + FWID)
    }

    /// Technology identifier, low byte of the tech word.
    pub fn tech(&self) -> u8 {
        self.bus.read_u32(self.base + TECH) as u8
    }

    /// Analog-detector capability byte, bits [31:24] of the tech word.
    pub fn capability(&self) -> u8 {
        (self.bus.read_u32(self.base + TECH) >> 24) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::PNP_BASE;
    use crate::mock::MockBus;

    #[test]
    fn tech_word_fields_unpack() {
        let bus = MockBus::new();
        bus.preset_u32(PNP_BASE + TECH, 0x5500_0002);
        let pnp = PnpMap::new(&bus, PNP_BASE);
        assert_eq!(pnp.tech(), 0x02);
        assert_eq!(pnp.capability(), 0x55);
    }

    #[test]
    fn absent_capability_reads_all_ones() {
        let bus = MockBus::new();
        bus.preset_u32(PNP_BASE + TECH, 0xFF00_0001);
        let pnp = PnpMap::new(&bus, PNP_BASE);
        assert_eq!(pnp.capability(), CAP_ABSENT);
    }

    #[test]
    fn fwid_reads_the_full_word() {
        let bus = MockBus::new();
        bus.preset_u32(PNP_BASE + FWID, 0x2026_0829);
        let pnp = PnpMap::new(&bus, PNP_BASE);
        assert_eq!(pnp.fwid(), 0x2026_0829);
    }
}
