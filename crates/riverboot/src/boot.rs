//! Boot sequencer: runs exactly once from hardware reset and never
//! returns. Register zeroing and stack/context setup happen in the reset
//! vector before this code; everything from trap-vector configuration to
//! the jump into the application entry happens here.

use arch_riscv::csr::{Csr, CsrFile, MIE_MEIE, MSTATUS_MPIE, MSTATUS_MPP};
use soc::irqctrl::MASK_ALL;
use soc::pnp::{CAP_ABSENT, TECH_INFERRED};
use soc::{map, Bus, Soc};

use crate::memcopy;

/// Where control goes when boot is done. On the reference platform this is
/// the base of execution RAM; the loaded application owns it from there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppEntry(pub u64);

pub struct BootSequencer<'a, B: Bus> {
    soc: &'a Soc<B>,
}

impl<'a, B: Bus> BootSequencer<'a, B> {
    pub fn new(soc: &'a Soc<B>) -> Self {
        Self { soc }
    }

    /// The relocation gate: copy only onto a synthesized netlist that has
    /// no firmware loaded yet. Simulation images pre-load execution RAM
    /// directly, and a nonzero fwid means RAM already holds an image.
    pub fn relocation_required(tech: u8, fwid: u32) -> bool {
        tech != TECH_INFERRED && fwid == 0
    }

    /// `ConfigureTrapVector -> RelocateImage -> CapabilityCheck`, then the
    /// application entry for the caller to dispatch into. No recoverable
    /// failure path exists here; any fault surfaces later as a trap.
    pub fn run(&self, csr: &mut impl CsrFile, trap_vector: u64, isr_table: u64) -> AppEntry {
        let soc = self.soc;

        // Stale lines survive an ELF reload over the debug port; quiesce
        // the controller before traps can fire.
        soc.irqctrl.set_mask(MASK_ALL);

        // Privileged-return state: stay in machine mode, interrupts on
        // after mret. mtvec is programmed exactly once, before the
        // external-interrupt enable.
        csr.clear_bits(Csr::Mstatus, MSTATUS_MPP);
        csr.set_bits(Csr::Mstatus, MSTATUS_MPIE);
        csr.write(Csr::Mtvec, trap_vector);
        soc.irqctrl.set_isr_table(isr_table);
        csr.set_bits(Csr::Mie, MIE_MEIE);

        let tech = soc.pnp.tech();
        let fwid = soc.pnp.fwid();
        if Self::relocation_required(tech, fwid) {
            memcopy::copy(
                soc.bus(),
                map::SRAM_BASE,
                map::FW_IMAGE_BASE,
                map::FW_IMAGE_MAX_BYTES,
            );
        }

        // Coarse boot-progress telemetry.
        soc.gpio.set_led(1);
        soc.uart.transmit(b"Boot . . .");
        soc.gpio.set_led(2);
        soc.uart.transmit(b"OK\r\n");
        soc.gpio.set_led(3);

        let cap = soc.pnp.capability();
        if cap == CAP_ABSENT {
            soc.uart.transmit(b"Warning: no analog detector\r\n");
            soc.gpio.set_led(cap as u32);
        } else {
            soc.gpio.set_led(4);
        }

        AppEntry(map::SRAM_BASE)
    }
}
