//! Trap dispatcher. Entered from the trap vector after the context frame
//! is saved; classifies the cause, drains recognized external interrupts,
//! and reports everything else on the fatal path.

use arch_riscv::csr::{Csr, CsrFile, MIP_MEIP};
use arch_riscv::{ContextFrame, TrapCause};
use soc::map::IRQ_LINES_TOTAL;
use soc::{Bus, Soc};

use crate::isr::IrqTable;

/// LED pattern of the fatal diagnostic path.
pub const LED_FAULT_PATTERN: u32 = 0xF0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapOutcome {
    /// Resume at the (possibly handler-rewritten) staged pc.
    Resume,
    /// Unrecoverable; the caller must halt the hart.
    Fatal,
}

/// Service one trap. The register context is already in `frame`; hardware
/// holds the cause and faulting pc in `mcause`/`mepc`.
///
/// On `Resume`, `mepc` has been reloaded from the frame's staged pc slot
/// and the vector may restore registers and `mret`. On `Fatal`, the
/// diagnostic text and LED pattern are already out and the hart must not
/// return to the interrupted code.
pub fn handle_trap<B: Bus, C: CsrFile>(
    soc: &Soc<B>,
    csr: &mut C,
    frame: &mut ContextFrame,
) -> TrapOutcome {
    // Order all prior loads/stores before sampling device state.
    soc.bus().fence();

    let cause = csr.read(Csr::Mcause);
    let epc = csr.read(Csr::Mepc);
    // Stage the resume address where a handler can observe or rewrite it.
    frame.pc = epc;

    // The device-level acknowledge alone cannot drop this bit; leaving it
    // set re-traps forever.
    csr.clear_bits(Csr::Mip, MIP_MEIP);

    match TrapCause::decode(cause) {
        TrapCause::ExternalInterrupt => {
            drain_pending(soc, frame);
            csr.write(Csr::Mepc, frame.pc);
            TrapOutcome::Resume
        }
        TrapCause::OtherInterrupt(_) | TrapCause::Exception(_) => {
            fatal(soc, cause, epc);
            TrapOutcome::Fatal
        }
    }
}

/// Linear scan of the pending bitmask, line 0 first. One sample per trap:
/// lines asserted after the sample wait for the next trap, and the clear
/// is deliberately blind (see `IrqCtrl::sample_pending`).
fn drain_pending<B: Bus>(soc: &Soc<B>, frame: &mut ContextFrame) {
    let irqctrl = &soc.irqctrl;
    // Safety: boot published the address of a live IrqTable through the
    // controller register; nothing rewrites it afterwards.
    let table = unsafe { &*(irqctrl.isr_table() as usize as *const IrqTable) };

    let mut pending = irqctrl.sample_pending();
    irqctrl.clear(pending);

    for line in 0..IRQ_LINES_TOTAL {
        if pending & 1 != 0 {
            irqctrl.set_cause_index(line as u32);
            table.dispatch(line, frame);
        }
        pending >>= 1;
    }
}

/// Diagnose and leave the hart for the debugger: snapshot the cause into
/// the controller's debug registers, dump cause and pc over the UART, and
/// raise the fault LED pattern.
fn fatal<B: Bus>(soc: &Soc<B>, cause: u64, epc: u64) {
    soc.irqctrl.record_debug(cause, epc);
    let uart = &soc.uart;
    uart.transmit(b"Unhandled trap. cause=0x");
    uart.transmit_hex(cause);
    uart.transmit(b" epc=0x");
    uart.transmit_hex(epc);
    uart.transmit(b"\r\n");
    soc.gpio.set_led(LED_FAULT_PATTERN);
}
