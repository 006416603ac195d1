//! Bare-metal boot and trap firmware for the River-class RISC-V SoC.
//!
//! The hart lands in the boot sequencer exactly once at reset; from then
//! on every exception and external interrupt funnels through the trap
//! dispatcher. There is no OS, heap or scheduler underneath: the error
//! model is diagnose-and-halt, and the only blocking is the UART
//! busy-wait.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod boot;
pub mod isr;
pub mod memcopy;
pub mod trap;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "riscv64")] {
        pub mod rt;
    }
}

pub use boot::{AppEntry, BootSequencer};
pub use isr::{IrqError, IrqHandler, IrqTable};
pub use trap::{handle_trap, TrapOutcome, LED_FAULT_PATTERN};
