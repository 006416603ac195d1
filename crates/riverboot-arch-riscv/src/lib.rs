//! RISC-V machine-mode support for the riverboot firmware: the trap
//! context frame, privileged register access, cause classification, and
//! the reset/trap vector assembly.
//!
//! The firmware crate MUST provide `boot_main() -> !` and
//! `trap_handler(frame: *mut ContextFrame)`; this crate only provides the
//! vectors that reach them.

#![no_std]

#[cfg(any(test, feature = "mock"))]
extern crate std;

pub mod cause;
pub mod csr;
pub mod frame;

#[cfg(target_arch = "riscv64")]
pub mod vectors;

pub use cause::TrapCause;
pub use csr::{Csr, CsrFile, HartCsr};
pub use frame::ContextFrame;

#[cfg(any(test, feature = "mock"))]
pub use csr::mock::MockCsr;

extern "C" {
    // Rust boot entry, reached from the reset vector. Never returns.
    pub fn boot_main() -> !;
    // Trap service entry called by the assembly trap vector.
    pub fn trap_handler(frame: *mut ContextFrame);
}
