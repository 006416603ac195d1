//! Privileged register access behind a narrow trait, so the boot and trap
//! paths can run against a mock CSR file on the host.

/// `mstatus` previous-privilege-mode field.
pub const MSTATUS_MPP: u64 = 0b11 << 11;
/// `mstatus` previous-interrupt-enable bit: interrupts on after `mret`.
pub const MSTATUS_MPIE: u64 = 1 << 7;
/// Machine external interrupt enable.
pub const MIE_MEIE: u64 = 1 << 11;
/// Machine external interrupt pending.
pub const MIP_MEIP: u64 = 1 << 11;

/// Interrupt flag, top bit of `mcause` (RV64).
pub const MCAUSE_IRQ_BIT: u64 = 1 << 63;
/// Machine external interrupt cause code.
pub const IRQ_M_EXTERNAL: u64 = 11;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Csr {
    Mstatus = 0,
    Mie = 1,
    Mip = 2,
    Mtvec = 3,
    Mscratch = 4,
    Mepc = 5,
    Mcause = 6,
}

pub trait CsrFile {
    fn read(&self, csr: Csr) -> u64;
    fn write(&mut self, csr: Csr, val: u64);

    fn set_bits(&mut self, csr: Csr, bits: u64) {
        let val = self.read(csr);
        self.write(csr, val | bits);
    }

    fn clear_bits(&mut self, csr: Csr, bits: u64) {
        let val = self.read(csr);
        self.write(csr, val & !bits);
    }
}

/// CSR file of the running hart.
///
/// Off-target this is a compile-only stub: host code must inject a
/// [`mock::MockCsr`] instead, and any call here is a wiring bug.
#[derive(Clone, Copy, Default)]
pub struct HartCsr;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "riscv64")] {
        use riscv::register::{mcause, mepc, mie, mip, mscratch, mstatus, mtvec};

        macro_rules! csr_write {
            ($name:literal, $val:expr) => {
                unsafe {
                    core::arch::asm!(concat!("csrw ", $name, ", {0}"), in(reg) $val, options(nostack))
                }
            };
        }

        macro_rules! csr_set {
            ($name:literal, $bits:expr) => {
                unsafe {
                    core::arch::asm!(concat!("csrs ", $name, ", {0}"), in(reg) $bits, options(nostack))
                }
            };
        }

        macro_rules! csr_clear {
            ($name:literal, $bits:expr) => {
                unsafe {
                    core::arch::asm!(concat!("csrc ", $name, ", {0}"), in(reg) $bits, options(nostack))
                }
            };
        }

        impl CsrFile for HartCsr {
            fn read(&self, csr: Csr) -> u64 {
                match csr {
                    Csr::Mstatus => mstatus::read().bits() as u64,
                    Csr::Mie => mie::read().bits() as u64,
                    Csr::Mip => mip::read().bits() as u64,
                    Csr::Mtvec => mtvec::read().bits() as u64,
                    Csr::Mscratch => mscratch::read() as u64,
                    Csr::Mepc => mepc::read() as u64,
                    Csr::Mcause => mcause::read().bits() as u64,
                }
            }

            fn write(&mut self, csr: Csr, val: u64) {
                match csr {
                    Csr::Mstatus => csr_write!("mstatus", val),
                    Csr::Mie => csr_write!("mie", val),
                    Csr::Mip => csr_write!("mip", val),
                    Csr::Mtvec => csr_write!("mtvec", val),
                    Csr::Mscratch => csr_write!("mscratch", val),
                    Csr::Mepc => csr_write!("mepc", val),
                    Csr::Mcause => csr_write!("mcause", val),
                }
            }

            fn set_bits(&mut self, csr: Csr, bits: u64) {
                match csr {
                    Csr::Mstatus => csr_set!("mstatus", bits),
                    Csr::Mie => csr_set!("mie", bits),
                    Csr::Mip => csr_set!("mip", bits),
                    Csr::Mtvec => csr_set!("mtvec", bits),
                    Csr::Mscratch => csr_set!("mscratch", bits),
                    Csr::Mepc => csr_set!("mepc", bits),
                    Csr::Mcause => csr_set!("mcause", bits),
                }
            }

            fn clear_bits(&mut self, csr: Csr, bits: u64) {
                match csr {
                    Csr::Mstatus => csr_clear!("mstatus", bits),
                    Csr::Mie => csr_clear!("mie", bits),
                    Csr::Mip => csr_clear!("mip", bits),
                    Csr::Mtvec => csr_clear!("mtvec", bits),
                    Csr::Mscratch => csr_clear!("mscratch", bits),
                    Csr::Mepc => csr_clear!("mepc", bits),
                    Csr::Mcause => csr_clear!("mcause", bits),
                }
            }
        }
    } else {
        impl CsrFile for HartCsr {
            fn read(&self, _csr: Csr) -> u64 {
                unimplemented!("hart CSR access requires a riscv64 target")
            }

            fn write(&mut self, _csr: Csr, _val: u64) {
                unimplemented!("hart CSR access requires a riscv64 target")
            }
        }
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::{Csr, CsrFile};
    use std::vec::Vec;

    /// Map-backed CSR file with an ordered write log, so tests can assert
    /// both final values and programming order (e.g. mtvec exactly once,
    /// before MEIE).
    #[derive(Default)]
    pub struct MockCsr {
        regs: [u64; 7],
        writes: Vec<(Csr, u64)>,
    }

    impl MockCsr {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn preset(&mut self, csr: Csr, val: u64) {
            self.regs[csr as usize] = val;
        }

        pub fn write_log(&self) -> &[(Csr, u64)] {
            &self.writes
        }

        pub fn writes_to(&self, csr: Csr) -> Vec<u64> {
            self.writes
                .iter()
                .filter(|(c, _)| *c == csr)
                .map(|(_, v)| *v)
                .collect()
        }
    }

    impl CsrFile for MockCsr {
        fn read(&self, csr: Csr) -> u64 {
            self.regs[csr as usize]
        }

        fn write(&mut self, csr: Csr, val: u64) {
            self.regs[csr as usize] = val;
            self.writes.push((csr, val));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockCsr;
    use super::*;

    #[test]
    fn set_and_clear_bits_read_modify_write() {
        let mut csr = MockCsr::new();
        csr.preset(Csr::Mstatus, MSTATUS_MPP);
        csr.set_bits(Csr::Mstatus, MSTATUS_MPIE);
        assert_eq!(csr.read(Csr::Mstatus), MSTATUS_MPP | MSTATUS_MPIE);
        csr.clear_bits(Csr::Mstatus, MSTATUS_MPP);
        assert_eq!(csr.read(Csr::Mstatus), MSTATUS_MPIE);
    }

    #[test]
    fn write_log_preserves_program_order() {
        let mut csr = MockCsr::new();
        csr.write(Csr::Mtvec, 0x100);
        csr.set_bits(Csr::Mie, MIE_MEIE);
        let log = csr.write_log();
        assert_eq!(log[0], (Csr::Mtvec, 0x100));
        assert_eq!(log[1].0, Csr::Mie);
    }
}
