//! Trap cause classification.

use crate::csr::{IRQ_M_EXTERNAL, MCAUSE_IRQ_BIT};

/// The dispatcher's two-way split: the recognized external-interrupt cause
/// is drained and resumed; everything else is fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapCause {
    /// Asserted machine external interrupt; serviced via the drain loop.
    ExternalInterrupt,
    /// An interrupt cause code the dispatcher does not recognize.
    OtherInterrupt(u64),
    /// Synchronous exception.
    Exception(u64),
}

impl TrapCause {
    pub fn decode(mcause: u64) -> Self {
        let code = mcause & !MCAUSE_IRQ_BIT;
        if mcause & MCAUSE_IRQ_BIT != 0 {
            if code == IRQ_M_EXTERNAL {
                TrapCause::ExternalInterrupt
            } else {
                TrapCause::OtherInterrupt(code)
            }
        } else {
            TrapCause::Exception(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_external_is_the_only_recognized_interrupt() {
        assert_eq!(
            TrapCause::decode(MCAUSE_IRQ_BIT | IRQ_M_EXTERNAL),
            TrapCause::ExternalInterrupt
        );
        assert_eq!(
            TrapCause::decode(MCAUSE_IRQ_BIT | 7),
            TrapCause::OtherInterrupt(7)
        );
    }

    #[test]
    fn exceptions_keep_their_code() {
        // Illegal instruction.
        assert_eq!(TrapCause::decode(2), TrapCause::Exception(2));
        // Cause 11 without the interrupt bit is an environment call, not
        // an external interrupt.
        assert_eq!(TrapCause::decode(11), TrapCause::Exception(11));
    }
}
