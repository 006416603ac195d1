//! Indirect interrupt service routine table.

use arch_riscv::ContextFrame;
use soc::map::IRQ_LINES_TOTAL;
use spin::Mutex;

pub type IrqHandlerFn = fn(line: u32, frame: &mut ContextFrame);

/// One table entry. Tagged rather than a bare function pointer, so an
/// unassigned line is an explicit no-op instead of an unchecked call.
#[derive(Clone, Copy)]
pub enum IrqHandler {
    Unassigned,
    Fn(IrqHandlerFn),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IrqError {
    LineOutOfRange(usize),
}

/// Fixed-size handler vector, one slot per interrupt line.
///
/// The boot sequencer publishes this table's address through the
/// controller's isr-table register; the dispatcher reads it back on every
/// trap and resolves handlers by line index, O(1) per line.
pub struct IrqTable {
    entries: Mutex<[IrqHandler; IRQ_LINES_TOTAL]>,
}

impl IrqTable {
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new([IrqHandler::Unassigned; IRQ_LINES_TOTAL]),
        }
    }

    pub fn register(&self, line: usize, handler: IrqHandlerFn) -> Result<(), IrqError> {
        if line >= IRQ_LINES_TOTAL {
            return Err(IrqError::LineOutOfRange(line));
        }
        self.entries.lock()[line] = IrqHandler::Fn(handler);
        Ok(())
    }

    pub fn unregister(&self, line: usize) -> Result<(), IrqError> {
        if line >= IRQ_LINES_TOTAL {
            return Err(IrqError::LineOutOfRange(line));
        }
        self.entries.lock()[line] = IrqHandler::Unassigned;
        Ok(())
    }

    /// Invoke the handler for `line`, if one is assigned. The entry is
    /// copied out before the call so the handler runs outside the lock.
    pub fn dispatch(&self, line: usize, frame: &mut ContextFrame) {
        let entry = self.entries.lock()[line];
        if let IrqHandler::Fn(f) = entry {
            f(line as u32, frame);
        }
    }

    /// Address published through the controller's isr-table register.
    pub fn base_addr(&self) -> u64 {
        self as *const Self as usize as u64
    }
}

impl Default for IrqTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bump_s2(_line: u32, frame: &mut ContextFrame) {
        frame.s2 += 1;
    }

    #[test]
    fn register_rejects_out_of_range_lines() {
        let table = IrqTable::new();
        assert_eq!(
            table.register(IRQ_LINES_TOTAL, bump_s2),
            Err(IrqError::LineOutOfRange(IRQ_LINES_TOTAL))
        );
    }

    #[test]
    fn dispatch_runs_the_registered_handler() {
        let table = IrqTable::new();
        table.register(3, bump_s2).unwrap();
        let mut frame = ContextFrame::zeroed();
        table.dispatch(3, &mut frame);
        assert_eq!(frame.s2, 1);
    }

    #[test]
    fn dispatch_on_an_unassigned_line_is_a_no_op() {
        let table = IrqTable::new();
        let before = ContextFrame::zeroed();
        let mut frame = before;
        table.dispatch(0, &mut frame);
        assert_eq!(frame, before);
    }

    #[test]
    fn unregister_returns_the_line_to_unassigned() {
        let table = IrqTable::new();
        table.register(1, bump_s2).unwrap();
        table.unregister(1).unwrap();
        let mut frame = ContextFrame::zeroed();
        table.dispatch(1, &mut frame);
        assert_eq!(frame.s2, 0);
    }
}
