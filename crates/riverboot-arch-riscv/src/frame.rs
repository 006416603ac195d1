//! Fixed-layout trap context frame.

use static_assertions::const_assert_eq;

/// Register context saved across the trap boundary.
///
/// Thirty-two 8-byte slots at fixed offsets, indexed like x0..x31, living
/// statically in the context region below the boot stack and addressed
/// through `tp`. Two slots carry special rules:
///
/// * slot 0 (the x0/zero slot, otherwise idle) stages the trap return
///   address: the dispatcher stores the faulting pc here and a handler may
///   rewrite it to move the resume point;
/// * slot 4 (`tp`) is never written: tp locates the frame itself.
///
/// Only written and read at the trap entry/exit boundary, never aliased
/// elsewhere. There is no floating-point or extended register context.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextFrame {
    /// Staged trap return address (x0 slot).
    pub pc: u64,
    pub ra: u64,
    pub sp: u64,
    pub gp: u64,
    /// Idle: tp is the frame locator.
    pub tp: u64,
    pub t0: u64,
    pub t1: u64,
    pub t2: u64,
    pub s0: u64,
    pub s1: u64,
    pub a0: u64,
    pub a1: u64,
    pub a2: u64,
    pub a3: u64,
    pub a4: u64,
    pub a5: u64,
    pub a6: u64,
    pub a7: u64,
    pub s2: u64,
    pub s3: u64,
    pub s4: u64,
    pub s5: u64,
    pub s6: u64,
    pub s7: u64,
    pub s8: u64,
    pub s9: u64,
    pub s10: u64,
    pub s11: u64,
    pub t3: u64,
    pub t4: u64,
    pub t5: u64,
    pub t6: u64,
}

impl ContextFrame {
    pub const fn zeroed() -> Self {
        Self {
            pc: 0,
            ra: 0,
            sp: 0,
            gp: 0,
            tp: 0,
            t0: 0,
            t1: 0,
            t2: 0,
            s0: 0,
            s1: 0,
            a0: 0,
            a1: 0,
            a2: 0,
            a3: 0,
            a4: 0,
            a5: 0,
            a6: 0,
            a7: 0,
            s2: 0,
            s3: 0,
            s4: 0,
            s5: 0,
            s6: 0,
            s7: 0,
            s8: 0,
            s9: 0,
            s10: 0,
            s11: 0,
            t3: 0,
            t4: 0,
            t5: 0,
            t6: 0,
        }
    }
}

// The frame must exactly fill the reserved context region, and the slot
// offsets are baked into the vector assembly as literals.
const_assert_eq!(core::mem::size_of::<ContextFrame>(), 256);
const_assert_eq!(core::mem::offset_of!(ContextFrame, pc), 0);
const_assert_eq!(core::mem::offset_of!(ContextFrame, ra), 8);
const_assert_eq!(core::mem::offset_of!(ContextFrame, sp), 16);
const_assert_eq!(core::mem::offset_of!(ContextFrame, tp), 32);
const_assert_eq!(core::mem::offset_of!(ContextFrame, a0), 80);
const_assert_eq!(core::mem::offset_of!(ContextFrame, s2), 144);
const_assert_eq!(core::mem::offset_of!(ContextFrame, t6), 248);

#[cfg(test)]
mod tests {
    use super::*;
    use memoffset::offset_of;

    #[test]
    fn slots_follow_the_architectural_register_index() {
        // slot index * 8, x0..x31 order.
        assert_eq!(offset_of!(ContextFrame, pc), 0);
        assert_eq!(offset_of!(ContextFrame, ra), 1 * 8);
        assert_eq!(offset_of!(ContextFrame, sp), 2 * 8);
        assert_eq!(offset_of!(ContextFrame, gp), 3 * 8);
        assert_eq!(offset_of!(ContextFrame, tp), 4 * 8);
        assert_eq!(offset_of!(ContextFrame, t0), 5 * 8);
        assert_eq!(offset_of!(ContextFrame, s0), 8 * 8);
        assert_eq!(offset_of!(ContextFrame, a0), 10 * 8);
        assert_eq!(offset_of!(ContextFrame, a7), 17 * 8);
        assert_eq!(offset_of!(ContextFrame, s2), 18 * 8);
        assert_eq!(offset_of!(ContextFrame, s11), 27 * 8);
        assert_eq!(offset_of!(ContextFrame, t3), 28 * 8);
        assert_eq!(offset_of!(ContextFrame, t6), 31 * 8);
    }

    #[test]
    fn frame_fills_the_context_region() {
        assert_eq!(
            core::mem::size_of::<ContextFrame>() as u64,
            soc::map::CONTEXT_REGION_BYTES
        );
    }
}
