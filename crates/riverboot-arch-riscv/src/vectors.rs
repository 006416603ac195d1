//! Reset and trap vectors. The slot offsets in the save/restore sequences
//! are the `ContextFrame` layout (slot index * 8), pinned by the
//! `const_assert_eq` checks in `frame.rs`.

use core::arch::{global_asm, naked_asm};

use soc::map;

// Hardware vector table at the head of the boot image. Only the reset slot
// is assigned; every other slot traps forever so an undefined vector is
// observable instead of executing garbage.
global_asm!(
    ".section .text.vectors, \"ax\"",
    ".align 6",
    ".global _reset_vector",
    "_reset_vector:",
    "   j       _start",
    ".rept 15",
    "   j       _vector_sink",
    ".endr",
    ".global _vector_sink",
    "_vector_sink:",
    "   j       _vector_sink",
);

/// # Safety
/// Must only be entered by hardware reset.
#[unsafe(naked)]
#[link_section = ".text.boot"]
#[no_mangle]
pub unsafe extern "C" fn _start() -> ! {
    naked_asm!(
        // Zero every general-purpose register: a known initial state,
        // removing simulator x-propagation artifacts.
        "   li      x1, 0",
        "   li      x2, 0",
        "   li      x3, 0",
        "   li      x4, 0",
        "   li      x5, 0",
        "   li      x6, 0",
        "   li      x7, 0",
        "   li      x8, 0",
        "   li      x9, 0",
        "   li      x10, 0",
        "   li      x11, 0",
        "   li      x12, 0",
        "   li      x13, 0",
        "   li      x14, 0",
        "   li      x15, 0",
        "   li      x16, 0",
        "   li      x17, 0",
        "   li      x18, 0",
        "   li      x19, 0",
        "   li      x20, 0",
        "   li      x21, 0",
        "   li      x22, 0",
        "   li      x23, 0",
        "   li      x24, 0",
        "   li      x25, 0",
        "   li      x26, 0",
        "   li      x27, 0",
        "   li      x28, 0",
        "   li      x29, 0",
        "   li      x30, 0",
        "   li      x31, 0",

        // tp locates the context frame for the lifetime of the system;
        // sp sits below it with TLS headroom.
        "   li      tp, {context_base}",
        "   li      sp, {initial_sp}",

        "   tail    {boot_main}",

        context_base = const map::CONTEXT_BASE as usize,
        initial_sp = const map::INITIAL_SP as usize,
        boot_main = sym crate::boot_main,
    )
}

// Trap vector. The fence orders all prior loads/stores before the
// dispatcher samples hardware state; a0 is stashed in mscratch to free the
// first temporary. Every register except tp (the frame locator) is saved
// into the frame; the Rust handler rewrites mepc itself before returning.
global_asm!(
    ".section .text.trap, \"ax\"",
    ".align 2",
    ".global _trap_vector",
    "_trap_vector:",
    "   fence",
    "   csrw    mscratch, a0",
    "   sd      ra, 8(tp)",
    "   sd      sp, 16(tp)",
    "   sd      gp, 24(tp)",
    "   sd      t0, 40(tp)",
    "   sd      t1, 48(tp)",
    "   sd      t2, 56(tp)",
    "   sd      s0, 64(tp)",
    "   sd      s1, 72(tp)",
    "   sd      a1, 88(tp)",
    "   sd      a2, 96(tp)",
    "   sd      a3, 104(tp)",
    "   sd      a4, 112(tp)",
    "   sd      a5, 120(tp)",
    "   sd      a6, 128(tp)",
    "   sd      a7, 136(tp)",
    "   sd      s2, 144(tp)",
    "   sd      s3, 152(tp)",
    "   sd      s4, 160(tp)",
    "   sd      s5, 168(tp)",
    "   sd      s6, 176(tp)",
    "   sd      s7, 184(tp)",
    "   sd      s8, 192(tp)",
    "   sd      s9, 200(tp)",
    "   sd      s10, 208(tp)",
    "   sd      s11, 216(tp)",
    "   sd      t3, 224(tp)",
    "   sd      t4, 232(tp)",
    "   sd      t5, 240(tp)",
    "   sd      t6, 248(tp)",
    "   csrr    t0, mscratch",
    "   sd      t0, 80(tp)",
    "   mv      a0, tp",
    "   call    {handler}",
    "   ld      ra, 8(tp)",
    "   ld      gp, 24(tp)",
    "   ld      t0, 40(tp)",
    "   ld      t1, 48(tp)",
    "   ld      t2, 56(tp)",
    "   ld      s0, 64(tp)",
    "   ld      s1, 72(tp)",
    "   ld      a0, 80(tp)",
    "   ld      a1, 88(tp)",
    "   ld      a2, 96(tp)",
    "   ld      a3, 104(tp)",
    "   ld      a4, 112(tp)",
    "   ld      a5, 120(tp)",
    "   ld      a6, 128(tp)",
    "   ld      a7, 136(tp)",
    "   ld      s2, 144(tp)",
    "   ld      s3, 152(tp)",
    "   ld      s4, 160(tp)",
    "   ld      s5, 168(tp)",
    "   ld      s6, 176(tp)",
    "   ld      s7, 184(tp)",
    "   ld      s8, 192(tp)",
    "   ld      s9, 200(tp)",
    "   ld      s10, 208(tp)",
    "   ld      s11, 216(tp)",
    "   ld      t3, 224(tp)",
    "   ld      t4, 232(tp)",
    "   ld      t5, 240(tp)",
    "   ld      t6, 248(tp)",
    "   ld      sp, 16(tp)",
    "   mret",
    handler = sym crate::trap_handler,
);

extern "C" {
    fn _trap_vector();
}

/// Address to program into `mtvec`.
pub fn trap_vector_addr() -> u64 {
    _trap_vector as usize as u64
}
