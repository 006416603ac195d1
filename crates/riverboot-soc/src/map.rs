//! Fixed physical address map and boot-time layout constants.
//!
//! These values are bit-exact against the SoC address decoder; the asm
//! reset path and the host-tested layout arithmetic both consume them.

/// Relocatable firmware image window (ROM/flash).
pub const FW_IMAGE_BASE: u64 = 0x0010_0000;
/// Upper bound on the relocated image, 256 KiB.
pub const FW_IMAGE_MAX_BYTES: u64 = 1 << 18;

/// Execution RAM; relocation target and application entry point.
pub const SRAM_BASE: u64 = 0x1000_0000;

/// Status LED register block.
pub const GPIO_BASE: u64 = 0x8000_0000;
/// Diagnostic UART.
pub const UART1_BASE: u64 = 0x8000_1000;
/// External interrupt controller.
pub const IRQCTRL_BASE: u64 = 0x8000_2000;
/// Read-only plug-and-play descriptor, top of the map minus one 4 KiB page.
pub const PNP_BASE: u64 = 0xFFFF_F000;

/// Interrupt lines wired into the controller.
pub const IRQ_LINES_TOTAL: usize = 8;

/// Boot stack top: `SRAM_BASE + (1 << 19)`.
pub const BOOT_STACK_TOP: u64 = SRAM_BASE + (1 << 19);
/// Bytes reserved below the stack top for the trap context frame.
pub const CONTEXT_REGION_BYTES: u64 = 256;
/// Headroom below the context region for thread-local storage.
pub const TLS_HEADROOM_BYTES: u64 = 1024;

/// Context frame base; the `tp` register points here for the lifetime of
/// the system.
pub const CONTEXT_BASE: u64 = BOOT_STACK_TOP - CONTEXT_REGION_BYTES;
/// Initial stack pointer, below the context region plus TLS headroom.
pub const INITIAL_SP: u64 = CONTEXT_BASE - TLS_HEADROOM_BYTES;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackLayout {
    pub stack_top: u64,
    pub context_base: u64,
    pub initial_sp: u64,
}

/// Boot-time stack arithmetic in one place, so tests can pin it down.
pub const fn stack_layout() -> StackLayout {
    StackLayout {
        stack_top: BOOT_STACK_TOP,
        context_base: CONTEXT_BASE,
        initial_sp: INITIAL_SP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_top_is_half_megabyte_above_sram() {
        assert_eq!(stack_layout().stack_top, 0x1008_0000);
    }

    #[test]
    fn context_region_sits_directly_below_the_stack() {
        let layout = stack_layout();
        assert_eq!(layout.stack_top - layout.context_base, 256);
    }

    #[test]
    fn initial_sp_leaves_tls_headroom_below_the_context() {
        let layout = stack_layout();
        assert_eq!(layout.context_base - layout.initial_sp, 1024);
        assert_eq!(layout.initial_sp % 16, 0);
    }
}
