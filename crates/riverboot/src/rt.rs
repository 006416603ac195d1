//! Target glue: the symbols the vector assembly reaches, wired to the
//! physical bus and the running hart's CSR file.

use arch_riscv::{vectors, ContextFrame, HartCsr};
use soc::{PhysBus, Soc};

use crate::boot::BootSequencer;
use crate::isr::IrqTable;
use crate::trap::{handle_trap, TrapOutcome};

/// The live handler vector; its address is published to the interrupt
/// controller at boot. Drivers loaded with the application register their
/// service routines here.
pub static IRQ_TABLE: IrqTable = IrqTable::new();

/// Boot entry, reached from the reset vector with registers zeroed and
/// tp/sp pointing at the context region and boot stack.
#[no_mangle]
pub extern "C" fn boot_main() -> ! {
    let soc = Soc::new(PhysBus);
    let mut csr = HartCsr;
    let entry = BootSequencer::new(&soc).run(
        &mut csr,
        vectors::trap_vector_addr(),
        IRQ_TABLE.base_addr(),
    );

    // Hand the hart to whatever lives in execution RAM. The reference
    // application entry is an idle loop; real logic is loaded externally.
    unsafe {
        let app: unsafe extern "C" fn() -> ! = core::mem::transmute(entry.0 as usize);
        app()
    }
}

/// Trap service entry called from the trap vector with the saved frame.
///
/// # Safety
/// `frame` must point to the context frame the vector just filled.
#[no_mangle]
pub unsafe extern "C" fn trap_handler(frame: *mut ContextFrame) {
    let frame = unsafe { &mut *frame };
    let soc = Soc::new(PhysBus);
    let mut csr = HartCsr;
    match handle_trap(&soc, &mut csr, frame) {
        TrapOutcome::Resume => {}
        TrapOutcome::Fatal => halt(),
    }
}

/// Park the hart for the debugger or a reset.
pub fn halt() -> ! {
    loop {
        unsafe { core::arch::asm!("wfi", options(nomem, nostack)) };
    }
}

#[cfg(feature = "panic-handler")]
mod panic {
    use core::fmt::Write as _;
    use core::panic::PanicInfo;

    use soc::{map, PhysBus, Uart};

    use crate::trap::LED_FAULT_PATTERN;

    #[panic_handler]
    fn panic(info: &PanicInfo<'_>) -> ! {
        let mut uart = Uart::new(PhysBus, map::UART1_BASE);
        let _ = write!(uart, "panic: {}\r\n", info);
        soc::Gpio::new(PhysBus, map::GPIO_BASE).set_led(LED_FAULT_PATTERN);
        super::halt()
    }
}
