//! Volatile bus access underneath the register views.

/// Width-explicit access to the physical address space.
///
/// Implementations must be cheap to copy: each register view holds its own
/// bus handle. All accesses are volatile with respect to the device they
/// target; `fence` orders prior loads/stores before subsequent device reads.
pub trait Bus: Copy {
    fn read_u8(&self, addr: u64) -> u8;
    fn write_u8(&self, addr: u64, val: u8);

    fn read_u32(&self, addr: u64) -> u32;
    fn write_u32(&self, addr: u64, val: u32);

    fn read_u64(&self, addr: u64) -> u64;
    fn write_u64(&self, addr: u64, val: u64);

    fn fence(&self);
}

/// Direct physical access. Only meaningful on the target SoC, where the
/// addresses in [`crate::map`] decode to real devices.
#[derive(Clone, Copy, Default)]
pub struct PhysBus;

impl Bus for PhysBus {
    #[inline(always)]
    fn read_u8(&self, addr: u64) -> u8 {
        unsafe { core::ptr::read_volatile(addr as usize as *const u8) }
    }

    #[inline(always)]
    fn write_u8(&self, addr: u64, val: u8) {
        unsafe { core::ptr::write_volatile(addr as usize as *mut u8, val) }
    }

    #[inline(always)]
    fn read_u32(&self, addr: u64) -> u32 {
        unsafe { core::ptr::read_volatile(addr as usize as *const u32) }
    }

    #[inline(always)]
    fn write_u32(&self, addr: u64, val: u32) {
        unsafe { core::ptr::write_volatile(addr as usize as *mut u32, val) }
    }

    #[inline(always)]
    fn read_u64(&self, addr: u64) -> u64 {
        unsafe { core::ptr::read_volatile(addr as usize as *const u64) }
    }

    #[inline(always)]
    fn write_u64(&self, addr: u64, val: u64) {
        unsafe { core::ptr::write_volatile(addr as usize as *mut u64, val) }
    }

    #[inline(always)]
    fn fence(&self) {
        cfg_if::cfg_if! {
            if #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))] {
                unsafe { core::arch::asm!("fence", options(nostack)) };
            } else {
                core::sync::atomic::fence(core::sync::atomic::Ordering::SeqCst);
            }
        }
    }
}
