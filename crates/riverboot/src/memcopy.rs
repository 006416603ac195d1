//! Bus-mediated memory copy, used for the firmware image relocation.

use soc::Bus;

/// Copy `len` bytes from `src` to `dst` through the bus: 8-byte words
/// while both cursors stay aligned, byte granularity otherwise.
///
/// No bounds check against the destination window; the caller supplies a
/// size that fits. Source and destination never alias in this firmware.
pub fn copy<B: Bus>(bus: B, mut dst: u64, mut src: u64, mut len: u64) {
    while len >= 8 && dst % 8 == 0 && src % 8 == 0 {
        bus.write_u64(dst, bus.read_u64(src));
        dst += 8;
        src += 8;
        len -= 8;
    }
    while len > 0 {
        bus.write_u8(dst, bus.read_u8(src));
        dst += 1;
        src += 1;
        len -= 1;
    }
}
