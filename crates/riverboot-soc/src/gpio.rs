//! Status LED output.

use crate::bus::Bus;

const LED: u64 = 0x00;

/// Boot-progress LED bank. A single unconditional write per update; no
/// read-modify-write, which is safe under the single-hart driver model.
#[derive(Clone, Copy)]
pub struct Gpio<B: Bus> {
    bus: B,
    base: u64,
}

impl<B: Bus> Gpio<B> {
    pub const fn new(bus: B, base: u64) -> Self {
        Self { bus, base }
    }

    pub fn set_led(&self, pattern: u32) {
        self.bus.write_u32(self.base + LED, pattern);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::GPIO_BASE;
    use crate::mock::MockBus;

    #[test]
    fn set_led_is_one_write_to_the_led_register() {
        let bus = MockBus::new();
        let gpio = Gpio::new(&bus, GPIO_BASE);
        gpio.set_led(0x4);
        let writes = bus.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].addr, GPIO_BASE);
        assert_eq!(writes[0].value, 0x4);
    }
}
