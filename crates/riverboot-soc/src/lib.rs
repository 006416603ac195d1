//! Memory map and typed register views for the River-class SoC.
//!
//! Every device is an owned handle over a [`Bus`] implementation. The
//! firmware injects these handles into the boot and trap paths instead of
//! touching ambient globals, so the same code runs against the physical
//! address map on target and against a `mock::MockBus` in unit tests.

#![no_std]

#[cfg(any(test, feature = "mock"))]
extern crate std;

pub mod bus;
pub mod gpio;
pub mod irqctrl;
pub mod map;
pub mod pnp;
pub mod uart;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use bus::{Bus, PhysBus};
pub use gpio::Gpio;
pub use irqctrl::IrqCtrl;
pub use pnp::PnpMap;
pub use uart::Uart;

/// The full device complement of the SoC, constructed over one shared bus.
///
/// This is the single handle the boot sequencer and the trap dispatcher
/// receive; the views inside address the fixed bases from [`map`].
pub struct Soc<B: Bus> {
    pub gpio: Gpio<B>,
    pub uart: Uart<B>,
    pub irqctrl: IrqCtrl<B>,
    pub pnp: PnpMap<B>,
    bus: B,
}

impl<B: Bus> Soc<B> {
    pub fn new(bus: B) -> Self {
        Self {
            gpio: Gpio::new(bus, map::GPIO_BASE),
            uart: Uart::new(bus, map::UART1_BASE),
            irqctrl: IrqCtrl::new(bus, map::IRQCTRL_BASE),
            pnp: PnpMap::new(bus, map::PNP_BASE),
            bus,
        }
    }

    /// The underlying bus, for raw transfers such as the image relocation.
    pub fn bus(&self) -> B {
        self.bus
    }
}
