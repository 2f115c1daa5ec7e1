//! Ports for the collaborators the host firmware owns.
//!
//! Usermods never reach for globals: the pin registry, the GPIO driver and
//! the connectivity flag are handed to them through these traits so the same
//! code runs against ESP-IDF on target and in-memory doubles on the host.

use crate::error::PinError;

/// Sentinel pin number meaning "no pin configured".
pub const PIN_UNSET: i8 = -1;

/// Tag recorded by the pin registry for every claimed pin.
///
/// Status LEDs claim as `UsermodUnspecified`; the other tags stand for the
/// host's own subsystems that may already hold a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinOwner {
    LedBus,
    Button,
    Relay,
    UsermodUnspecified,
}

/// Arbitrates exclusive claims on GPIO pins.
pub trait PinRegistry {
    fn allocate(&mut self, pin: i8, output: bool, owner: PinOwner) -> Result<(), PinError>;
}

/// Plain digital output primitives.
pub trait DigitalOutput {
    fn configure_output(&mut self, pin: u8);
    fn write(&mut self, pin: u8, level: bool);
}

/// Current network association state.
pub trait Connectivity {
    fn is_connected(&self) -> bool;
}

/// Converts a configured pin number into a GPIO index, `None` when unset.
pub fn configured_pin(pin: i8) -> Option<u8> {
    u8::try_from(pin).ok()
}

/// Physical level for a logical state, honouring active-low wiring.
pub fn physical_level(state: bool, inverted: bool) -> bool {
    if inverted {
        !state
    } else {
        state
    }
}
