use snafu::Snafu;

use crate::host_ports::PinOwner;

/// Reason the pin registry refused a claim or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
pub enum PinError {
    #[snafu(display("GPIO {pin} is not usable for the requested mode"))]
    InvalidPin { pin: i8 },

    #[snafu(display("GPIO {pin} is already allocated to {owner:?}"))]
    AlreadyAllocated { pin: u8, owner: PinOwner },

    #[snafu(display("GPIO {pin} is not owned by {owner:?}"))]
    NotOwner { pin: u8, owner: PinOwner },

    #[snafu(display("pin registry is full"))]
    RegistryFull,
}
