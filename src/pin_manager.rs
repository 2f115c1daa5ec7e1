use core::ops::RangeInclusive;

use heapless::Vec;

use crate::error::PinError;
use crate::host_ports::{PinOwner, PinRegistry};

// Upper bound on simultaneous claims; larger than any ESP32 variant's GPIO count.
const MAX_ALLOCATIONS: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Allocation {
    pin: u8,
    owner: PinOwner,
}

/// Host-side pin ownership registry.
///
/// A pin is claimable when it exists on the chip, is not reserved (flash
/// pins), and, for outputs, is not input only. Each pin has at most one owner.
#[derive(Debug, Clone)]
pub struct PinManager {
    gpio_count: u8,
    reserved: Option<RangeInclusive<u8>>,
    input_only: Option<RangeInclusive<u8>>,
    allocations: Vec<Allocation, MAX_ALLOCATIONS>,
}

impl PinManager {
    pub fn new(gpio_count: u8) -> Self {
        Self {
            gpio_count,
            reserved: None,
            input_only: None,
            allocations: Vec::new(),
        }
    }

    /// Classic ESP32: GPIO 6..=11 drive the SPI flash, 34..=39 have no output stage.
    pub fn esp32() -> Self {
        Self::new(40).with_reserved(6..=11).with_input_only(34..=39)
    }

    pub fn with_reserved(mut self, pins: RangeInclusive<u8>) -> Self {
        self.reserved = Some(pins);
        self
    }

    pub fn with_input_only(mut self, pins: RangeInclusive<u8>) -> Self {
        self.input_only = Some(pins);
        self
    }

    /// Whether `pin` may be claimed in the given direction, ignoring current claims.
    pub fn is_pin_ok(&self, pin: i8, output: bool) -> bool {
        let Ok(pin) = u8::try_from(pin) else {
            return false;
        };
        if pin >= self.gpio_count {
            return false;
        }
        if self.reserved.as_ref().is_some_and(|r| r.contains(&pin)) {
            return false;
        }
        !(output && self.input_only.as_ref().is_some_and(|r| r.contains(&pin)))
    }

    pub fn owner_of(&self, pin: u8) -> Option<PinOwner> {
        self.allocations
            .iter()
            .find(|a| a.pin == pin)
            .map(|a| a.owner)
    }

    pub fn is_allocated(&self, pin: u8) -> bool {
        self.owner_of(pin).is_some()
    }

    /// Releases `pin`; only the tag that claimed it may do so.
    pub fn deallocate(&mut self, pin: u8, owner: PinOwner) -> Result<(), PinError> {
        let index = self
            .allocations
            .iter()
            .position(|a| a.pin == pin && a.owner == owner)
            .ok_or(PinError::NotOwner { pin, owner })?;
        self.allocations.swap_remove(index);
        log::debug!("GPIO {} released by {:?}", pin, owner);
        Ok(())
    }
}

impl Default for PinManager {
    fn default() -> Self {
        Self::esp32()
    }
}

impl PinRegistry for PinManager {
    fn allocate(&mut self, pin: i8, output: bool, owner: PinOwner) -> Result<(), PinError> {
        if !self.is_pin_ok(pin, output) {
            return Err(PinError::InvalidPin { pin });
        }
        // is_pin_ok rejected negatives
        let pin = pin as u8;
        if let Some(current) = self.owner_of(pin) {
            return Err(PinError::AlreadyAllocated {
                pin,
                owner: current,
            });
        }
        self.allocations
            .push(Allocation { pin, owner })
            .map_err(|_| PinError::RegistryFull)?;
        log::debug!("GPIO {} allocated to {:?}", pin, owner);
        Ok(())
    }
}
