//! In-memory GPIO bank for host builds.
//!
//! Tracks pin direction and level the way the hardware would, and keeps an
//! ordered log of every write so callers can check exactly what was driven.

use std::collections::{BTreeMap, BTreeSet};

use crate::host_ports::DigitalOutput;

#[derive(Debug, Default, Clone)]
pub struct MemoryGpio {
    outputs: BTreeSet<u8>,
    levels: BTreeMap<u8, bool>,
    writes: Vec<(u8, bool)>,
}

impl MemoryGpio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_output(&self, pin: u8) -> bool {
        self.outputs.contains(&pin)
    }

    /// Last level written to `pin`, `None` if it was never driven.
    pub fn level(&self, pin: u8) -> Option<bool> {
        self.levels.get(&pin).copied()
    }

    /// Every write in call order.
    pub fn writes(&self) -> &[(u8, bool)] {
        &self.writes
    }

    pub fn writes_to(&self, pin: u8) -> Vec<bool> {
        self.writes
            .iter()
            .filter(|(p, _)| *p == pin)
            .map(|(_, level)| *level)
            .collect()
    }
}

impl DigitalOutput for MemoryGpio {
    fn configure_output(&mut self, pin: u8) {
        self.outputs.insert(pin);
    }

    fn write(&mut self, pin: u8, level: bool) {
        if !self.is_output(pin) {
            log::debug!("write to GPIO {} before it was configured as output", pin);
        }
        self.levels.insert(pin, level);
        self.writes.push((pin, level));
    }
}
