//! Boot status LED: lit once setup finishes and left that way.

use crate::config_tree::{ConfigRoot, StatusLedConfig};
use crate::host_ports::{configured_pin, physical_level};
use crate::usermod::{
    claim_output_pin, HostPorts, Usermod, UsermodId, USERMOD_ID_BOOT_STATUS_LED,
};

pub const CONFIG_SECTION: &str = "Boot Status LED";

pub const DEFAULT_PIN: i8 = 1;
pub const DEFAULT_INVERTED: bool = true;

#[derive(Debug, Clone)]
pub struct BootStatusLed {
    config: StatusLedConfig,
    led_state: bool,
}

impl BootStatusLed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    pub fn with_pin(mut self, pin: i8) -> Self {
        self.config.pin = pin;
        self
    }

    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.config.inverted = inverted;
        self
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// Configured pin, `None` when unset or disabled by a refused claim.
    pub fn pin(&self) -> Option<u8> {
        configured_pin(self.config.pin)
    }

    pub fn inverted(&self) -> bool {
        self.config.inverted
    }

    /// Logical state last driven onto the pin.
    pub fn led_state(&self) -> bool {
        self.led_state
    }

    pub fn config(&self) -> StatusLedConfig {
        self.config
    }
}

impl Default for BootStatusLed {
    fn default() -> Self {
        Self {
            config: StatusLedConfig {
                enabled: true,
                pin: DEFAULT_PIN,
                inverted: DEFAULT_INVERTED,
            },
            led_state: false,
        }
    }
}

impl Usermod for BootStatusLed {
    // `enabled` is not consulted here; a configured pin is always claimed.
    fn initialize(&mut self, host: &mut HostPorts<'_>) {
        let Some(pin) = claim_output_pin(&mut self.config, host, CONFIG_SECTION) else {
            return;
        };
        self.led_state = true;
        host.gpio
            .write(pin, physical_level(self.led_state, self.config.inverted));
    }

    fn poll(&mut self, _host: &mut HostPorts<'_>) {
        // LED stays on once boot is complete
    }

    fn export_configuration(&self, root: &mut ConfigRoot) {
        self.config.export(root, CONFIG_SECTION);
    }

    fn import_configuration(&mut self, root: &ConfigRoot) -> bool {
        self.config.import(root, CONFIG_SECTION)
    }

    fn identifier(&self) -> UsermodId {
        USERMOD_ID_BOOT_STATUS_LED
    }
}
