//! WiFi status LED: mirrors the connectivity flag onto a GPIO.
//!
//! Setup drives the "not connected" level directly but leaves the remembered
//! state at `false`. If the station is already associated by the first poll,
//! that poll writes the connected level; if it is not, nothing is written.

use crate::config_tree::{ConfigRoot, StatusLedConfig};
use crate::host_ports::{configured_pin, physical_level};
use crate::usermod::{
    claim_output_pin, HostPorts, Usermod, UsermodId, USERMOD_ID_WIFI_STATUS_LED,
};

pub const CONFIG_SECTION: &str = "WiFi Status LED";

pub const DEFAULT_PIN: i8 = 0;
pub const DEFAULT_INVERTED: bool = true;

#[derive(Debug, Clone)]
pub struct WifiStatusLed {
    config: StatusLedConfig,
    last_connected: bool,
}

impl WifiStatusLed {
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

    pub fn pin(&self) -> Option<u8> {
        configured_pin(self.config.pin)
    }

    pub fn inverted(&self) -> bool {
        self.config.inverted
    }

    /// Connectivity as seen on the most recent poll that changed it.
    pub fn last_connected(&self) -> bool {
        self.last_connected
    }

    pub fn config(&self) -> StatusLedConfig {
        self.config
    }
}

impl Default for WifiStatusLed {
    fn default() -> Self {
        Self {
            config: StatusLedConfig {
                enabled: true,
                pin: DEFAULT_PIN,
                inverted: DEFAULT_INVERTED,
            },
            last_connected: false,
        }
    }
}

impl Usermod for WifiStatusLed {
    fn initialize(&mut self, host: &mut HostPorts<'_>) {
        let Some(pin) = claim_output_pin(&mut self.config, host, CONFIG_SECTION) else {
            return;
        };
        host.gpio.write(pin, physical_level(false, self.config.inverted));
    }

    fn poll(&mut self, host: &mut HostPorts<'_>) {
        if !self.config.enabled {
            return;
        }
        let Some(pin) = self.pin() else {
            return;
        };

        let connected = host.network.is_connected();
        if connected != self.last_connected {
            log::debug!(
                "{}: {}",
                CONFIG_SECTION,
                if connected { "connected" } else { "disconnected" }
            );
            self.last_connected = connected;
            host.gpio
                .write(pin, physical_level(connected, self.config.inverted));
        }
    }

    fn export_configuration(&self, root: &mut ConfigRoot) {
        self.config.export(root, CONFIG_SECTION);
    }

    fn import_configuration(&mut self, root: &ConfigRoot) -> bool {
        self.config.import(root, CONFIG_SECTION)
    }

    fn identifier(&self) -> UsermodId {
        USERMOD_ID_WIFI_STATUS_LED
    }
}
