//! Lifecycle contract the host drives every usermod through.

use crate::config_tree::{ConfigRoot, StatusLedConfig};
use crate::host_ports::{
    configured_pin, Connectivity, DigitalOutput, PinOwner, PinRegistry, PIN_UNSET,
};

/// Stable numeric identifier the host uses to look a usermod up.
pub type UsermodId = u16;

pub const USERMOD_ID_BOOT_STATUS_LED: UsermodId = 200;
pub const USERMOD_ID_WIFI_STATUS_LED: UsermodId = 201;

/// Host collaborators lent to a usermod for the duration of one hook.
pub struct HostPorts<'a> {
    pub pins: &'a mut dyn PinRegistry,
    pub gpio: &'a mut dyn DigitalOutput,
    pub network: &'a dyn Connectivity,
}

impl<'a> HostPorts<'a> {
    pub fn new(
        pins: &'a mut dyn PinRegistry,
        gpio: &'a mut dyn DigitalOutput,
        network: &'a dyn Connectivity,
    ) -> Self {
        Self {
            pins,
            gpio,
            network,
        }
    }
}

pub trait Usermod {
    /// Called once at startup, after configuration was imported.
    fn initialize(&mut self, host: &mut HostPorts<'_>);

    /// Called on every pass of the host loop.
    fn poll(&mut self, host: &mut HostPorts<'_>);

    /// Adds this usermod's section to `root`.
    fn export_configuration(&self, root: &mut ConfigRoot);

    /// Reads this usermod's section; `false` when it was missing or incomplete.
    fn import_configuration(&mut self, root: &ConfigRoot) -> bool;

    fn identifier(&self) -> UsermodId;
}

/// Claims the configured pin as an output and configures it.
///
/// On refusal the usermod is disabled for good: `pin` becomes unset and
/// `enabled` false. Returns the GPIO to drive, `None` if there is nothing to do.
pub(crate) fn claim_output_pin(
    config: &mut StatusLedConfig,
    host: &mut HostPorts<'_>,
    name: &str,
) -> Option<u8> {
    let pin = configured_pin(config.pin)?;
    if let Err(err) = host
        .pins
        .allocate(config.pin, true, PinOwner::UsermodUnspecified)
    {
        log::warn!("{}: {}, disabling", name, err);
        config.pin = PIN_UNSET;
        config.enabled = false;
        return None;
    }
    host.gpio.configure_output(pin);
    log::info!("{} on GPIO {}", name, pin);
    Some(pin)
}
