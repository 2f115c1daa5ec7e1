//! Status LED usermods for an ESP32 LED controller firmware.
//!
//! Two plugins, each owning a single GPIO: [`BootStatusLed`] lights its pin
//! once setup completes, [`WifiStatusLed`] mirrors station connectivity.
//! Host collaborators are reached through the traits in [`host_ports`].

pub mod boot_status_led;
pub mod config_tree;
pub mod error;
pub mod global_status;
pub mod host_ports;
pub mod memory_gpio;
pub mod pin_manager;
pub mod usermod;
pub mod wifi_status_led;

#[cfg(target_os = "espidf")]
pub mod esp_gpio;
#[cfg(target_os = "espidf")]
pub mod wifi_link;

pub use boot_status_led::BootStatusLed;
pub use config_tree::{ConfigRoot, StatusLedConfig};
pub use error::PinError;
pub use host_ports::{Connectivity, DigitalOutput, PinOwner, PinRegistry, PIN_UNSET};
pub use memory_gpio::MemoryGpio;
pub use pin_manager::PinManager;
pub use usermod::{HostPorts, Usermod, UsermodId};
pub use wifi_status_led::WifiStatusLed;
