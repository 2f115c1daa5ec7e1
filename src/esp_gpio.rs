use esp_idf_svc::sys::{
    esp_err_t, gpio_mode_t_GPIO_MODE_OUTPUT, gpio_num_t, gpio_reset_pin, gpio_set_direction,
    gpio_set_level, ESP_OK,
};

use crate::host_ports::DigitalOutput;

/// GPIO access by pin number through the ESP-IDF driver.
///
/// Pins are addressed numerically because usermods learn their pin from
/// configuration at runtime; ownership is arbitrated by the pin registry.
#[derive(Debug, Default)]
pub struct EspGpio;

impl EspGpio {
    pub fn new() -> Self {
        Self
    }
}

fn check(result: esp_err_t, what: &str, pin: u8) {
    if result != ESP_OK {
        log::error!("GPIO {}: {} failed ({})", pin, what, result);
    }
}

impl DigitalOutput for EspGpio {
    fn configure_output(&mut self, pin: u8) {
        let gpio = pin as gpio_num_t;
        check(unsafe { gpio_reset_pin(gpio) }, "reset", pin);
        check(
            unsafe { gpio_set_direction(gpio, gpio_mode_t_GPIO_MODE_OUTPUT) },
            "set direction",
            pin,
        );
    }

    fn write(&mut self, pin: u8, level: bool) {
        check(
            unsafe { gpio_set_level(pin as gpio_num_t, level as u32) },
            "set level",
            pin,
        );
    }
}
