use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{json, Value};
use status_usermods::{
    BootStatusLed, ConfigRoot, HostPorts, MemoryGpio, PinManager, PinOwner, PinRegistry, Usermod,
    WifiStatusLed, PIN_UNSET,
};

struct Host {
    pins: PinManager,
    gpio: MemoryGpio,
    network: AtomicBool,
}

impl Host {
    fn new() -> Self {
        Self {
            pins: PinManager::esp32(),
            gpio: MemoryGpio::new(),
            network: AtomicBool::new(false),
        }
    }

    fn initialize(&mut self, usermod: &mut dyn Usermod) {
        usermod.initialize(&mut HostPorts::new(
            &mut self.pins,
            &mut self.gpio,
            &self.network,
        ));
    }

    fn poll(&mut self, usermod: &mut dyn Usermod, connected: bool) {
        self.network.store(connected, Ordering::SeqCst);
        usermod.poll(&mut HostPorts::new(
            &mut self.pins,
            &mut self.gpio,
            &self.network,
        ));
    }
}

fn object(value: Value) -> ConfigRoot {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn wifi_led_inverted_sequence() {
    let mut host = Host::new();
    let mut led = WifiStatusLed::new().with_pin(4).with_inverted(true);
    host.initialize(&mut led);
    assert_eq!(host.gpio.writes_to(4), vec![true]);

    let expected_after_tick = [vec![true], vec![true], vec![true, false], vec![true, false, true]];
    for (connected, expected) in [false, false, true, false].into_iter().zip(expected_after_tick) {
        host.poll(&mut led, connected);
        assert_eq!(host.gpio.writes_to(4), expected);
    }
}

#[test]
fn wifi_led_write_count_matches_changes() {
    let sequence = [true, true, false, true, true, true, false, false, true];
    let changes = sequence
        .iter()
        .scan(false, |last, v| {
            let changed = *v != *last;
            *last = *v;
            Some(changed)
        })
        .filter(|changed| *changed)
        .count();

    let mut host = Host::new();
    let mut led = WifiStatusLed::new().with_pin(4);
    host.initialize(&mut led);
    for connected in sequence {
        host.poll(&mut led, connected);
    }
    // one write at setup, one per change
    assert_eq!(host.gpio.writes_to(4).len(), 1 + changes);
}

#[test]
fn boot_led_refused_pin_never_written() {
    let mut host = Host::new();
    host.pins.allocate(5, true, PinOwner::LedBus).unwrap();
    let mut led = BootStatusLed::new().with_pin(5);
    host.initialize(&mut led);
    for _ in 0..10 {
        host.poll(&mut led, true);
    }
    assert!(!led.enabled());
    assert_eq!(led.config().pin, PIN_UNSET);
    assert!(host.gpio.writes().is_empty());
}

#[test]
fn both_leds_share_the_registry() {
    let mut host = Host::new();
    let mut boot = BootStatusLed::new().with_pin(2);
    let mut wifi = WifiStatusLed::new().with_pin(2);
    host.initialize(&mut boot);
    host.initialize(&mut wifi);

    assert!(boot.enabled());
    assert!(!wifi.enabled());
    assert_eq!(wifi.pin(), None);
    assert_eq!(host.gpio.writes(), &[(2, false)]);
}

#[test]
fn configuration_round_trip() {
    for (enabled, pin, inverted) in [(true, 0, false), (false, 21, true), (true, PIN_UNSET, true)] {
        let boot = BootStatusLed::new()
            .with_enabled(enabled)
            .with_pin(pin)
            .with_inverted(inverted);
        let wifi = WifiStatusLed::new()
            .with_enabled(!enabled)
            .with_pin(pin)
            .with_inverted(!inverted);

        let mut root = ConfigRoot::new();
        boot.export_configuration(&mut root);
        wifi.export_configuration(&mut root);

        let mut boot_back = BootStatusLed::new();
        let mut wifi_back = WifiStatusLed::new();
        assert!(boot_back.import_configuration(&root));
        assert!(wifi_back.import_configuration(&root));
        assert_eq!(boot_back.config(), boot.config());
        assert_eq!(wifi_back.config(), wifi.config());
    }
}

#[test]
fn exported_sections_use_host_schema() {
    let mut root = ConfigRoot::new();
    BootStatusLed::new().export_configuration(&mut root);
    WifiStatusLed::new().export_configuration(&mut root);
    assert_eq!(
        Value::Object(root),
        json!({
            "Boot Status LED": { "enabled": true, "pin": 1, "inverted": true },
            "WiFi Status LED": { "enabled": true, "pin": 0, "inverted": true },
        })
    );
}

#[test]
fn import_with_missing_pin_applies_the_rest() {
    let root = object(json!({
        "WiFi Status LED": { "enabled": false, "inverted": false }
    }));
    let mut led = WifiStatusLed::new().with_pin(13);
    assert!(!led.import_configuration(&root));
    assert!(!led.enabled());
    assert!(!led.inverted());
    assert_eq!(led.pin(), Some(13));
}

#[test]
fn import_without_section_changes_nothing() {
    let root = object(json!({ "Boot Status LED": { "enabled": false, "pin": 3, "inverted": false } }));
    let mut led = WifiStatusLed::new();
    assert!(!led.import_configuration(&root));
    assert_eq!(led.config(), WifiStatusLed::new().config());
}

#[test]
fn identifiers_are_distinct() {
    assert_ne!(
        BootStatusLed::new().identifier(),
        WifiStatusLed::new().identifier()
    );
}
