use status_usermods::{BootStatusLed, ConfigRoot, Usermod, WifiStatusLed};

// Host loop period
#[cfg(target_os = "espidf")]
const POLL_INTERVAL_MS: u64 = 50;

/// Imports `root` into every usermod; on an incomplete tree, rewrites it from
/// the values now in effect.
fn load_configuration(usermods: &mut [&mut dyn Usermod], root: &mut ConfigRoot) {
    let mut complete = true;
    for usermod in usermods.iter_mut() {
        if !usermod.import_configuration(root) {
            log::warn!("Usermod {} config incomplete", usermod.identifier());
            complete = false;
        }
    }
    if !complete {
        for usermod in usermods.iter() {
            usermod.export_configuration(root);
        }
    }
}

fn seed_configuration() -> ConfigRoot {
    let Some(raw) = option_env!("USERMOD_CONFIG") else {
        return ConfigRoot::new();
    };
    match serde_json::from_str(raw) {
        Ok(root) => root,
        Err(err) => {
            log::error!("USERMOD_CONFIG is not a JSON object: {}", err);
            ConfigRoot::new()
        }
    }
}

#[cfg(target_os = "espidf")]
fn main() {
    use std::thread;
    use std::time::{Duration, Instant};

    use esp_idf_svc::{
        eventloop::EspSystemEventLoop, hal::prelude::Peripherals, nvs::EspDefaultNvsPartition,
    };
    use status_usermods::esp_gpio::EspGpio;
    use status_usermods::global_status::WIFI_CONNECTED;
    use status_usermods::wifi_link;
    use status_usermods::{HostPorts, PinManager};

    const WIFI_SSID: &str = match option_env!("WIFI_SSID") {
        Some(ssid) => ssid,
        None => "",
    };
    const WIFI_PASS: &str = match option_env!("WIFI_PASS") {
        Some(pass) => pass,
        None => "",
    };

    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    log::info!("Initializing status usermods...");

    // Fetch the peripherals, event loop, and NVS partition
    let (peripherals, sys_loop, nvs) = match (
        Peripherals::take(),
        EspSystemEventLoop::take(),
        EspDefaultNvsPartition::take(),
    ) {
        (Ok(p), Ok(s), Ok(n)) => (p, s, n),
        _ => {
            log::error!("System peripherals unavailable");
            return;
        }
    };

    // Prepare usermods
    let mut boot_led = BootStatusLed::new();
    let mut wifi_led = WifiStatusLed::new();

    // Load usermod configuration
    let mut config = seed_configuration();
    let mut usermods: [&mut dyn Usermod; 2] = [&mut boot_led, &mut wifi_led];
    load_configuration(&mut usermods, &mut config);
    log::info!(
        "Usermod config: {}",
        serde_json::Value::Object(config.clone())
    );

    // Initialize pin registry and GPIO
    let mut pins = PinManager::esp32();
    let mut gpio = EspGpio::new();

    // Initialize WiFi status LED
    {
        let mut host = HostPorts::new(&mut pins, &mut gpio, &WIFI_CONNECTED);
        wifi_led.initialize(&mut host);
    }

    // Setup WiFi
    let wifi_setup = wifi_link::wifi_setup(peripherals.modem, sys_loop, nvs, WIFI_SSID, WIFI_PASS);
    let mut wifi = match wifi_setup {
        Ok(wifi) => Some(wifi),
        Err(err) => {
            log::error!("WiFi setup failed: {}", err);
            None
        }
    };

    // Connect WiFi
    if let Some(wifi) = wifi.as_mut() {
        if let Err(err) =
            wifi_link::wifi_connect(wifi, Duration::from_millis(500), Duration::from_secs(20))
        {
            log::error!("WiFi connect failed: {}", err);
        }
    }

    // Boot is complete once the network has been brought up (or given up on)
    {
        let mut host = HostPorts::new(&mut pins, &mut gpio, &WIFI_CONNECTED);
        boot_led.initialize(&mut host);
    }

    // Report Ready
    log::info!("Status usermods ready!");

    // Initialize Loop Timer
    let mut next_refresh = Instant::now() + Duration::from_millis(POLL_INTERVAL_MS);
    loop {
        // Refresh connectivity flag
        if let Some(wifi) = wifi.as_ref() {
            wifi_link::wifi_refresh(wifi, &WIFI_CONNECTED);
        }

        // Poll usermods
        {
            let mut host = HostPorts::new(&mut pins, &mut gpio, &WIFI_CONNECTED);
            boot_led.poll(&mut host);
            wifi_led.poll(&mut host);
        }

        // Sleep for ~50ms
        thread::sleep(next_refresh.saturating_duration_since(Instant::now()));

        // Update next refresh time
        next_refresh += Duration::from_millis(POLL_INTERVAL_MS);
    }
}

/// Off target there is no GPIO to drive; print the configuration tree the
/// firmware would run with.
#[cfg(not(target_os = "espidf"))]
fn main() {
    let mut boot_led = BootStatusLed::new();
    let mut wifi_led = WifiStatusLed::new();

    let mut config = seed_configuration();
    let mut usermods: [&mut dyn Usermod; 2] = [&mut boot_led, &mut wifi_led];
    load_configuration(&mut usermods, &mut config);

    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("Failed to encode configuration: {}", err),
    }
}
