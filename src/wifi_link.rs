use std::sync::atomic::{AtomicBool, Ordering};
use std::{
    thread::sleep,
    time::{Duration, Instant},
};

use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::sys::EspError;
use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    nvs::EspDefaultNvsPartition,
    wifi::{BlockingWifi, ClientConfiguration, Configuration, EspWifi},
};
use heapless::String;
use snafu::{ResultExt, Snafu};

#[derive(Debug, Snafu)]
pub enum WifiLinkError {
    #[snafu(display("WiFi credentials too long"))]
    Credentials,

    #[snafu(display("WiFi driver error: {source}"))]
    Driver { source: EspError },

    #[snafu(display("WiFi connection timed out"))]
    Timeout,
}

pub fn wifi_setup<'a>(
    modem: Modem,
    sys_loop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
    wifi_ssid: &str,
    wifi_password: &str,
) -> Result<BlockingWifi<EspWifi<'a>>, WifiLinkError> {
    // Configure the WiFi
    log::info!("Configuring WiFi...");

    // Fit the credentials into the driver's fixed-size strings
    let ssid: String<32> = wifi_ssid.try_into().map_err(|_| WifiLinkError::Credentials)?;
    let password: String<64> = wifi_password
        .try_into()
        .map_err(|_| WifiLinkError::Credentials)?;

    // Initialize the WiFi driver
    let mut wifi_driver: EspWifi<'a> =
        EspWifi::new(modem, sys_loop.clone(), Some(nvs)).context(DriverSnafu)?;

    // Configure the WiFi driver
    wifi_driver
        .set_configuration(&Configuration::Client(ClientConfiguration {
            ssid,
            password,
            ..Default::default()
        }))
        .context(DriverSnafu)?;

    // Wrap in Blocking
    let mut blocking_wifi_driver = BlockingWifi::wrap(wifi_driver, sys_loop).context(DriverSnafu)?;

    // Start the WiFi driver
    blocking_wifi_driver.start().context(DriverSnafu)?;

    Ok(blocking_wifi_driver)
}

pub fn wifi_connect(
    wifi_driver: &mut BlockingWifi<EspWifi>,
    wifi_poll_interval: Duration,
    wifi_timeout: Duration,
) -> Result<(), WifiLinkError> {
    // Connect to the WiFi network
    log::info!("Connecting to WiFi...");
    wifi_driver.connect().context(DriverSnafu)?;
    log::info!("WiFi association established!");

    // Set the WiFi timeout
    let start_time = Instant::now();

    // Poll the WiFi connection status
    loop {
        let is_connected = wifi_driver.is_connected().context(DriverSnafu)?;
        let is_up = wifi_driver.is_up().context(DriverSnafu)?;
        log::info!(
            "WiFi connection status: connected={}, up={}",
            is_connected,
            is_up
        );

        if is_connected && is_up {
            break;
        }

        if start_time.elapsed() > wifi_timeout {
            return Err(WifiLinkError::Timeout);
        }

        sleep(wifi_poll_interval);
    }

    // Report the assigned address
    match wifi_driver.wifi().sta_netif().get_ip_info() {
        Ok(ip_info) => log::info!("Connected to WiFi network: {:?}", ip_info),
        Err(err) => log::warn!("Connected, but IP info unavailable: {}", err),
    }
    Ok(())
}

/// Publishes the current association state into `flag`.
///
/// Driver errors count as disconnected.
pub fn wifi_refresh(wifi_driver: &BlockingWifi<EspWifi>, flag: &AtomicBool) {
    // Check WiFi connection status
    let connected = matches!(
        (wifi_driver.is_connected(), wifi_driver.is_up()),
        (Ok(true), Ok(true))
    );
    // Publish and report transitions only
    if flag.swap(connected, Ordering::SeqCst) != connected {
        log::info!("WiFi {}", if connected { "up" } else { "down" });
    }
}
