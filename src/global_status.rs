use std::sync::atomic::{AtomicBool, Ordering};

use crate::host_ports::Connectivity;

// Global status flags for the firmware
// WiFi station associated and has an IP
pub static WIFI_CONNECTED: AtomicBool = AtomicBool::new(false);

impl Connectivity for AtomicBool {
    fn is_connected(&self) -> bool {
        self.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_reads_through() {
        let flag = AtomicBool::new(false);
        assert!(!flag.is_connected());
        flag.store(true, Ordering::SeqCst);
        assert!(flag.is_connected());
    }
}
