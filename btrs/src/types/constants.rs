//! Constants for BlueZ D-Bus names and record defaults.
//!
//! These correspond to the service, interface and property names BlueZ
//! exposes on the system bus, plus the placeholders used when a device
//! omits a property.

/// Well-known names on the system bus.
pub mod bus {
    pub const BLUEZ_SERVICE: &str = "org.bluez";
}

/// BlueZ interface names.
pub mod interface {
    pub const DEVICE: &str = "org.bluez.Device1";
    pub const BATTERY: &str = "org.bluez.Battery1";
}

/// Property keys read from `org.bluez.Device1` and `org.bluez.Battery1`.
pub mod property {
    pub const NAME: &str = "Name";
    pub const ADDRESS: &str = "Address";
    pub const ICON: &str = "Icon";
    pub const CONNECTED: &str = "Connected";
    pub const PERCENTAGE: &str = "Percentage";
}

/// Placeholders used when a device does not report a property.
pub mod defaults {
    pub const UNNAMED_DEVICE: &str = "Unnamed device";
    pub const UNKNOWN_ADDRESS: &str = "Unknown address";
    pub const ICON_HINT: &str = "default";
}

/// Valid range for a battery reading.
pub mod battery {
    pub const MIN_PERCENT: u8 = 0;
    pub const MAX_PERCENT: u8 = 100;
}

/// Timing used when waiting for a freshly connected device to settle.
///
/// BlueZ updates `Connected` and publishes `Battery1` a moment after
/// `Connect` returns, so the first read is often stale.
pub mod timeouts {
    use std::time::Duration;

    /// Upper bound on the post-connect wait (2 seconds).
    const SETTLE_TIMEOUT_SECS: u64 = 2;

    /// Delay between re-reads while waiting (250 ms).
    const POLL_INTERVAL_MS: u64 = 250;

    /// Returns the default post-connect settle timeout.
    pub fn settle_timeout() -> Duration {
        Duration::from_secs(SETTLE_TIMEOUT_SECS)
    }

    /// Returns the interval between device re-reads.
    pub fn poll_interval() -> Duration {
        Duration::from_millis(POLL_INTERVAL_MS)
    }
}
