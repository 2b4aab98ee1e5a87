use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A Bluetooth device known to BlueZ.
///
/// Records are rebuilt on every query and describe the device only as it was
/// at that instant; it may disconnect right after being read.
///
/// # Examples
///
/// ```no_run
/// use btrs::BluetoothManager;
///
/// # async fn example() -> btrs::Result<()> {
/// let bt = BluetoothManager::new().await?;
/// let mut devices = bt.list_devices().await?;
/// devices.sort_by_key(|d| d.name.to_lowercase());
///
/// for device in devices {
///     println!("{device}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Display name, `"Unnamed device"` when BlueZ reports none.
    pub name: String,
    /// Hardware address (e.g. `"AA:BB:CC:DD:EE:FF"`), `"Unknown address"` when missing.
    pub address: String,
    /// Icon hint such as `"audio-headset"`, `"default"` when missing.
    pub icon_hint: String,
    /// Whether the device was connected when read.
    pub connected: bool,
    /// Battery level 0-100; only ever set for connected devices that report one.
    pub battery_percent: Option<u8>,
    /// D-Bus object path used to address the device.
    pub path: String,
}

impl Display for Device {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.address)?;
        if self.connected {
            write!(f, " [connected]")?;
        }
        if let Some(pct) = self.battery_percent {
            write!(f, " {pct}%")?;
        }
        Ok(())
    }
}

/// Result of a connect, disconnect or reset.
///
/// Actions never fail with an error; a remote failure is carried here with
/// `ok == false` and the remote error text in `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Whether every remote call the action made was accepted.
    pub ok: bool,
    /// Remote error text on failure; empty on success.
    pub message: String,
}

impl ActionOutcome {
    /// A successful outcome with an empty message.
    pub fn success() -> Self {
        Self {
            ok: true,
            message: String::new(),
        }
    }

    /// A failed outcome carrying the remote error text.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }

    /// Converts the outcome into a `Result`, mapping failure to
    /// [`BluetoothError::ActionFailed`].
    pub fn into_result(self) -> crate::Result<()> {
        if self.ok {
            Ok(())
        } else {
            Err(BluetoothError::ActionFailed(self.message))
        }
    }
}

/// A user-level action on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceAction {
    /// `Device1.Connect`.
    Connect,
    /// `Device1.Disconnect`.
    Disconnect,
    /// Disconnect immediately followed by connect.
    Reset,
}

impl DeviceAction {
    /// The action bound to activating `device`: disconnect when connected,
    /// connect otherwise. With `reset` set, a connected device is reset
    /// instead.
    pub fn for_device(device: &Device, reset: bool) -> Self {
        match (device.connected, reset) {
            (true, true) => DeviceAction::Reset,
            (true, false) => DeviceAction::Disconnect,
            (false, _) => DeviceAction::Connect,
        }
    }
}

impl Display for DeviceAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceAction::Connect => write!(f, "connect"),
            DeviceAction::Disconnect => write!(f, "disconnect"),
            DeviceAction::Reset => write!(f, "reset"),
        }
    }
}

/// Errors that can occur while talking to BlueZ.
#[derive(Debug, Error)]
pub enum BluetoothError {
    /// A D-Bus communication error occurred outside of a device query.
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    /// Enumerating BlueZ's managed objects failed.
    #[error("Bluetooth directory unavailable: {0}")]
    DirectoryUnavailable(#[source] zbus::Error),

    /// The object path no longer resolves to a Bluetooth device.
    #[error("device not found at {path}: {source}")]
    DeviceNotFound {
        path: String,
        #[source]
        source: zbus::Error,
    },

    /// A connect, disconnect or reset was rejected; carries the remote text.
    #[error("{0}")]
    ActionFailed(String),
}
