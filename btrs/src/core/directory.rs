//! Device enumeration and property decoding.
//!
//! Lists BlueZ devices through the object manager and turns each device's
//! `Device1` property map into a [`Device`] record. Battery readings are
//! best-effort: a device whose battery can't be read is still listed.

use log::{debug, warn};

use crate::Result;
use crate::api::models::{BluetoothError, Device};
use crate::dbus::{BluezTransport, PropertyMap};
use crate::types::constants::{defaults, interface, property};
use crate::util::utils::{bool_prop, percentage_prop, string_prop};

/// Maps a `Device1` property map into a [`Device`].
///
/// Missing, empty or mistyped `Name`, `Address` and `Icon` fall back to the
/// placeholders in [`defaults`]; a missing `Connected` reads as `false`. The
/// battery is left unset; see [`read_battery`].
pub(crate) fn device_from_properties(path: &str, props: &PropertyMap) -> Device {
    Device {
        name: string_prop(props, property::NAME)
            .unwrap_or_else(|| defaults::UNNAMED_DEVICE.to_string()),
        address: string_prop(props, property::ADDRESS)
            .unwrap_or_else(|| defaults::UNKNOWN_ADDRESS.to_string()),
        icon_hint: string_prop(props, property::ICON)
            .unwrap_or_else(|| defaults::ICON_HINT.to_string()),
        connected: bool_prop(props, property::CONNECTED).unwrap_or(false),
        battery_percent: None,
        path: path.to_string(),
    }
}

/// Reads the battery level of the device at `path`.
///
/// Any failure is treated as "no battery information".
pub(crate) async fn read_battery(transport: &dyn BluezTransport, path: &str) -> Option<u8> {
    match transport.properties(path, interface::BATTERY).await {
        Ok(props) => {
            let pct = percentage_prop(&props, property::PERCENTAGE);
            if pct.is_none() {
                debug!("Battery1 on {path} has no usable Percentage");
            }
            pct
        }
        Err(e) => {
            debug!("No battery information for {path}: {e}");
            None
        }
    }
}

/// Builds a full record for the device at `path`, battery included.
async fn load_device(
    transport: &dyn BluezTransport,
    path: &str,
    props: &PropertyMap,
) -> Device {
    let mut device = device_from_properties(path, props);
    if device.connected {
        device.battery_percent = read_battery(transport, path).await;
    }
    device
}

/// Lists every device BlueZ manages, in no particular order.
///
/// Objects without `org.bluez.Device1` (adapters, the root, batteries) are
/// skipped. A device whose properties can't be fetched is skipped with a
/// warning rather than failing the whole listing.
///
/// # Errors
///
/// Returns `BluetoothError::DirectoryUnavailable` if the object manager
/// can't be queried.
pub(crate) async fn list_devices(transport: &dyn BluezTransport) -> Result<Vec<Device>> {
    let objects = transport
        .managed_objects()
        .await
        .map_err(BluetoothError::DirectoryUnavailable)?;

    let mut devices = Vec::new();
    for (path, interfaces) in &objects {
        if !interfaces.contains_key(interface::DEVICE) {
            continue;
        }

        let path = path.as_str();
        let props = match transport.properties(path, interface::DEVICE).await {
            Ok(props) => props,
            Err(e) => {
                warn!("Skipping device {path}: failed to read properties: {e}");
                continue;
            }
        };

        devices.push(load_device(transport, path, &props).await);
    }

    debug!("Found {} Bluetooth devices", devices.len());
    Ok(devices)
}

/// Reads one device by object path.
///
/// # Errors
///
/// Returns `BluetoothError::DeviceNotFound` if the path no longer resolves
/// to a device.
pub(crate) async fn get_device(transport: &dyn BluezTransport, path: &str) -> Result<Device> {
    let props = transport
        .properties(path, interface::DEVICE)
        .await
        .map_err(|source| BluetoothError::DeviceNotFound {
            path: path.to_string(),
            source,
        })?;

    Ok(load_device(transport, path, &props).await)
}
