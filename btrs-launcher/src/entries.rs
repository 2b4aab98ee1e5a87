//! Turning devices into launcher entries.

use btrs::{Device, DeviceAction};
use serde::Serialize;
use std::path::Path;

/// One selectable row in the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LauncherEntry {
    pub title: String,
    pub description: String,
    /// Icon asset name, `<icon hint>_<connected>`.
    pub icon: String,
    pub path: String,
    /// What plain activation does.
    pub on_enter: DeviceAction,
    /// What alternate activation does.
    pub on_alt_enter: DeviceAction,
}

/// Formats a battery level for display, e.g. `"🔋 80%"`.
///
/// Levels at or below `low_battery` get the empty-battery glyph. Unknown
/// levels render as an empty string.
pub fn battery_label(battery: Option<u8>, low_battery: u8) -> String {
    match battery {
        Some(pct) if pct > low_battery => format!("🔋 {pct}%"),
        Some(pct) => format!("🪫 {pct}%"),
        None => String::new(),
    }
}

/// `"<address>"` for idle devices, `"<address>  |  ACTIVE  |  <battery>"`
/// for connected ones.
pub fn description(device: &Device, low_battery: u8) -> String {
    if device.connected {
        format!(
            "{}  |  ACTIVE  |  {}",
            device.address,
            battery_label(device.battery_percent, low_battery)
        )
    } else {
        device.address.clone()
    }
}

/// Picks the icon asset for a device.
///
/// With an `icon_dir`, hints that have no `<name>.png` there fall back to the
/// default icon for the connection state.
pub fn icon_name(device: &Device, icon_dir: Option<&Path>) -> String {
    let name = format!("{}_{}", device.icon_hint, device.connected);

    match icon_dir {
        Some(dir) if !dir.join(format!("{name}.png")).is_file() => {
            log::warn!("Icon not found: {name}.png");
            format!("{}_{}", btrs::defaults::ICON_HINT, device.connected)
        }
        _ => name,
    }
}

/// Keeps devices whose lowercase name contains `query`, sorted
/// case-insensitively by name.
///
/// The query is matched as typed, so an uppercase query matches nothing.
pub fn filter_and_sort(mut devices: Vec<Device>, query: Option<&str>) -> Vec<Device> {
    devices.sort_by_cached_key(|d| d.name.to_lowercase());

    match query {
        Some(q) => devices
            .into_iter()
            .filter(|d| d.name.to_lowercase().contains(q))
            .collect(),
        None => devices,
    }
}

/// Builds the entries for a query.
pub fn build_entries(
    devices: Vec<Device>,
    query: Option<&str>,
    low_battery: u8,
    icon_dir: Option<&Path>,
) -> Vec<LauncherEntry> {
    filter_and_sort(devices, query)
        .into_iter()
        .map(|device| LauncherEntry {
            description: description(&device, low_battery),
            icon: icon_name(&device, icon_dir),
            on_enter: DeviceAction::for_device(&device, false),
            on_alt_enter: DeviceAction::for_device(&device, true),
            title: device.name,
            path: device.path,
        })
        .collect()
}
