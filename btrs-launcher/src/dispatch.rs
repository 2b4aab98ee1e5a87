//! Handling an activated entry: run the action, then decide what to tell the
//! user and whether to run the on-connect script.

use btrs::{ActionOutcome, BluetoothManager, Device, DeviceAction, defaults};
use log::{debug, warn};

use crate::config::Preferences;
use crate::entries::battery_label;

/// A desktop notification to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// An on-connect script invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    pub program: String,
    pub args: Vec<String>,
}

/// Everything that came out of activating one device.
#[derive(Debug, Clone)]
pub struct Activation {
    /// The record reported on; placeholders if the device couldn't be read.
    pub device: Device,
    /// The action run, or `None` if none could be chosen.
    pub action: Option<DeviceAction>,
    pub outcome: ActionOutcome,
    pub notification: Option<Notification>,
    pub script: Option<ScriptRun>,
}

/// Stand-in record for a device that couldn't be read.
fn placeholder_device(path: &str) -> Device {
    Device {
        name: defaults::UNNAMED_DEVICE.to_string(),
        address: defaults::UNKNOWN_ADDRESS.to_string(),
        icon_hint: defaults::ICON_HINT.to_string(),
        connected: false,
        battery_percent: None,
        path: path.to_string(),
    }
}

/// Picks the notification for a finished action.
///
/// `device` is the record to report on; for a successful connect it should
/// be the settled record so the battery level is current.
pub fn notification_for(
    action: DeviceAction,
    outcome: &ActionOutcome,
    device: &Device,
    low_battery: u8,
) -> Notification {
    if !outcome.ok {
        return Notification::new("ERROR: ", outcome.message.clone());
    }

    match action {
        DeviceAction::Reset => Notification::new(&device.name, "Device connection reseted."),
        DeviceAction::Disconnect => Notification::new(&device.name, "Device disconnected."),
        DeviceAction::Connect => {
            let mut body = String::from("Device connected.");
            if device.battery_percent.is_some() {
                body.push_str(" Battery: ");
                body.push_str(&battery_label(device.battery_percent, low_battery));
            }
            Notification::new(&device.name, body)
        }
    }
}

/// The script to run after an action, if any.
///
/// Only a successful connect triggers it, with the device's name and address
/// as arguments.
pub fn script_for(
    action: DeviceAction,
    outcome: &ActionOutcome,
    device: &Device,
    prefs: &Preferences,
) -> Option<ScriptRun> {
    if action != DeviceAction::Connect || !outcome.ok {
        return None;
    }

    prefs.script().map(|program| ScriptRun {
        program: program.to_string(),
        args: vec![device.name.clone(), device.address.clone()],
    })
}

/// Activates the device at `path`.
///
/// With `action` unset, the action is chosen from the device's current state
/// (`reset` turns a disconnect into a reset). After a successful connect the
/// device is re-read once it settles so the notification can show its
/// battery; that re-read is skipped when notifications are off.
///
/// Never fails: if the device can't be read, an explicit `action` still runs
/// against a placeholder record, while a toggle reports the read error as a
/// failed outcome.
pub async fn activate(
    bt: &BluetoothManager,
    path: &str,
    action: Option<DeviceAction>,
    reset: bool,
    prefs: &Preferences,
) -> Activation {
    let (device, action) = match (bt.get_device(path).await, action) {
        (Ok(device), action) => {
            let action = action.unwrap_or_else(|| DeviceAction::for_device(&device, reset));
            (device, action)
        }
        (Err(e), Some(action)) => {
            warn!("Could not read {path} before {action}: {e}");
            (placeholder_device(path), action)
        }
        (Err(e), None) => {
            warn!("Could not read {path}: {e}");
            let outcome = ActionOutcome::failure(e.to_string());
            let device = placeholder_device(path);
            let notification = prefs.enable_notifications.then(|| {
                notification_for(DeviceAction::Connect, &outcome, &device, prefs.low_battery)
            });
            return Activation {
                device,
                action: None,
                outcome,
                notification,
                script: None,
            };
        }
    };

    let outcome = bt.perform(path, action).await;
    debug!("{action} {}: ok={} {}", device.name, outcome.ok, outcome.message);

    let reported = if prefs.enable_notifications && action == DeviceAction::Connect && outcome.ok {
        match bt.settle(path).await {
            Ok(settled) => settled,
            Err(e) => {
                warn!("Could not re-read {path} after connecting: {e}");
                device.clone()
            }
        }
    } else {
        device.clone()
    };

    let notification = prefs
        .enable_notifications
        .then(|| notification_for(action, &outcome, &reported, prefs.low_battery));
    let script = script_for(action, &outcome, &reported, prefs);

    Activation {
        device: reported,
        action: Some(action),
        outcome,
        notification,
        script,
    }
}
