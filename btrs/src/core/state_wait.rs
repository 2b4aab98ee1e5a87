//! Waiting for a freshly connected device to settle.
//!
//! BlueZ acknowledges `Connect` before every property reflects the new link:
//! `Connected` may still read `false`, and `Battery1` typically shows up a
//! moment later. Rather than sleeping for a fixed time, the device is re-read
//! on a short interval until it reports both, bounded by a timeout.

use futures_timer::Delay;
use log::debug;
use std::time::{Duration, Instant};

use crate::Result;
use crate::api::models::Device;
use crate::core::directory::get_device;
use crate::dbus::BluezTransport;

/// Whether a device has finished coming up.
fn settled(device: &Device) -> bool {
    device.connected && device.battery_percent.is_some()
}

/// Re-reads the device at `path` every `interval` until it is connected with
/// a battery reading, or until `timeout` elapses.
///
/// Returns the last record read; a device that never reports a battery is
/// returned as-is once the timeout is reached.
///
/// # Errors
///
/// Returns `BluetoothError::DeviceNotFound` only if no read succeeded at all.
pub(crate) async fn wait_for_connection(
    transport: &dyn BluezTransport,
    path: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<Device> {
    let deadline = Instant::now() + timeout;
    let mut last = None;

    loop {
        match get_device(transport, path).await {
            Ok(device) if settled(&device) => {
                debug!("{path} settled: connected, battery {:?}", device.battery_percent);
                return Ok(device);
            }
            Ok(device) => last = Some(Ok(device)),
            // Keep the last good read; an error only matters if nothing else was seen
            Err(e) => {
                if !matches!(last, Some(Ok(_))) {
                    last = Some(Err(e));
                }
            }
        }

        let now = Instant::now();
        if now >= deadline {
            break;
        }
        Delay::new(interval.min(deadline - now)).await;
    }

    debug!("Timed out after {timeout:?} waiting for {path} to settle");
    match last {
        Some(result) => result,
        // The loop body runs at least once
        None => get_device(transport, path).await,
    }
}
