//! Connect, disconnect and reset.
//!
//! Every action is a single pass through BlueZ with no retries. Remote
//! failures never escape as errors; they are folded into an
//! [`ActionOutcome`] carrying the remote error text.

use log::{debug, info, warn};

use crate::api::models::{ActionOutcome, DeviceAction};
use crate::dbus::{BluezTransport, DeviceMethod};
use crate::util::utils::remote_error_message;

/// Invokes one `Device1` method and converts the reply into an outcome.
async fn invoke(transport: &dyn BluezTransport, path: &str, method: DeviceMethod) -> ActionOutcome {
    match transport.call(path, method).await {
        Ok(()) => ActionOutcome::success(),
        Err(e) => {
            let message = remote_error_message(&e);
            warn!("{method} failed for {path}: {message}");
            ActionOutcome::failure(message)
        }
    }
}

/// Asks BlueZ to connect the device at `path`.
pub(crate) async fn connect(transport: &dyn BluezTransport, path: &str) -> ActionOutcome {
    debug!("Connecting {path}");
    let outcome = invoke(transport, path, DeviceMethod::Connect).await;
    if outcome.ok {
        info!("Connected {path}");
    }
    outcome
}

/// Asks BlueZ to disconnect the device at `path`.
pub(crate) async fn disconnect(transport: &dyn BluezTransport, path: &str) -> ActionOutcome {
    debug!("Disconnecting {path}");
    let outcome = invoke(transport, path, DeviceMethod::Disconnect).await;
    if outcome.ok {
        info!("Disconnected {path}");
    }
    outcome
}

/// Disconnects then reconnects the device at `path`.
///
/// If the disconnect is rejected, the connect is not attempted and the
/// disconnect's error is reported. Success only means BlueZ accepted both
/// calls; the device is not re-checked afterwards.
pub(crate) async fn reset(transport: &dyn BluezTransport, path: &str) -> ActionOutcome {
    debug!("Resetting {path}");

    let disconnected = invoke(transport, path, DeviceMethod::Disconnect).await;
    if !disconnected.ok {
        return disconnected;
    }

    let outcome = invoke(transport, path, DeviceMethod::Connect).await;
    if outcome.ok {
        info!("Reset {path}");
    }
    outcome
}

/// Runs `action` against the device at `path`.
pub(crate) async fn perform(
    transport: &dyn BluezTransport,
    path: &str,
    action: DeviceAction,
) -> ActionOutcome {
    match action {
        DeviceAction::Connect => connect(transport, path).await,
        DeviceAction::Disconnect => disconnect(transport, path).await,
        DeviceAction::Reset => reset(transport, path).await,
    }
}
