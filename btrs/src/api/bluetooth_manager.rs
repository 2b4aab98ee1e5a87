use std::sync::Arc;
use std::time::Duration;

use crate::Result;
use crate::api::models::{ActionOutcome, Device, DeviceAction};
use crate::core::{actions, directory, state_wait};
use crate::dbus::{BluezTransport, ZbusTransport};
use crate::types::constants::timeouts;

/// High-level interface to BlueZ over D-Bus.
///
/// This is the main entry point for listing Bluetooth devices and toggling
/// their connections. It holds the bus handle explicitly; nothing in the
/// crate reaches for a global connection.
///
/// # Creating an Instance
///
/// ```no_run
/// use btrs::BluetoothManager;
///
/// # async fn example() -> btrs::Result<()> {
/// let bt = BluetoothManager::new().await?;
/// # Ok(())
/// # }
/// ```
///
/// # Examples
///
/// ## Toggling a Device
///
/// ```no_run
/// use btrs::BluetoothManager;
///
/// # async fn example() -> btrs::Result<()> {
/// let bt = BluetoothManager::new().await?;
///
/// for device in bt.list_devices().await? {
///     let outcome = if device.connected {
///         bt.disconnect(&device.path).await
///     } else {
///         bt.connect(&device.path).await
///     };
///
///     if !outcome.ok {
///         eprintln!("{}: {}", device.name, outcome.message);
///     }
/// }
/// # Ok(())
/// # }
/// ```
///
/// ## Custom Transports
///
/// Any [`BluezTransport`] can back a manager, which is how the tests drive
/// it without a bus:
///
/// ```ignore
/// let bt = BluetoothManager::with_transport(my_fake_transport);
/// ```
///
/// # Thread Safety
///
/// `BluetoothManager` is `Clone` and can be shared across async tasks.
/// Each clone shares the same underlying transport.
#[derive(Clone)]
pub struct BluetoothManager {
    transport: Arc<dyn BluezTransport>,
}

impl std::fmt::Debug for BluetoothManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BluetoothManager").finish_non_exhaustive()
    }
}

impl BluetoothManager {
    /// Creates a new `BluetoothManager` connected to the system D-Bus.
    pub async fn new() -> Result<Self> {
        let transport = ZbusTransport::system().await?;
        Ok(Self::with_transport(transport))
    }

    /// Creates a `BluetoothManager` over the given transport.
    pub fn with_transport(transport: impl BluezTransport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Lists every Bluetooth device BlueZ knows about, in no particular order.
    ///
    /// Connected devices carry a battery reading when they expose one.
    ///
    /// # Errors
    ///
    /// Returns `BluetoothError::DirectoryUnavailable` if BlueZ can't be
    /// enumerated. Devices that fail to read individually are skipped.
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        directory::list_devices(self.transport.as_ref()).await
    }

    /// Reads a single device by its D-Bus object path.
    ///
    /// # Errors
    ///
    /// Returns `BluetoothError::DeviceNotFound` if the path no longer
    /// resolves.
    pub async fn get_device(&self, path: &str) -> Result<Device> {
        directory::get_device(self.transport.as_ref(), path).await
    }

    /// Connects the device at `path`.
    pub async fn connect(&self, path: &str) -> ActionOutcome {
        actions::connect(self.transport.as_ref(), path).await
    }

    /// Disconnects the device at `path`.
    pub async fn disconnect(&self, path: &str) -> ActionOutcome {
        actions::disconnect(self.transport.as_ref(), path).await
    }

    /// Disconnects then reconnects the device at `path`.
    ///
    /// Stops at the first rejected call. A successful outcome means BlueZ
    /// accepted both calls, not that the device is confirmed connected.
    pub async fn reset(&self, path: &str) -> ActionOutcome {
        actions::reset(self.transport.as_ref(), path).await
    }

    /// Runs `action` against the device at `path`.
    pub async fn perform(&self, path: &str, action: DeviceAction) -> ActionOutcome {
        actions::perform(self.transport.as_ref(), path, action).await
    }

    /// Waits for a just-connected device to report `Connected` and a battery
    /// level, for at most `timeout`.
    ///
    /// Returns the freshest record read; if the device never reports a
    /// battery, that record simply has none.
    ///
    /// # Errors
    ///
    /// Returns `BluetoothError::DeviceNotFound` if the device couldn't be
    /// read at all.
    pub async fn wait_for_connection(&self, path: &str, timeout: Duration) -> Result<Device> {
        state_wait::wait_for_connection(
            self.transport.as_ref(),
            path,
            timeout,
            timeouts::poll_interval(),
        )
        .await
    }

    /// [`wait_for_connection`](Self::wait_for_connection) with the default
    /// two-second timeout.
    pub async fn settle(&self, path: &str) -> Result<Device> {
        self.wait_for_connection(path, timeouts::settle_timeout())
            .await
    }
}
