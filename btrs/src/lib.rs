//! A Rust library for listing and toggling Bluetooth devices via BlueZ.
//!
//! This crate provides a small async API over BlueZ's D-Bus interface:
//!
//! - Listing known devices with name, address, icon hint, connection state
//!   and battery level
//! - Connecting, disconnecting and resetting a device
//! - Waiting for a freshly connected device to settle
//!
//! Pairing and discovery are out of scope; devices must already be known to
//! BlueZ (e.g. paired with `bluetoothctl`).
//!
//! # Example
//!
//! ```no_run
//! use btrs::BluetoothManager;
//!
//! # async fn example() -> btrs::Result<()> {
//! let bt = BluetoothManager::new().await?;
//!
//! let mut devices = bt.list_devices().await?;
//! devices.sort_by_key(|d| d.name.to_lowercase());
//!
//! for d in &devices {
//!     println!("{} {}", d.name, d.battery_percent.map(|p| format!("{p}%")).unwrap_or_default());
//! }
//!
//! if let Some(d) = devices.iter().find(|d| !d.connected) {
//!     let outcome = bt.connect(&d.path).await;
//!     println!("ok={} {}", outcome.ok, outcome.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Queries return `Result<T, BluetoothError>`. Actions never return an error:
//! they yield an [`ActionOutcome`] with `ok == false` and the text BlueZ
//! replied with, ready to show to a user. Use
//! [`ActionOutcome::into_result`] to get a `Result` instead.
//!
//! # Testing
//!
//! All bus access goes through the [`BluezTransport`] trait. Implement it
//! over an in-memory map and pass it to
//! [`BluetoothManager::with_transport`] to exercise the crate without BlueZ.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To see
//! log output, add a logging implementation like `env_logger`. For example:

//! ```no_run,ignore
//! env_logger::init();
//! // ...
//! ```

// Internal implementation modules
mod core;
mod dbus;
mod types;
mod util;

// Public API modules
pub mod api;

// Re-exported public API
pub use api::bluetooth_manager::BluetoothManager;
pub use api::models::{ActionOutcome, BluetoothError, Device, DeviceAction};
pub use dbus::{BluezTransport, DeviceMethod, InterfaceMap, ManagedObjects, PropertyMap, ZbusTransport};

/// Placeholders used for devices that omit a property.
pub mod defaults {
    pub use crate::types::constants::defaults::*;
}

/// A specialized `Result` type for Bluetooth operations.
pub type Result<T> = std::result::Result<T, BluetoothError>;
