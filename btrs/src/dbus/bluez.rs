//! BlueZ Proxies
//!
//! This module provides D-Bus proxy interfaces for the parts of BlueZ this
//! crate talks to: the object manager, remote devices and their batteries.

use std::collections::HashMap;

use zbus::Result;
use zbus::proxy;
use zvariant::{OwnedObjectPath, OwnedValue};

/// Properties of one interface, keyed by property name.
pub type PropertyMap = HashMap<String, OwnedValue>;

/// Interfaces of one object, keyed by interface name.
pub type InterfaceMap = HashMap<String, PropertyMap>;

/// Every object BlueZ manages, keyed by object path.
pub type ManagedObjects = HashMap<OwnedObjectPath, InterfaceMap>;

/// Proxy for the BlueZ object manager.
///
/// BlueZ exports a single `org.freedesktop.DBus.ObjectManager` on `/` that
/// reports every adapter, device and battery object it knows about.
///
/// # Example
///
/// ```ignore
/// use crate::dbus::BluezObjectManagerProxy;
/// use zbus::Connection;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let conn = Connection::system().await?;
/// let proxy = BluezObjectManagerProxy::new(&conn).await?;
///
/// for (path, interfaces) in proxy.get_managed_objects().await? {
///     println!("{}: {:?}", path.as_str(), interfaces.keys());
/// }
/// # Ok(())
/// # }
/// ```
#[proxy(
    interface = "org.freedesktop.DBus.ObjectManager",
    default_service = "org.bluez",
    default_path = "/"
)]
pub trait BluezObjectManager {
    /// Returns `{ object_path: { interface_name: { property: value } } }`.
    fn get_managed_objects(&self) -> Result<ManagedObjects>;
}

/// Proxy for a remote Bluetooth device (`org.bluez.Device1`).
///
/// Only the methods are declared here. Properties are read in bulk through
/// `org.freedesktop.DBus.Properties.GetAll` instead, since devices routinely
/// omit `Name` and `Icon`.
#[proxy(interface = "org.bluez.Device1", default_service = "org.bluez")]
pub trait BluezDevice {
    /// Connects all auto-connectable profiles of the device.
    fn connect(&self) -> Result<()>;

    /// Disconnects all profiles and drops the baseband link.
    fn disconnect(&self) -> Result<()>;
}
