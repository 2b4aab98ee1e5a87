//! The bus seam between the clients and BlueZ.
//!
//! Both the directory and action clients only ever need three remote calls:
//! enumerate managed objects, read every property of one interface, and
//! invoke a parameterless `Device1` method. [`BluezTransport`] captures exactly
//! that, so the clients can be driven by [`ZbusTransport`] in production and
//! by an in-memory fake in tests.

use async_trait::async_trait;
use log::debug;
use std::fmt;
use std::sync::Arc;
use zbus::Connection;

use crate::dbus::bluez::{BluezDeviceProxy, BluezObjectManagerProxy, ManagedObjects, PropertyMap};
use crate::types::constants::bus;

/// A parameterless method on `org.bluez.Device1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceMethod {
    /// `Device1.Connect`
    Connect,
    /// `Device1.Disconnect`
    Disconnect,
}

impl fmt::Display for DeviceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceMethod::Connect => write!(f, "Connect"),
            DeviceMethod::Disconnect => write!(f, "Disconnect"),
        }
    }
}

/// Remote calls the clients make against the Bluetooth service.
///
/// Errors are reported as [`zbus::Error`] so remote D-Bus errors keep their
/// name and description all the way up to the action boundary.
#[async_trait]
pub trait BluezTransport: Send + Sync {
    /// `ObjectManager.GetManagedObjects` on the service root.
    async fn managed_objects(&self) -> zbus::Result<ManagedObjects>;

    /// `Properties.GetAll(interface)` on the object at `path`.
    async fn properties(&self, path: &str, interface: &str) -> zbus::Result<PropertyMap>;

    /// Invokes `method` on the `Device1` object at `path`.
    async fn call(&self, path: &str, method: DeviceMethod) -> zbus::Result<()>;
}

#[async_trait]
impl<T: BluezTransport + ?Sized> BluezTransport for Arc<T> {
    async fn managed_objects(&self) -> zbus::Result<ManagedObjects> {
        (**self).managed_objects().await
    }

    async fn properties(&self, path: &str, interface: &str) -> zbus::Result<PropertyMap> {
        (**self).properties(path, interface).await
    }

    async fn call(&self, path: &str, method: DeviceMethod) -> zbus::Result<()> {
        (**self).call(path, method).await
    }
}

/// [`BluezTransport`] backed by a live zbus connection.
///
/// Cloning is cheap; clones share the same underlying connection.
#[derive(Debug, Clone)]
pub struct ZbusTransport {
    conn: Connection,
}

impl ZbusTransport {
    /// Connects to the system bus.
    pub async fn system() -> zbus::Result<Self> {
        let conn = Connection::system().await?;
        Ok(Self { conn })
    }

    /// Wraps an existing connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl BluezTransport for ZbusTransport {
    async fn managed_objects(&self) -> zbus::Result<ManagedObjects> {
        let manager = BluezObjectManagerProxy::new(&self.conn).await?;
        manager.get_managed_objects().await
    }

    async fn properties(&self, path: &str, interface: &str) -> zbus::Result<PropertyMap> {
        let props: zbus::Proxy<'_> = zbus::proxy::Builder::new(&self.conn)
            .destination(bus::BLUEZ_SERVICE)?
            .path(path)?
            .interface("org.freedesktop.DBus.Properties")?
            .build()
            .await?;

        let reply = props.call_method("GetAll", &(interface,)).await?;
        let map: PropertyMap = reply.body().deserialize()?;
        Ok(map)
    }

    async fn call(&self, path: &str, method: DeviceMethod) -> zbus::Result<()> {
        let device = BluezDeviceProxy::builder(&self.conn)
            .path(path)?
            .build()
            .await?;

        debug!("Calling Device1.{method} on {path}");
        match method {
            DeviceMethod::Connect => device.connect().await,
            DeviceMethod::Disconnect => device.disconnect().await,
        }
    }
}
