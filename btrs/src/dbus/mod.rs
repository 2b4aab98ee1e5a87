//! D-Bus proxy interfaces for BlueZ.
//!
//! This module contains low-level D-Bus proxy definitions for communicating
//! with BlueZ over the system bus, and the transport trait the clients use.

mod bluez;
mod transport;

pub use bluez::{InterfaceMap, ManagedObjects, PropertyMap};
pub use transport::{BluezTransport, DeviceMethod, ZbusTransport};
