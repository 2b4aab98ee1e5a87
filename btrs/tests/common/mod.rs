//! An in-memory stand-in for BlueZ.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use btrs::{BluezTransport, DeviceMethod, InterfaceMap, ManagedObjects, PropertyMap};
use zvariant::{OwnedObjectPath, OwnedValue, Value};

pub const DEVICE: &str = "org.bluez.Device1";
pub const BATTERY: &str = "org.bluez.Battery1";
pub const ADAPTER: &str = "org.bluez.Adapter1";

pub const HEADPHONES: &str = "/org/bluez/hci0/dev_AA_BB_CC_DD_EE_FF";
pub const MOUSE: &str = "/org/bluez/hci0/dev_11_22_33_44_55_66";

/// A property value the fake can hand out any number of times.
#[derive(Debug, Clone)]
pub enum Prop {
    Str(&'static str),
    Bool(bool),
    Byte(u8),
    Int(i32),
}

impl Prop {
    fn to_owned_value(&self) -> OwnedValue {
        let value = match self {
            Prop::Str(s) => Value::from(*s),
            Prop::Bool(b) => Value::from(*b),
            Prop::Byte(b) => Value::from(*b),
            Prop::Int(i) => Value::from(*i),
        };
        OwnedValue::try_from(value).unwrap()
    }
}

type Props = Vec<(&'static str, Prop)>;

#[derive(Default)]
pub struct FakeBluez {
    objects: Mutex<HashMap<String, HashMap<String, Props>>>,
    enumeration_error: Option<String>,
    unreadable: HashSet<String>,
    call_errors: Mutex<HashMap<(String, DeviceMethod), String>>,
    calls: Mutex<Vec<(String, DeviceMethod)>>,
}

impl FakeBluez {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an interface with the given properties to the object at `path`.
    pub fn with_interface(self, path: &str, interface: &str, props: Props) -> Self {
        self.set_interface(path, interface, props);
        self
    }

    /// Adds or replaces an interface at runtime.
    pub fn set_interface(&self, path: &str, interface: &str, props: Props) {
        self.objects
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .insert(interface.to_string(), props);
    }

    pub fn remove_interface(&self, path: &str, interface: &str) {
        if let Some(ifaces) = self.objects.lock().unwrap().get_mut(path) {
            ifaces.remove(interface);
        }
    }

    /// Makes `GetManagedObjects` fail.
    pub fn failing_enumeration(mut self, message: &str) -> Self {
        self.enumeration_error = Some(message.to_string());
        self
    }

    /// Makes every `GetAll` on `path` fail while it still shows up in the
    /// managed objects.
    pub fn unreadable(mut self, path: &str) -> Self {
        self.unreadable.insert(path.to_string());
        self
    }

    /// Makes `method` on `path` fail with `message`.
    pub fn failing_call(self, path: &str, method: DeviceMethod, message: &str) -> Self {
        self.call_errors
            .lock()
            .unwrap()
            .insert((path.to_string(), method), message.to_string());
        self
    }

    /// Every method call seen so far, in order.
    pub fn calls(&self) -> Vec<(String, DeviceMethod)> {
        self.calls.lock().unwrap().clone()
    }
}

fn to_property_map(props: &Props) -> PropertyMap {
    props
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_owned_value()))
        .collect()
}

#[async_trait]
impl BluezTransport for FakeBluez {
    async fn managed_objects(&self) -> zbus::Result<ManagedObjects> {
        if let Some(message) = &self.enumeration_error {
            return Err(zbus::Error::Failure(message.clone()));
        }

        let objects = self.objects.lock().unwrap();
        let mut managed = ManagedObjects::new();
        for (path, ifaces) in objects.iter() {
            let interfaces: InterfaceMap = ifaces
                .iter()
                .map(|(name, props)| (name.clone(), to_property_map(props)))
                .collect();
            managed.insert(OwnedObjectPath::try_from(path.as_str()).unwrap(), interfaces);
        }
        Ok(managed)
    }

    async fn properties(&self, path: &str, interface: &str) -> zbus::Result<PropertyMap> {
        if self.unreadable.contains(path) {
            return Err(zbus::Error::Failure(format!("{path} is unreadable")));
        }

        let objects = self.objects.lock().unwrap();
        objects
            .get(path)
            .and_then(|ifaces| ifaces.get(interface))
            .map(to_property_map)
            .ok_or_else(|| zbus::Error::Failure(format!("No such interface '{interface}'")))
    }

    async fn call(&self, path: &str, method: DeviceMethod) -> zbus::Result<()> {
        self.calls.lock().unwrap().push((path.to_string(), method));

        if let Some(message) = self
            .call_errors
            .lock()
            .unwrap()
            .get(&(path.to_string(), method))
        {
            return Err(zbus::Error::Failure(message.clone()));
        }
        Ok(())
    }
}
