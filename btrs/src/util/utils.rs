//! Helpers for decoding D-Bus values and errors.
//!
//! BlueZ property maps are `a{sv}`: every value arrives as a variant whose
//! shape we only expect, never know. These helpers pull typed values out and
//! return `None` for anything unexpected so callers can apply defaults.

use zvariant::{OwnedValue, Value};

use crate::dbus::PropertyMap;
use crate::types::constants::battery;

/// Reads a non-empty string property.
///
/// Missing keys, non-string values and empty strings all yield `None`.
pub(crate) fn string_prop(props: &PropertyMap, key: &str) -> Option<String> {
    match unwrap_variant(props.get(key)?) {
        Value::Str(s) if !s.as_str().is_empty() => Some(s.as_str().to_owned()),
        _ => None,
    }
}

/// Reads a boolean property.
pub(crate) fn bool_prop(props: &PropertyMap, key: &str) -> Option<bool> {
    match unwrap_variant(props.get(key)?) {
        Value::Bool(b) => Some(*b),
        _ => None,
    }
}

/// Reads a battery percentage.
///
/// BlueZ sends `Percentage` as a byte, but any integer in 0-100 is accepted.
/// Out-of-range and non-integer values yield `None`.
pub(crate) fn percentage_prop(props: &PropertyMap, key: &str) -> Option<u8> {
    let raw: i64 = match unwrap_variant(props.get(key)?) {
        Value::U8(v) => i64::from(*v),
        Value::I16(v) => i64::from(*v),
        Value::U16(v) => i64::from(*v),
        Value::I32(v) => i64::from(*v),
        Value::U32(v) => i64::from(*v),
        Value::I64(v) => *v,
        Value::U64(v) => i64::try_from(*v).ok()?,
        _ => return None,
    };

    let pct = u8::try_from(raw).ok()?;
    (battery::MIN_PERCENT..=battery::MAX_PERCENT)
        .contains(&pct)
        .then_some(pct)
}

/// Strips nested `v` wrappers some services put around property values.
fn unwrap_variant(value: &OwnedValue) -> &Value<'static> {
    let mut inner: &Value<'static> = value;
    while let Value::Value(boxed) = inner {
        inner = boxed.as_ref();
    }
    inner
}

/// Extracts the text to show a user for a failed remote call.
///
/// For D-Bus method errors this is the error description BlueZ sent (e.g.
/// `"Operation already in progress"`), without the error name. Anything else
/// falls back to the error's display text.
pub(crate) fn remote_error_message(err: &zbus::Error) -> String {
    match err {
        zbus::Error::MethodError(_, Some(desc), _) if !desc.is_empty() => desc.clone(),
        zbus::Error::MethodError(name, _, _) => name.to_string(),
        zbus::Error::Failure(msg) => msg.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn owned(v: Value<'_>) -> OwnedValue {
        OwnedValue::try_from(v).unwrap()
    }

    fn props(entries: Vec<(&str, Value<'_>)>) -> PropertyMap {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), owned(v)))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn test_string_prop() {
        let p = props(vec![
            ("Name", Value::from("Headphones")),
            ("Empty", Value::from("")),
            ("Number", Value::from(7u32)),
        ]);

        assert_eq!(string_prop(&p, "Name").as_deref(), Some("Headphones"));
        assert_eq!(string_prop(&p, "Empty"), None);
        assert_eq!(string_prop(&p, "Number"), None);
        assert_eq!(string_prop(&p, "Missing"), None);
    }

    #[test]
    fn test_bool_prop() {
        let p = props(vec![
            ("Connected", Value::from(true)),
            ("Wrong", Value::from("true")),
        ]);

        assert_eq!(bool_prop(&p, "Connected"), Some(true));
        assert_eq!(bool_prop(&p, "Wrong"), None);
        assert_eq!(bool_prop(&p, "Missing"), None);
    }

    #[test]
    fn test_percentage_prop_accepts_integers_in_range() {
        let p = props(vec![
            ("Byte", Value::from(42u8)),
            ("Int", Value::from(100i32)),
            ("Zero", Value::from(0u16)),
        ]);

        assert_eq!(percentage_prop(&p, "Byte"), Some(42));
        assert_eq!(percentage_prop(&p, "Int"), Some(100));
        assert_eq!(percentage_prop(&p, "Zero"), Some(0));
    }

    #[test]
    fn test_percentage_prop_rejects_malformed() {
        let p = props(vec![
            ("TooHigh", Value::from(101u8)),
            ("Negative", Value::from(-5i32)),
            ("Huge", Value::from(u64::MAX)),
            ("Text", Value::from("42")),
            ("Float", Value::from(42.0f64)),
        ]);

        for key in ["TooHigh", "Negative", "Huge", "Text", "Float", "Missing"] {
            assert_eq!(percentage_prop(&p, key), None, "key {key}");
        }
    }

    #[test]
    fn test_nested_variant_is_unwrapped() {
        let p = props(vec![("Name", Value::Value(Box::new(Value::from("Mouse"))))]);
        assert_eq!(string_prop(&p, "Name").as_deref(), Some("Mouse"));
    }

    #[test]
    fn test_remote_error_message_failure() {
        let err = zbus::Error::Failure("Operation already in progress".into());
        assert_eq!(remote_error_message(&err), "Operation already in progress");
    }

    #[test]
    fn test_remote_error_message_other() {
        let err = zbus::Error::InterfaceNotFound;
        assert_eq!(remote_error_message(&err), err.to_string());
    }

    fn error_reply<B>(name: &str, body: &B) -> zbus::Result<zbus::Error>
    where
        B: serde::Serialize + zvariant::DynamicType,
    {
        let call = zbus::Message::method_call("/org/bluez/hci0/dev_AA_BB_CC_DD_EE_FF", "Connect")?
            .interface("org.bluez.Device1")?
            .build(&())?;
        let reply = zbus::Message::error(&call.header(), name)?.build(body)?;
        Ok(zbus::Error::from(reply))
    }

    #[test]
    fn test_remote_error_message_uses_description() -> zbus::Result<()> {
        let err = error_reply("org.bluez.Error.InProgress", &("Operation already in progress",))?;
        assert!(matches!(err, zbus::Error::MethodError(..)));
        assert_eq!(remote_error_message(&err), "Operation already in progress");
        Ok(())
    }

    #[test]
    fn test_remote_error_message_falls_back_to_name() -> zbus::Result<()> {
        let err = error_reply("org.bluez.Error.Failed", &())?;
        assert_eq!(remote_error_message(&err), "org.bluez.Error.Failed");

        let err = error_reply("org.bluez.Error.Failed", &("",))?;
        assert_eq!(remote_error_message(&err), "org.bluez.Error.Failed");
        Ok(())
    }
}
