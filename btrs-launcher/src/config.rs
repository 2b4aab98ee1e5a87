use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User preferences, read from `~/.config/btrs/config.toml`.
///
/// Every key is optional; missing keys take their default.
///
/// ```toml
/// enable_notifications = true
/// low_battery = 20
/// script_on_connect = "/home/me/bin/on-headphones"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Send a desktop notification after every action.
    pub enable_notifications: bool,
    /// Battery levels at or below this are shown as low.
    pub low_battery: u8,
    /// Run after a successful connect as `script <name> <address>`; empty disables it.
    pub script_on_connect: String,
    /// Icon passed to `notify-send`.
    pub notification_icon: Option<PathBuf>,
    /// Directory holding `<icon>_<connected>.png` entry icons.
    pub icon_dir: Option<PathBuf>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            enable_notifications: true,
            low_battery: 20,
            script_on_connect: String::new(),
            notification_icon: None,
            icon_dir: None,
        }
    }
}

fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push("btrs");
        path.push("config.toml");
        path
    })
}

impl Preferences {
    /// Loads preferences from `path`, or from the default location when
    /// `path` is `None`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(get_config_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Parses preferences from TOML text.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// The on-connect script, if one is configured.
    pub fn script(&self) -> Option<&str> {
        let script = self.script_on_connect.trim();
        (!script.is_empty()).then_some(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert!(prefs.enable_notifications);
        assert_eq!(prefs.low_battery, 20);
        assert_eq!(prefs.script(), None);
    }

    #[test]
    fn test_parse_partial() {
        let prefs = Preferences::parse("low_battery = 35\n").unwrap();
        assert_eq!(prefs.low_battery, 35);
        assert!(prefs.enable_notifications);
    }

    #[test]
    fn test_parse_full() {
        let prefs = Preferences::parse(
            r#"
            enable_notifications = false
            low_battery = 10
            script_on_connect = "/usr/local/bin/on-connect"
            notification_icon = "/usr/share/icons/bt.png"
            "#,
        )
        .unwrap();

        assert!(!prefs.enable_notifications);
        assert_eq!(prefs.low_battery, 10);
        assert_eq!(prefs.script(), Some("/usr/local/bin/on-connect"));
        assert_eq!(
            prefs.notification_icon.as_deref(),
            Some(Path::new("/usr/share/icons/bt.png"))
        );
    }

    #[test]
    fn test_blank_script_is_disabled() {
        let prefs = Preferences::parse("script_on_connect = \"   \"").unwrap();
        assert_eq!(prefs.script(), None);
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        assert!(Preferences::parse("low_battery = \"lots\"").is_err());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(Some(dir.path().join("nope.toml").as_path())).unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "enable_notifications = false").unwrap();

        let prefs = Preferences::load(Some(file.path())).unwrap();
        assert!(!prefs.enable_notifications);
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "low_battery = [").unwrap();

        assert!(Preferences::load(Some(file.path())).is_err());
    }
}
