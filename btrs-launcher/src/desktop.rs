//! Side effects on the desktop: notifications and the on-connect script.
//!
//! Both are fire-and-forget; failures are logged and never fail the action.

use log::{debug, warn};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::dispatch::{Notification, ScriptRun};

/// Builds the `notify-send` invocation for a notification.
pub fn notify_command(notification: &Notification, icon: Option<&Path>) -> Command {
    let mut cmd = Command::new("notify-send");
    cmd.args(["-h", "int:transient:1"]);
    if let Some(icon) = icon {
        cmd.arg(format!("--icon={}", icon.display()));
    }
    cmd.arg(&notification.title).arg(&notification.body);
    cmd
}

/// Shows a transient desktop notification.
pub fn send_notification(notification: &Notification, icon: Option<&Path>) {
    debug!(
        "Sending notification: {} {}",
        notification.title, notification.body
    );

    match notify_command(notification, icon).status() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("notify-send exited with {status}"),
        Err(e) => warn!("Failed to run notify-send: {e}"),
    }
}

/// Runs the on-connect script and waits for it, discarding its output.
pub fn run_script(script: &ScriptRun) {
    debug!("Running {} {:?}", script.program, script.args);

    let result = Command::new(&script.program)
        .args(&script.args)
        .stdout(Stdio::null())
        .status();

    match result {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("{} exited with {status}", script.program),
        Err(e) => warn!("Failed to run {}: {e}", script.program),
    }
}
