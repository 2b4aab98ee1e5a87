use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::File;

/// Takes the launcher's exclusive lock, waiting for any other running
/// invocation to finish first.
///
/// Activations are handled one at a time; the lock is released when the
/// returned file is dropped.
pub fn acquire_app_lock() -> Result<File> {
    let mut lock_path = dirs::data_local_dir().unwrap_or(std::env::temp_dir());
    lock_path.push("btrs-launcher.lock");

    let file = File::create(&lock_path)
        .with_context(|| format!("failed to create lock file {}", lock_path.display()))?;

    file.lock_exclusive()
        .context("failed to lock the launcher lock file")?;

    Ok(file)
}
