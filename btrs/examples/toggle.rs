//! Toggles the first device whose name contains the given text.
//!
//! Usage: cargo run --example toggle -- "headphones"

use btrs::{BluetoothManager, DeviceAction};

#[tokio::main]
async fn main() -> btrs::Result<()> {
    let query = std::env::args().nth(1).unwrap_or_default().to_lowercase();
    let bt = BluetoothManager::new().await?;

    let Some(device) = bt
        .list_devices()
        .await?
        .into_iter()
        .find(|d| d.name.to_lowercase().contains(&query))
    else {
        eprintln!("No device matching '{query}'");
        return Ok(());
    };

    let action = DeviceAction::for_device(&device, false);
    println!("{action} {}...", device.name);

    let outcome = bt.perform(&device.path, action).await;
    if !outcome.ok {
        eprintln!("✗ {}", outcome.message);
        return Ok(());
    }

    if action == DeviceAction::Connect {
        let device = bt.settle(&device.path).await?;
        println!("✓ {device}");
    } else {
        println!("✓ done");
    }

    Ok(())
}
