use btrs::{BluetoothManager, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let bt = BluetoothManager::new().await?;

    let mut devices = bt.list_devices().await?;
    devices.sort_by_key(|d| d.name.to_lowercase());

    if devices.is_empty() {
        println!("No Bluetooth devices found.");
        println!("\nMake sure:");
        println!("  1. Bluetooth is enabled");
        println!("  2. Device is paired (use 'bluetoothctl')");
        return Ok(());
    }

    for (i, device) in devices.iter().enumerate() {
        println!("  {}. {} [{}]", i + 1, device, device.icon_hint);
    }

    Ok(())
}
