pub mod config;
pub mod desktop;
pub mod dispatch;
pub mod entries;
pub mod file_lock;

use anyhow::{Context, Result};
use btrs::{BluetoothManager, DeviceAction};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Preferences;
use crate::dispatch::activate;
use crate::entries::build_entries;
use crate::file_lock::acquire_app_lock;

#[derive(Parser, Debug)]
#[command(name = "btrs-launcher")]
#[command(version, about = "List and toggle Bluetooth device connections")]
struct Args {
    /// Read preferences from this file instead of ~/.config/btrs/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Don't send desktop notifications
    #[arg(long, global = true)]
    no_notify: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List devices whose name contains QUERY, sorted by name
    List {
        query: Option<String>,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a device: disconnect if connected, connect otherwise
    Activate {
        path: String,
        /// Reset (disconnect then connect) a connected device instead
        #[arg(long)]
        reset: bool,
    },
    /// Connect a device
    Connect { path: String },
    /// Disconnect a device
    Disconnect { path: String },
    /// Disconnect then reconnect a device
    Reset { path: String },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut prefs = Preferences::load(args.config.as_deref())?;
    if args.no_notify {
        prefs.enable_notifications = false;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    runtime.block_on(dispatch(args.command, &prefs))
}

async fn dispatch(command: Command, prefs: &Preferences) -> Result<()> {
    let bt = BluetoothManager::new()
        .await
        .context("failed to connect to the system bus")?;

    let (path, action, reset) = match command {
        Command::List { query, json } => {
            let devices = bt.list_devices().await?;
            let entries = build_entries(
                devices,
                query.as_deref(),
                prefs.low_battery,
                prefs.icon_dir.as_deref(),
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for e in &entries {
                    println!("{}\t{}\t{}\t{}", e.title, e.description, e.icon, e.path);
                }
            }
            return Ok(());
        }
        Command::Activate { path, reset } => (path, None, reset),
        Command::Connect { path } => (path, Some(DeviceAction::Connect), false),
        Command::Disconnect { path } => (path, Some(DeviceAction::Disconnect), false),
        Command::Reset { path } => (path, Some(DeviceAction::Reset), false),
    };

    let _lock = acquire_app_lock()?;
    let activation = activate(&bt, &path, action, reset, prefs).await;

    if let Some(notification) = &activation.notification {
        desktop::send_notification(notification, prefs.notification_icon.as_deref());
    }
    if let Some(script) = &activation.script {
        desktop::run_script(script);
    }

    let verb = activation
        .action
        .map_or_else(|| "activate".to_string(), |a| a.to_string());
    if activation.outcome.ok {
        println!("{verb} {}: ok", activation.device.name);
        Ok(())
    } else {
        Err(btrs::BluetoothError::ActionFailed(activation.outcome.message))
            .with_context(|| format!("{verb} {path} failed"))
    }
}
