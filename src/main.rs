//! padbridge - controller to keyboard/mouse bridge
//!
//! Polls a game controller and injects the mapped keyboard/mouse events
//! into the OS. With `--dry-run` the events are logged instead of
//! injected, so a layout can be tested safely. `--list` prints detected
//! controllers and exits.

use anyhow::Context;
use clap::Parser;
use padbridge::backend::{MockKeyboardBackend, MockMouseBackend};
use padbridge::bridge::Bridge;
use padbridge::device::{self, GilrsSource};
use padbridge::mapping::layout::Layout;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "padbridge", about = "Use a game controller as a generic keyboard/mouse")]
struct Cli {
    /// List detected controllers and exit
    #[arg(long)]
    list: bool,

    /// Index of the controller to use
    #[arg(long, default_value_t = 0)]
    device: usize,

    /// JSON layout override (every field required; no partial overrides)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Polling interval in milliseconds
    #[arg(long, default_value_t = 10)]
    interval_ms: u64,

    /// Log events instead of injecting real input
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.list {
        let devices = device::list_devices().context("failed to enumerate controllers")?;
        if devices.is_empty() {
            println!("No controllers detected");
        }
        for info in devices {
            println!("{}: {}", info.index, info.name);
        }
        return Ok(());
    }

    // Resolve all bindings before any device is opened
    let layout = Layout::load(cli.layout.as_deref()).context("failed to load layout")?;
    let interval = Duration::from_millis(cli.interval_ms);

    let mut source = GilrsSource::open(cli.device).context("failed to acquire controller")?;

    if cli.dry_run {
        println!("Dry run: events are logged, not injected");
        let mut bridge = Bridge::new(layout, MockKeyboardBackend, MockMouseBackend, interval);
        bridge.run(&mut source)?;
        return Ok(());
    }

    run_real(layout, interval, &mut source)
}

#[cfg(windows)]
fn run_real(
    layout: Layout,
    interval: Duration,
    source: &mut GilrsSource,
) -> anyhow::Result<()> {
    use padbridge::backend::{KeyboardSendInputBackend, MouseSendInputBackend};

    println!("padbridge: your controller now drives REAL keyboard/mouse input");
    println!("Press the exit button (default: back) to stop");
    let mut bridge = Bridge::new(
        layout,
        KeyboardSendInputBackend,
        MouseSendInputBackend,
        interval,
    );
    bridge.run(source)?;
    Ok(())
}

#[cfg(not(windows))]
fn run_real(
    _layout: Layout,
    _interval: Duration,
    _source: &mut GilrsSource,
) -> anyhow::Result<()> {
    anyhow::bail!("real input injection is only supported on Windows; use --dry-run here")
}
