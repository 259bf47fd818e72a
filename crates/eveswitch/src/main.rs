//! eveswitch: switch focus among EVE client windows with global hotkeys.
//!
//! Thin shell around the library crates: loads the JSON configuration,
//! registers the configured gestures and runs the dispatch loop. All
//! policy lives in `eveswitch-engine`; all OS access is behind the
//! `win-hotkey`, `keyrelay` and `eveswitch-world` backends.

mod config;
mod logs;

use std::{io, path::PathBuf, process::ExitCode};

use clap::Parser;
use thiserror::Error;
use tracing::error;

/// Command-line interface.
#[derive(Debug, Parser)]
#[command(name = "eveswitch", about, version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    #[command(flatten)]
    logs: logs::LogArgs,
}

/// Top-level errors reported at startup.
#[derive(Debug, Error)]
enum Error {
    /// Configuration file could not be read.
    #[error("reading configuration: {0}")]
    Io(#[from] io::Error),
    /// Configuration file did not parse.
    #[error("parsing configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// Gesture specs or engine setup failed.
    #[error(transparent)]
    Engine(#[from] eveswitch_engine::Error),
    /// Hotkey registration failed.
    #[error(transparent)]
    Hotkey(#[from] win_hotkey::Error),
    /// Running on a platform without a backend.
    #[error("eveswitch only runs on Windows")]
    Unsupported,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logs::init(&cli.logs);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "startup_failed");
            eprintln!("eveswitch: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_os = "windows")]
fn run(cli: &Cli) -> Result<(), Error> {
    use std::{sync::Arc, time::Duration};

    use eveswitch_engine::{Engine, EngineCfg};
    use eveswitch_world::{World, WorldCfg, sys::Win32Desktop, sys::Win32Enumerator};
    use tracing::debug;
    use win_hotkey::{Manager, sys::Win32Hotkeys};

    let cfg = config::load(&cli.config)?;
    let plan = EngineCfg::from_specs(
        &cfg.login_hotkey,
        &cfg.hotkey_specs(),
        cfg.require_active_client,
    )?;

    let mut world = World::new(
        Arc::new(Win32Enumerator::new(&cfg.process_name)),
        &WorldCfg {
            poll_interval: Duration::from_millis(cfg.poll_ms),
        },
    );
    world.start();

    let (os, fired) = Win32Hotkeys::spawn()?;
    let relay = Arc::new(keyrelay::KeyRelay::new());
    let mut manager = Manager::new(os, relay);
    // OS-claimed chords abort startup here; the config is the source of
    // truth and a broken chord will not fix itself.
    for gesture in plan.gestures() {
        manager.register(gesture)?;
    }

    let mut engine = Engine::new(plan, world.view(), Arc::new(Win32Desktop));
    for id in fired.iter() {
        let outcome = manager.dispatch(id, |g| engine.on_hotkey(g));
        debug!(?outcome, "dispatched_hotkey");
    }

    world.stop();
    manager.dispose();
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn run(_cli: &Cli) -> Result<(), Error> {
    Err(Error::Unsupported)
}
