//! Logging flags and tracing initialization.

use std::env;

use clap::Args;
use tracing_subscriber::EnvFilter;

/// Crate targets that constitute "our" logs.
const OUR_CRATES: &[&str] = &[
    "eveswitch",
    "eveswitch_engine",
    "eveswitch_world",
    "win_hotkey",
    "win_keycode",
    "keyrelay",
];

/// Logging controls.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, conflicts_with_all = ["debug", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (our crates only)
    #[arg(long, conflicts_with_all = ["trace", "log_filter"])]
    pub debug: bool,

    /// Set an explicit tracing filter directive (overrides other flags),
    /// e.g. "win_hotkey=trace,eveswitch_engine=debug"
    #[arg(long)]
    pub log_filter: Option<String>,
}

fn level_spec_for(level: &str) -> String {
    OUR_CRATES
        .iter()
        .map(|t| format!("{}={}", t, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Filter spec with precedence: explicit filter, then level flags, then
/// RUST_LOG, then crate-scoped info.
fn filter_spec(args: &LogArgs) -> String {
    if let Some(f) = &args.log_filter {
        return f.clone();
    }
    if args.trace {
        return level_spec_for("trace");
    }
    if args.debug {
        return level_spec_for("debug");
    }
    if let Ok(env_spec) = env::var("RUST_LOG") {
        return env_spec;
    }
    level_spec_for("info")
}

/// Initializes the global tracing subscriber.
pub fn init(args: &LogArgs) {
    let filter = EnvFilter::new(filter_spec(args));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
