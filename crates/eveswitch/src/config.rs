//! JSON configuration file handling.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;

/// On-disk configuration shape.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Only act while a client-family window has foreground focus.
    #[serde(default)]
    pub require_active_client: bool,
    /// Executable name of the game client processes.
    #[serde(default = "default_process_name")]
    pub process_name: String,
    /// Window poll interval in milliseconds.
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
    /// Gesture spec cycling login-screen windows.
    pub login_hotkey: String,
    /// Gesture spec → ordered character names. BTreeMap keeps the
    /// registration order deterministic.
    #[serde(default)]
    pub hotkeys: BTreeMap<String, Vec<String>>,
}

fn default_process_name() -> String {
    "exefile.exe".to_string()
}

fn default_poll_ms() -> u64 {
    500
}

impl Config {
    /// The hotkey map as ordered (spec, targets) pairs.
    pub fn hotkey_specs(&self) -> Vec<(String, Vec<String>)> {
        self.hotkeys
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Loads and parses the configuration file.
pub fn load(path: &Path) -> Result<Config, crate::Error> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
