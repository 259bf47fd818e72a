//! Title-based target resolution over a window snapshot.
//!
//! Classification is a pure function of the title: a character window's
//! title starts with [`CHARACTER_TITLE_PREFIX`] (the suffix is the
//! character name), a login window's title equals [`LOGIN_TITLE`] exactly.
//! No fuzzy or locale-sensitive matching.

use crate::{Error, Result, WindowHandle, WindowSnapshot};

/// Title prefix of a logged-in client window.
pub const CHARACTER_TITLE_PREFIX: &str = "EVE - ";

/// Exact title of a client still on the login screen.
pub const LOGIN_TITLE: &str = "EVE";

/// Semantic classification of a window title.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TargetClass<'a> {
    /// A logged-in client window; carries the character name.
    Character(&'a str),
    /// A client on the login screen.
    Login,
    /// Any other window.
    Other,
}

/// Classifies a window title.
pub fn classify(title: &str) -> Result<TargetClass<'_>> {
    let character = title.strip_prefix(CHARACTER_TITLE_PREFIX);
    let login = title == LOGIN_TITLE;
    match (character, login) {
        (Some(_), true) => Err(Error::ClassificationAmbiguous {
            title: title.to_string(),
        }),
        (Some(name), false) => Ok(TargetClass::Character(name)),
        (None, true) => Ok(TargetClass::Login),
        (None, false) => Ok(TargetClass::Other),
    }
}

/// Names from `requested` that currently have a matching character window,
/// preserving the order of `requested`. That order is the cycling order and
/// comes from configuration, not from OS enumeration order.
pub fn active_characters<'a>(snapshot: &WindowSnapshot, requested: &'a [String]) -> Vec<&'a str> {
    requested
        .iter()
        .map(String::as_str)
        .filter(|name| character_window(snapshot, name).is_some())
        .collect()
}

/// Handle of the window for a given character name, if its client is open.
pub fn character_window(snapshot: &WindowSnapshot, name: &str) -> Option<WindowHandle> {
    snapshot
        .windows
        .iter()
        .find(|w| w.title.strip_prefix(CHARACTER_TITLE_PREFIX) == Some(name))
        .map(|w| w.hwnd)
}

/// Handles of all login-screen windows, in snapshot enumeration order.
/// Login windows carry no user-assigned identity beyond their handle.
pub fn login_windows(snapshot: &WindowSnapshot) -> Vec<WindowHandle> {
    snapshot
        .windows
        .iter()
        .filter(|w| w.title == LOGIN_TITLE)
        .map(|w| w.hwnd)
        .collect()
}

/// Character name at `hwnd`, if that window is a character window.
pub fn character_at(snapshot: &WindowSnapshot, hwnd: WindowHandle) -> Option<&str> {
    snapshot
        .window_at(hwnd)
        .and_then(|w| w.title.strip_prefix(CHARACTER_TITLE_PREFIX))
}
