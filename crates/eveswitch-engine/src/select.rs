//! Pure cycling selection over the currently active targets.
//!
//! State lives in [`SelectionMemory`], owned by the caller; the selection
//! functions themselves are pure so they can be tested in isolation.

use std::collections::HashMap;

use eveswitch_world::WindowHandle;
use win_keycode::Gesture;

/// Remembers the last target the engine activated.
///
/// Only ever stores values previously returned by the selection functions;
/// the login slot holds a transient OS handle and is revalidated against
/// the current snapshot before use.
#[derive(Debug, Default)]
pub struct SelectionMemory {
    last_character: HashMap<Gesture, String>,
    last_login: Option<WindowHandle>,
}

impl SelectionMemory {
    /// Creates empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last character activated via `gesture`.
    pub fn last_character(&self, gesture: &Gesture) -> Option<&str> {
        self.last_character.get(gesture).map(String::as_str)
    }

    /// Records the character just activated via `gesture`.
    pub fn remember_character(&mut self, gesture: Gesture, name: String) {
        self.last_character.insert(gesture, name);
    }

    /// Last activated login window handle.
    pub fn last_login(&self) -> Option<WindowHandle> {
        self.last_login
    }

    /// Records the login window just activated.
    pub fn remember_login(&mut self, hwnd: WindowHandle) {
        self.last_login = Some(hwnd);
    }
}

/// Computes the next character to activate.
///
/// `active` is the configured cycling order restricted to currently open
/// clients. If `last_selected` (the character focused right now) is active,
/// the cyclic successor within `active` is returned, skipping names whose
/// clients are closed. Otherwise the remembered selection for this hotkey
/// wins if still active, then the first active name. Returns `None` only
/// when `active` is empty.
pub fn next_character<'a>(
    active: &[&'a str],
    last_selected: Option<&str>,
    remembered: Option<&str>,
) -> Option<&'a str> {
    if active.is_empty() {
        return None;
    }
    if let Some(last) = last_selected
        && let Some(i) = active.iter().position(|n| *n == last)
    {
        return Some(active[(i + 1) % active.len()]);
    }
    if let Some(rem) = remembered
        && let Some(i) = active.iter().position(|n| *n == rem)
    {
        return Some(active[i]);
    }
    Some(active[0])
}

/// Computes the next login window to activate: the cyclic successor of
/// `last` within `active` (snapshot enumeration order), or the first
/// handle when `last` is absent or stale.
pub fn next_login(active: &[WindowHandle], last: Option<WindowHandle>) -> Option<WindowHandle> {
    if active.is_empty() {
        return None;
    }
    if let Some(last) = last
        && let Some(i) = active.iter().position(|h| *h == last)
    {
        return Some(active[(i + 1) % active.len()]);
    }
    Some(active[0])
}
