use std::fmt;

use crate::{Key, Modifiers};

/// A key gesture: a set of modifiers plus a single primary key.
///
/// Equality is structural and order-independent in the modifiers; the
/// gesture is the external identity of a hotkey in configuration and at
/// dispatch time.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Gesture {
    /// Modifier keys held for this gesture.
    pub mods: Modifiers,
    /// The non-modifier key.
    pub key: Key,
}

impl Gesture {
    /// Creates a gesture from parts.
    pub fn new(mods: Modifiers, key: Key) -> Self {
        Self { mods, key }
    }

    /// Parses a gesture specification of the form "ctrl+alt+f1".
    ///
    /// - Case-insensitive for both modifiers and the key.
    /// - Components are separated by "+"; the last component is the key.
    /// - Modifier tokens accept the aliases of [`Modifiers::from_spec`].
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts: Vec<&str> = s.split('+').collect();
        let key_raw = parts.pop()?;
        let key = Key::from_spec(key_raw.trim())?;
        let mut mods = Modifiers::empty();
        for p in parts {
            let pt = p.trim();
            if pt.is_empty() {
                return None;
            }
            mods |= Modifiers::from_spec(pt)?;
        }
        Some(Self { mods, key })
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = self.mods.to_specs().join("+");
        if !out.is_empty() {
            out.push('+');
        }
        out.push_str(&self.key.to_spec());
        write!(f, "{}", out)
    }
}
