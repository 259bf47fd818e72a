use bitflags::bitflags;

bitflags! {
    /// Modifier set for a gesture. The bit values are exactly the Win32
    /// `MOD_*` flags, so [`Modifiers::bits`] is the `fsModifiers` argument
    /// for RegisterHotKey.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
    pub struct Modifiers: u32 {
        /// MOD_ALT
        const ALT = 0x0001;
        /// MOD_CONTROL
        const CONTROL = 0x0002;
        /// MOD_SHIFT
        const SHIFT = 0x0004;
    }
}

impl Modifiers {
    /// Parses a single modifier token. Case-insensitive, with common
    /// aliases (ctrl/control, alt, shift).
    pub fn from_spec(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => Some(Self::CONTROL),
            "alt" => Some(Self::ALT),
            "shift" => Some(Self::SHIFT),
            _ => None,
        }
    }

    /// Canonical spec tokens in canonical order (ctrl, alt, shift).
    pub fn to_specs(self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.contains(Self::CONTROL) {
            out.push("ctrl");
        }
        if self.contains(Self::ALT) {
            out.push("alt");
        }
        if self.contains(Self::SHIFT) {
            out.push("shift");
        }
        out
    }

    /// Virtual-key codes for the held modifiers, in the fixed injection
    /// order: Control, Shift, Alt.
    pub fn vks(self) -> Vec<u16> {
        let mut out = Vec::new();
        if self.contains(Self::CONTROL) {
            out.push(0x11); // VK_CONTROL
        }
        if self.contains(Self::SHIFT) {
            out.push(0x10); // VK_SHIFT
        }
        if self.contains(Self::ALT) {
            out.push(0x12); // VK_MENU
        }
        out
    }
}
