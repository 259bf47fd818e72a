/// Non-modifier keys addressable by a hotkey, with their Windows
/// virtual-key codes as discriminants.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum Key {
    Cancel = 0x03,
    Backspace = 0x08,
    Tab = 0x09,
    Return = 0x0D,
    Pause = 0x13,
    Escape = 0x1B,
    Space = 0x20,
    PageUp = 0x21,
    PageDown = 0x22,
    End = 0x23,
    Home = 0x24,
    Left = 0x25,
    Up = 0x26,
    Right = 0x27,
    Down = 0x28,
    PrintScreen = 0x2C,
    Insert = 0x2D,
    Delete = 0x2E,
    Digit0 = 0x30,
    Digit1 = 0x31,
    Digit2 = 0x32,
    Digit3 = 0x33,
    Digit4 = 0x34,
    Digit5 = 0x35,
    Digit6 = 0x36,
    Digit7 = 0x37,
    Digit8 = 0x38,
    Digit9 = 0x39,
    A = 0x41,
    B = 0x42,
    C = 0x43,
    D = 0x44,
    E = 0x45,
    F = 0x46,
    G = 0x47,
    H = 0x48,
    I = 0x49,
    J = 0x4A,
    K = 0x4B,
    L = 0x4C,
    M = 0x4D,
    N = 0x4E,
    O = 0x4F,
    P = 0x50,
    Q = 0x51,
    R = 0x52,
    S = 0x53,
    T = 0x54,
    U = 0x55,
    V = 0x56,
    W = 0x57,
    X = 0x58,
    Y = 0x59,
    Z = 0x5A,
    Numpad0 = 0x60,
    Numpad1 = 0x61,
    Numpad2 = 0x62,
    Numpad3 = 0x63,
    Numpad4 = 0x64,
    Numpad5 = 0x65,
    Numpad6 = 0x66,
    Numpad7 = 0x67,
    Numpad8 = 0x68,
    Numpad9 = 0x69,
    NumpadMultiply = 0x6A,
    NumpadAdd = 0x6B,
    NumpadSubtract = 0x6D,
    NumpadDecimal = 0x6E,
    NumpadDivide = 0x6F,
    F1 = 0x70,
    F2 = 0x71,
    F3 = 0x72,
    F4 = 0x73,
    F5 = 0x74,
    F6 = 0x75,
    F7 = 0x76,
    F8 = 0x77,
    F9 = 0x78,
    F10 = 0x79,
    F11 = 0x7A,
    F12 = 0x7B,
    NumLock = 0x90,
    ScrollLock = 0x91,
}

impl Key {
    /// The Windows virtual-key code for this key.
    pub fn vk(self) -> u16 {
        self as u16
    }

    /// Whether this key carries the 0xE0 scan-code prefix on a physical
    /// keyboard. Synthetic events for these keys must set
    /// KEYEVENTF_EXTENDEDKEY or the receiver decodes a different key
    /// (e.g. numpad Home instead of the navigation-cluster Home).
    pub fn is_extended(self) -> bool {
        matches!(
            self,
            Self::Cancel
                | Self::PageUp
                | Self::PageDown
                | Self::End
                | Self::Home
                | Self::Left
                | Self::Up
                | Self::Right
                | Self::Down
                | Self::PrintScreen
                | Self::Insert
                | Self::Delete
                | Self::NumLock
                | Self::NumpadDivide
        )
    }

    /// Parses a key specification. Case-insensitive; accepts letters,
    /// digits, function keys ("f1".."f12") and common names/aliases.
    pub fn from_spec(s: &str) -> Option<Self> {
        let t = s.to_ascii_lowercase();
        let k = match t.as_str() {
            "a" => Self::A,
            "b" => Self::B,
            "c" => Self::C,
            "d" => Self::D,
            "e" => Self::E,
            "f" => Self::F,
            "g" => Self::G,
            "h" => Self::H,
            "i" => Self::I,
            "j" => Self::J,
            "k" => Self::K,
            "l" => Self::L,
            "m" => Self::M,
            "n" => Self::N,
            "o" => Self::O,
            "p" => Self::P,
            "q" => Self::Q,
            "r" => Self::R,
            "s" => Self::S,
            "t" => Self::T,
            "u" => Self::U,
            "v" => Self::V,
            "w" => Self::W,
            "x" => Self::X,
            "y" => Self::Y,
            "z" => Self::Z,
            "0" => Self::Digit0,
            "1" => Self::Digit1,
            "2" => Self::Digit2,
            "3" => Self::Digit3,
            "4" => Self::Digit4,
            "5" => Self::Digit5,
            "6" => Self::Digit6,
            "7" => Self::Digit7,
            "8" => Self::Digit8,
            "9" => Self::Digit9,
            "f1" => Self::F1,
            "f2" => Self::F2,
            "f3" => Self::F3,
            "f4" => Self::F4,
            "f5" => Self::F5,
            "f6" => Self::F6,
            "f7" => Self::F7,
            "f8" => Self::F8,
            "f9" => Self::F9,
            "f10" => Self::F10,
            "f11" => Self::F11,
            "f12" => Self::F12,
            "space" => Self::Space,
            "tab" => Self::Tab,
            "enter" | "return" => Self::Return,
            "esc" | "escape" => Self::Escape,
            "backspace" | "back" => Self::Backspace,
            "pageup" | "pgup" => Self::PageUp,
            "pagedown" | "pgdn" => Self::PageDown,
            "end" => Self::End,
            "home" => Self::Home,
            "left" => Self::Left,
            "up" => Self::Up,
            "right" => Self::Right,
            "down" => Self::Down,
            "insert" | "ins" => Self::Insert,
            "delete" | "del" => Self::Delete,
            "pause" => Self::Pause,
            "cancel" => Self::Cancel,
            "printscreen" | "prtsc" => Self::PrintScreen,
            "numlock" => Self::NumLock,
            "scrolllock" => Self::ScrollLock,
            "numpad0" => Self::Numpad0,
            "numpad1" => Self::Numpad1,
            "numpad2" => Self::Numpad2,
            "numpad3" => Self::Numpad3,
            "numpad4" => Self::Numpad4,
            "numpad5" => Self::Numpad5,
            "numpad6" => Self::Numpad6,
            "numpad7" => Self::Numpad7,
            "numpad8" => Self::Numpad8,
            "numpad9" => Self::Numpad9,
            "numpadmultiply" => Self::NumpadMultiply,
            "numpadadd" => Self::NumpadAdd,
            "numpadsubtract" => Self::NumpadSubtract,
            "numpaddecimal" => Self::NumpadDecimal,
            "numpaddivide" => Self::NumpadDivide,
            _ => return None,
        };
        Some(k)
    }

    /// Returns the canonical lowercase spec string for this key.
    pub fn to_spec(self) -> String {
        let s = match self {
            Self::Return => "enter",
            Self::Escape => "esc",
            Self::Backspace => "backspace",
            other => return format!("{:?}", other).to_ascii_lowercase().replace("digit", ""),
        };
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vk_values_match_winuser() {
        assert_eq!(Key::A.vk(), 0x41);
        assert_eq!(Key::Digit1.vk(), 0x31);
        assert_eq!(Key::F1.vk(), 0x70);
        assert_eq!(Key::Return.vk(), 0x0D);
        assert_eq!(Key::NumpadDivide.vk(), 0x6F);
    }

    #[test]
    fn extended_keys_cover_navigation_cluster() {
        for k in [
            Key::Insert,
            Key::Delete,
            Key::Home,
            Key::End,
            Key::PageUp,
            Key::PageDown,
            Key::Left,
            Key::Up,
            Key::Right,
            Key::Down,
            Key::NumLock,
            Key::NumpadDivide,
        ] {
            assert!(k.is_extended(), "{:?} must be extended", k);
        }
        assert!(!Key::A.is_extended());
        assert!(!Key::F1.is_extended());
        assert!(!Key::NumpadAdd.is_extended());
    }

    #[test]
    fn spec_roundtrip() {
        for s in ["a", "5", "f11", "enter", "esc", "pageup", "numpad7"] {
            let k = Key::from_spec(s).expect("parse");
            assert_eq!(Key::from_spec(&k.to_spec()), Some(k), "roundtrip {}", s);
        }
    }

    #[test]
    fn spec_aliases() {
        assert_eq!(Key::from_spec("RETURN"), Some(Key::Return));
        assert_eq!(Key::from_spec("pgdn"), Some(Key::PageDown));
        assert_eq!(Key::from_spec("ins"), Some(Key::Insert));
        assert_eq!(Key::from_spec("bogus"), None);
    }
}
