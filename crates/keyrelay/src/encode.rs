//! Pure encoding of a gesture into an ordered key-transition sequence.

use win_keycode::Gesture;

/// One synthetic key transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Windows virtual-key code.
    pub vk: u16,
    /// Release transition when true, press otherwise.
    pub up: bool,
    /// Whether the KEYEVENTF_EXTENDEDKEY flag must be set. Omitting it on
    /// an extended key makes the receiver observe a different physical key.
    pub extended: bool,
}

// VK_CONTROL and VK_MENU carry the extended prefix when injected; VK_SHIFT
// does not.
fn extended_modifier(vk: u16) -> bool {
    matches!(vk, 0x11 | 0x12)
}

/// Encodes a gesture as modifier presses in fixed order (Control, Shift,
/// Alt), then the primary key press, then releases in reverse order.
pub fn encode(gesture: &Gesture) -> Vec<KeyEvent> {
    let mut downs: Vec<KeyEvent> = gesture
        .mods
        .vks()
        .into_iter()
        .map(|vk| KeyEvent {
            vk,
            up: false,
            extended: extended_modifier(vk),
        })
        .collect();
    downs.push(KeyEvent {
        vk: gesture.key.vk(),
        up: false,
        extended: gesture.key.is_extended(),
    });
    let mut events = downs.clone();
    events.extend(downs.into_iter().rev().map(|e| KeyEvent { up: true, ..e }));
    events
}
