//! Virtual-key codes, modifier flags and key gestures.
//!
//! A [`Gesture`] is the logical identity of a hotkey: one primary [`Key`]
//! plus a set of [`Modifiers`]. Gestures are structural values; two gestures
//! are the same hotkey iff they compare equal, independent of any OS
//! registration id.

mod gesture;
mod key;
mod modifiers;

pub use gesture::Gesture;
pub use key::Key;
pub use modifiers::Modifiers;
