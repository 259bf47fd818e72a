//! Error types and result alias for the win-hotkey crate.
use std::result::Result as StdResult;

use thiserror::Error;
use win_keycode::Gesture;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Error variants produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The gesture is already present in the registry.
    #[error("hotkey already registered: {0}")]
    AlreadyRegistered(Gesture),
    /// The gesture is not present in the registry.
    #[error("hotkey not registered: {0}")]
    NotRegistered(Gesture),
    /// The OS refused to bind the gesture, typically because another
    /// application already owns the chord.
    #[error("OS refused to register {gesture}: {reason}")]
    OsRegistrationFailed {
        /// The gesture that could not be bound.
        gesture: Gesture,
        /// OS-supplied failure description.
        reason: String,
    },
    /// Underlying OS call failed.
    #[error("OS error: {0}")]
    Os(String),
    /// Replaying an intercepted keystroke failed.
    #[error("key replay failed: {0}")]
    Replay(String),
}
