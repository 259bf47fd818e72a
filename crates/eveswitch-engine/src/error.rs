//! Error types and result alias for the engine crate.
use std::result::Result as StdResult;

use thiserror::Error;
use win_keycode::Gesture;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the eveswitch engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A configured gesture specification did not parse.
    #[error("invalid gesture spec: {0:?}")]
    BadGesture(String),

    /// Two configured specs name the same chord.
    #[error("duplicate gesture: {0}")]
    DuplicateGesture(Gesture),
}
