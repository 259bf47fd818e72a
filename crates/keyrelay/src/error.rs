//! Error types and result alias for the keyrelay crate.
use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Error variants produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The OS accepted fewer input events than were submitted. Injection
    /// is all-or-nothing per call; no partial undo is attempted. Commonly
    /// caused by target-process privilege isolation (UIPI).
    #[error("injected {injected} of {submitted} input events")]
    InjectionPartial {
        /// Number of events submitted.
        submitted: usize,
        /// Number of events the OS reported as injected.
        injected: usize,
    },
    /// Underlying OS call failed outright.
    #[error("OS error: {0}")]
    Os(String),
}
