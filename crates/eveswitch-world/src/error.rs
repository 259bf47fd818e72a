//! Error types and result alias for the eveswitch-world crate.
use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Error variants produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Window enumeration failed; the previous snapshot stays visible.
    #[error("window enumeration failed: {0}")]
    Enumeration(String),
    /// A title matched more than one classification rule. Not expected
    /// with the current disjoint prefix/exact rules; reported rather than
    /// silently resolved.
    #[error("title classifies as both character and login window: {title:?}")]
    ClassificationAmbiguous {
        /// The offending window title.
        title: String,
    },
}
