use std::fmt;

/// Error for deterministic misuse of the proximity operations. Nothing in
/// this crate's geometry can fail transiently, so the taxonomy is a single
/// kind raised synchronously for out-of-contract inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    InvalidArgument(String),
}

impl fmt::Display for LocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for LocatorError {}
