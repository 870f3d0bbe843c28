//! Errors for parameters that are only known at run time.
//!
//! Misusing a sponge (absorbing after it was finalized, squeezing before the
//! switch to extendable output) is a programming error and panics instead:
//! there is no meaningful output to recover once the state machine is broken.
//! [`SpongeError`] covers the remaining cases, where a caller hands over a value
//! it could not check at compile time:
//!
//! - an output length that leaves no room for the rate ([`SpongeError::UnsupportedOutputLength`]);
//! - a backend name that does not match any permutation ([`SpongeError::UnknownBackend`]).

use std::{error::Error, fmt::Display};

/// Largest output length in bytes: `200 - 2 * 99` leaves a 2-byte rate.
pub const MAX_OUTPUT_LEN: usize = 99;

/// Invalid run-time parameter for a sponge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpongeError {
    /// The requested output length is zero or would leave a rate below 2 bytes.
    UnsupportedOutputLength(usize),
    /// No permutation backend goes by this name.
    UnknownBackend(String),
}

/// Result type for fallible sponge construction.
pub type SpongeResult<T> = Result<T, SpongeError>;

impl Display for SpongeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedOutputLength(len) => write!(
                f,
                "Unsupported output length {len}: expected 1..={MAX_OUTPUT_LEN} bytes"
            ),
            Self::UnknownBackend(name) => write!(
                f,
                "Unknown permutation backend {name:?}: expected one of reference, lane64, interleaved32"
            ),
        }
    }
}

impl Error for SpongeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            SpongeError::UnsupportedOutputLength(100).to_string(),
            "Unsupported output length 100: expected 1..=99 bytes"
        );
        assert!(SpongeError::UnknownBackend("neon".into())
            .to_string()
            .contains("\"neon\""));
    }
}
