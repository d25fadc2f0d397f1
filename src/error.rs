//! Error types for LFSR simulation and recovery

use thiserror::Error;

/// Errors that can occur while simulating, solving or validating LFSRs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LfsrError {
    /// Tap position outside the register at construction time
    #[error("invalid tap position {position} for a degree {degree} register; positioning is 0-indexed")]
    InvalidConfiguration { position: i64, degree: usize },

    /// A register must hold at least one bit
    #[error("register degree must be positive")]
    ZeroDegree,

    /// Seed value does not fit the register width
    #[error("seed does not fit in a {degree}-bit register")]
    SeedOutOfRange { degree: usize },

    /// Recovery degree below the smallest meaningful system size
    #[error("degree {degree} is too small to solve for; the minimum is 3")]
    DegreeTooSmall { degree: usize },

    /// Observed stream is shorter than the 2*degree bits the solver needs
    #[error("solving at degree {degree} needs {required} bits, stream has {available}")]
    InsufficientData {
        degree: usize,
        required: usize,
        available: usize,
    },

    /// No unique GF(2) solution exists at the requested degree
    #[error("cannot solve for the given bitstream at degree {degree}: window matrix is singular")]
    SingularSystem { degree: usize },

    /// Stream too short to form any valid degree range for a scan
    #[error("stream of {length} bits is too short for a degree scan")]
    StreamTooShort { length: usize },

    /// Comparing streams of unequal length
    #[error("stream lengths mismatch, found lengths {left} and {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Non-binary character in a textual stream
    #[error("invalid character {found:?} at position {position}, expected '0' or '1'")]
    InvalidBit { position: usize, found: char },

    /// Number extraction over an empty target range
    #[error("cannot extract a number from an empty range")]
    EmptyRange,

    /// Cascade stages must agree on a single register width
    #[error("cascade stages must share one degree, found {found} alongside {expected}")]
    DegreeMismatch { expected: usize, found: usize },

    /// Cascade with no stages
    #[error("cascade requires at least one register")]
    EmptyCascade,
}

/// Type alias for Result with LfsrError
pub type Result<T> = std::result::Result<T, LfsrError>;
