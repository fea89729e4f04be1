//! Error type shared by every analysis operation.
//!
//! All failures are deterministic input-validation problems detected before
//! (or while) a destination is written, so there is no retry or partial
//! success: an `Err` leaves the destination contents unspecified.

/// Width, height and channel count of a buffer, as reported in errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dims {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl std::fmt::Display for Dims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.channels)
    }
}

/// Reasons an analysis call can be rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum AnalysisError {
    /// Two buffers disagree in size or channel layout, or a buffer's storage
    /// cannot hold the layout it declares.
    DimensionMismatch {
        what: &'static str,
        expected: Dims,
        found: Dims,
    },
    /// A scalar parameter is outside its accepted range.
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
}

impl AnalysisError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch(what: &'static str, expected: Dims, found: Dims) -> Self {
        AnalysisError::DimensionMismatch {
            what,
            expected,
            found,
        }
    }

    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, AnalysisError::DimensionMismatch { .. })
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, AnalysisError::InvalidParameter { .. })
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::DimensionMismatch {
                what,
                expected,
                found,
            } => write!(f, "dimension mismatch for {what}: expected {expected}, found {found}"),
            AnalysisError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{name}`: {reason}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

pub type Result<T> = std::result::Result<T, AnalysisError>;
