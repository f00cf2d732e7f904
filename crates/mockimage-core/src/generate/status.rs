//! Status line for a generation outcome.

use serde::Serialize;

use super::types::{EncodeResult, GenerateError};

/// Colour family of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Success,
    Info,
    Warning,
    Error,
}

/// What the page shows after a generate action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerateStatus {
    pub label: &'static str,
    pub tone: StatusTone,
}

impl GenerateStatus {
    pub const READY: GenerateStatus = GenerateStatus {
        label: "Ready",
        tone: StatusTone::Success,
    };

    pub const GENERATING: GenerateStatus = GenerateStatus {
        label: "Generating...",
        tone: StatusTone::Info,
    };

    pub fn from_result(result: &EncodeResult) -> Self {
        if result.is_too_large {
            Self {
                label: "Capped at min quality",
                tone: StatusTone::Warning,
            }
        } else {
            Self {
                label: "Done",
                tone: StatusTone::Success,
            }
        }
    }

    pub fn from_error(error: &GenerateError) -> Self {
        let (label, tone) = match error {
            GenerateError::InvalidDimensions { .. } => ("Invalid Dim", StatusTone::Error),
            GenerateError::DimensionsTooLarge { .. } => ("Too Large", StatusTone::Error),
            GenerateError::InvalidTargetSize { .. } => ("Invalid Size", StatusTone::Error),
            GenerateError::Busy => ("Busy", StatusTone::Info),
            GenerateError::Encoding(_) | GenerateError::Preview(_) => ("Error", StatusTone::Error),
        };
        Self { label, tone }
    }

    /// Status for any generate outcome.
    pub fn from_outcome<R: AsRef<EncodeResult>>(outcome: &Result<R, GenerateError>) -> Self {
        match outcome {
            Ok(result) => Self::from_result(result.as_ref()),
            Err(error) => Self::from_error(error),
        }
    }
}

impl AsRef<EncodeResult> for EncodeResult {
    fn as_ref(&self) -> &EncodeResult {
        self
    }
}
