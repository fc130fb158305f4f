//! Outcome of reference-audio validation.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Measured properties of an accepted sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleInfo {
    /// Length in seconds (frames / sample rate).
    pub duration_secs: f32,
    pub sample_rate: u32,
    pub channels: u16,
    /// Peak absolute amplitude, normalized to `0.0..=1.0`.
    pub peak: f32,
}

impl fmt::Display for SampleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}s, {} Hz, {} channel(s), peak {:.4}",
            self.duration_secs, self.sample_rate, self.channels, self.peak
        )
    }
}

/// Why a sample was rejected. Variants are listed in check order.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleRejection {
    #[error("file {} does not exist", .0.display())]
    Missing(PathBuf),
    #[error("unsupported format `{extension}`, expected a .wav file")]
    UnsupportedFormat { extension: String },
    #[error("audio stream is not decodable: {0}")]
    Undecodable(String),
    #[error("sample too short ({duration_secs:.1}s), minimum {minimum_secs} seconds required")]
    TooShort { duration_secs: f32, minimum_secs: f32 },
    #[error("sample rate {sample_rate}Hz is too low, minimum {minimum}Hz required")]
    SampleRateTooLow { sample_rate: u32, minimum: u32 },
    #[error("audio appears to be silent (max absolute amplitude: {peak:.4}, threshold {threshold})")]
    Silent { peak: f32, threshold: f32 },
}

/// Accept/reject decision for a candidate reference file.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted(SampleInfo),
    Rejected(SampleRejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Human-readable reason, suitable for diagnostics.
    pub fn reason(&self) -> String {
        match self {
            Self::Accepted(info) => format!("accepted ({info})"),
            Self::Rejected(rejection) => rejection.to_string(),
        }
    }

    pub fn info(&self) -> Option<&SampleInfo> {
        match self {
            Self::Accepted(info) => Some(info),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&SampleRejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }

    /// Convert into a `Result`, for callers that propagate with `?`.
    pub fn into_result(self) -> Result<SampleInfo, SampleRejection> {
        match self {
            Self::Accepted(info) => Ok(info),
            Self::Rejected(rejection) => Err(rejection),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}
