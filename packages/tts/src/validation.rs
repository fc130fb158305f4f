//! Pre-flight checks for reference audio.

use std::path::Path;

use voice_assistant_domain::{SampleInfo, SampleRejection, Verdict};

use crate::audio;
use crate::config::ValidationPolicy;

/// Accepts or rejects candidate reference files against a fixed policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleValidator {
    policy: ValidationPolicy,
}

impl SampleValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Run every check in order and log the outcome.
    pub fn validate(&self, path: impl AsRef<Path>) -> Verdict {
        let path = path.as_ref();
        let verdict = match self.inspect(path) {
            Ok(info) => Verdict::Accepted(info),
            Err(rejection) => Verdict::Rejected(rejection),
        };
        match &verdict {
            Verdict::Accepted(info) => {
                tracing::info!(path = %path.display(), %info, "voice sample validation passed");
            }
            Verdict::Rejected(rejection) => {
                tracing::error!(path = %path.display(), reason = %rejection, "voice sample validation failed");
            }
        }
        verdict
    }

    /// Boolean shorthand for [`validate`](Self::validate).
    pub fn is_valid(&self, path: impl AsRef<Path>) -> bool {
        self.validate(path).is_accepted()
    }

    fn inspect(&self, path: &Path) -> Result<SampleInfo, SampleRejection> {
        if !path.is_file() {
            return Err(SampleRejection::Missing(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if extension != "wav" && extension != "wave" {
            return Err(SampleRejection::UnsupportedFormat { extension });
        }

        let stats =
            audio::scan_wav(path).map_err(|e| SampleRejection::Undecodable(e.to_string()))?;

        let duration_secs = stats.duration_secs();
        if duration_secs < self.policy.min_duration_secs {
            return Err(SampleRejection::TooShort {
                duration_secs,
                minimum_secs: self.policy.min_duration_secs,
            });
        }

        if stats.sample_rate < self.policy.min_sample_rate {
            return Err(SampleRejection::SampleRateTooLow {
                sample_rate: stats.sample_rate,
                minimum: self.policy.min_sample_rate,
            });
        }

        if stats.peak < self.policy.silence_threshold {
            return Err(SampleRejection::Silent {
                peak: stats.peak,
                threshold: self.policy.silence_threshold,
            });
        }

        Ok(SampleInfo {
            duration_secs,
            sample_rate: stats.sample_rate,
            channels: stats.channels,
            peak: stats.peak,
        })
    }
}
