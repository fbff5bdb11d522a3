//! Error types for the synthesis core

use thiserror::Error;

/// Result type alias for synthesis operations
pub type Result<T> = std::result::Result<T, SynthError>;

/// Errors raised by the synthesis core
///
/// All variants are invalid-argument failures, reported immediately and
/// never retried. Pathological filter parameters (zero Q, cutoff past Nyquist) are not
/// errors: they flow through as NaN/Inf samples.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthError {
    #[error("unknown wave type '{name}' (expected sine, square or sawtooth)")]
    UnknownWaveType { name: String },

    #[error("sample rate must be positive, got {sample_rate}")]
    InvalidSampleRate { sample_rate: u32 },

    #[error("duration must be non-negative, got {duration_secs}s")]
    InvalidDuration { duration_secs: f64 },

    #[error("equalizer needs {expected} gains, got {got}")]
    EqualizerGains { expected: usize, got: usize },
}

impl SynthError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SynthError::UnknownWaveType { .. } => "UNKNOWN_WAVE_TYPE",
            SynthError::InvalidSampleRate { .. } => "INVALID_SAMPLE_RATE",
            SynthError::InvalidDuration { .. } => "INVALID_DURATION",
            SynthError::EqualizerGains { .. } => "EQUALIZER_GAINS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SynthError::UnknownWaveType {
            name: "triangle".to_string(),
        };
        assert_eq!(err.error_code(), "UNKNOWN_WAVE_TYPE");

        let err = SynthError::InvalidSampleRate { sample_rate: 0 };
        assert_eq!(err.error_code(), "INVALID_SAMPLE_RATE");
    }

    #[test]
    fn test_error_messages() {
        let err = SynthError::EqualizerGains { expected: 10, got: 3 };
        assert_eq!(err.to_string(), "equalizer needs 10 gains, got 3");

        let err = SynthError::InvalidDuration { duration_secs: -1.5 };
        assert!(err.to_string().contains("-1.5"));
    }
}
