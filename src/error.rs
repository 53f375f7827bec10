//! Error handling for stereowave
//!
//! Every failure is fatal: errors propagate to the driver, which prints a
//! single message and exits without writing output.

use thiserror::Error;

/// Result type alias for stereowave operations
pub type Result<T> = std::result::Result<T, WaveError>;

/// Structural problems in the container header.
///
/// Variants are listed in validation order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[error("File is not a RIFF file")]
    NotRiff,

    #[error("Format chunk is corrupted")]
    BadFormatChunk,

    #[error("Data chunk is corrupted")]
    BadDataChunk,

    #[error("File is not stereo")]
    NotStereo,

    #[error("File does not use 44,100Hz sample rate")]
    InvalidSampleRate,

    #[error("File does not have 16-bit samples")]
    InvalidSampleSize,
}

/// Coarse grouping of errors, used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Format,
    Truncated,
    Parameter,
    Usage,
    Resource,
    Io,
    Config,
}

/// Main error type for stereowave operations
#[derive(Error, Debug)]
pub enum WaveError {
    // Container Errors
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("File size does not match size in header: expected {expected} bytes, got {actual}")]
    TruncatedStream { expected: usize, actual: usize },

    // Parameter Errors
    #[error("A positive number must be supplied for the speed change (got {factor})")]
    InvalidSpeed { factor: f64 },

    #[error("A positive number must be supplied for the fade in and fade out time (got {seconds})")]
    InvalidTime { seconds: f64 },

    #[error("A positive number must be supplied for the volume scale (got {scale})")]
    InvalidVolume { scale: f64 },

    #[error("A positive number must be supplied for the echo delay and scale parameters (got {delay}, {scale})")]
    InvalidEcho { delay: f64, scale: f64 },

    #[error("Invalid operand for {operation}: '{token}' is not a non-negative decimal number")]
    InvalidOperand { operation: String, token: String },

    #[error("Usage: {reason}")]
    Usage { reason: String },

    // Resource Errors
    #[error("Program out of memory: {details}")]
    OutOfMemory { details: String },

    #[error("Audio too large for a WAV container: {num_samples} samples")]
    DataTooLarge { num_samples: usize },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration Errors
    #[error("Invalid pipeline file: {0}")]
    Config(#[from] serde_json::Error),
}

impl WaveError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            WaveError::Format(FormatError::NotRiff) => "NOT_RIFF",
            WaveError::Format(FormatError::BadFormatChunk) => "BAD_FORMAT_CHUNK",
            WaveError::Format(FormatError::BadDataChunk) => "BAD_DATA_CHUNK",
            WaveError::Format(FormatError::NotStereo) => "NOT_STEREO",
            WaveError::Format(FormatError::InvalidSampleRate) => "INVALID_SAMPLE_RATE",
            WaveError::Format(FormatError::InvalidSampleSize) => "INVALID_SAMPLE_SIZE",
            WaveError::TruncatedStream { .. } => "TRUNCATED_STREAM",
            WaveError::InvalidSpeed { .. } => "INVALID_SPEED",
            WaveError::InvalidTime { .. } => "INVALID_TIME",
            WaveError::InvalidVolume { .. } => "INVALID_VOLUME",
            WaveError::InvalidEcho { .. } => "INVALID_ECHO",
            WaveError::InvalidOperand { .. } => "INVALID_OPERAND",
            WaveError::Usage { .. } => "USAGE",
            WaveError::OutOfMemory { .. } => "OUT_OF_MEMORY",
            WaveError::DataTooLarge { .. } => "DATA_TOO_LARGE",
            WaveError::Io(_) => "IO_ERROR",
            WaveError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Get the category this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            WaveError::Format(_) => ErrorCategory::Format,
            WaveError::TruncatedStream { .. } => ErrorCategory::Truncated,
            WaveError::InvalidSpeed { .. }
            | WaveError::InvalidTime { .. }
            | WaveError::InvalidVolume { .. }
            | WaveError::InvalidEcho { .. }
            | WaveError::InvalidOperand { .. } => ErrorCategory::Parameter,
            WaveError::Usage { .. } => ErrorCategory::Usage,
            WaveError::OutOfMemory { .. } | WaveError::DataTooLarge { .. } => {
                ErrorCategory::Resource
            }
            WaveError::Io(_) => ErrorCategory::Io,
            WaveError::Config(_) => ErrorCategory::Config,
        }
    }

    /// Shorthand for a usage error
    pub(crate) fn usage(reason: impl Into<String>) -> Self {
        WaveError::Usage {
            reason: reason.into(),
        }
    }

    /// Shorthand for an allocation failure
    pub(crate) fn out_of_memory(details: impl Into<String>) -> Self {
        WaveError::OutOfMemory {
            details: details.into(),
        }
    }
}
