use std::path::PathBuf;
use thiserror::Error;

/// Error taxonomy for the summarize-and-upload pipeline.
///
/// Nothing here is retried or recovered locally; every failure propagates
/// unmodified to the caller and aborts the run.
#[derive(Debug, Error)]
pub enum SeismicError {
    /// The input path does not exist.
    #[error("waveform file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file exists but is unreadable or is not a recognized waveform format.
    #[error("failed to parse waveform file: {reason}")]
    Parse { reason: String },

    /// The file parsed to a waveform with zero traces.
    #[error("waveform contains no traces")]
    EmptyWaveform,

    /// The waveform cannot be encoded as miniSEED.
    #[error("failed to serialize waveform: {reason}")]
    Serialization { reason: String },

    /// The object-storage transfer failed.
    #[error("upload to bucket '{bucket}' with key '{key}' failed: {reason}")]
    Upload {
        bucket: String,
        key: String,
        reason: String,
    },
}

impl SeismicError {
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::Serialization {
            reason: reason.into(),
        }
    }
}
