use crate::error::SeismicError;
use crate::mseed;
use crate::waveform::Waveform;
use std::path::Path;
use tracing::info;

/// Summary metadata derived from a parsed waveform.
///
/// Duration and sampling rate describe the first trace only; the trace count
/// covers the whole waveform. Single-trace files are the expected input, so
/// multi-trace aggregation is deliberately not attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub num_traces: usize,
    /// End minus start of the first trace, in seconds.
    pub duration_secs: f64,
    /// Sampling rate of the first trace, in Hz.
    pub sampling_rate: f64,
}

/// The bundle handed from the summarizer to the uploader.
#[derive(Debug, Clone)]
pub struct ProcessedResult {
    pub data: Waveform,
    pub metadata: Metadata,
}

/// Parse a waveform file and derive its summary metadata.
///
/// Fails with `FileNotFound` for a missing path, `Parse` for anything
/// unreadable or unrecognized, and `EmptyWaveform` when the file holds zero
/// traces. The input file is only read, never modified.
pub fn summarize<P: AsRef<Path>>(path: P) -> Result<ProcessedResult, SeismicError> {
    let path = path.as_ref();
    let data = mseed::read_file(path)?;

    let first = data.first().ok_or(SeismicError::EmptyWaveform)?;
    let duration = first.endtime().signed_duration_since(first.starttime);
    let duration_secs = duration
        .num_microseconds()
        .map(|us| us as f64 / 1e6)
        .unwrap_or_else(|| duration.num_seconds() as f64);

    let metadata = Metadata {
        num_traces: data.len(),
        duration_secs,
        sampling_rate: first.sampling_rate,
    };

    info!(
        path = %path.display(),
        num_traces = metadata.num_traces,
        duration_secs = metadata.duration_secs,
        sampling_rate = metadata.sampling_rate,
        "Waveform summarized"
    );

    Ok(ProcessedResult { data, metadata })
}
