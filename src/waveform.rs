use chrono::{DateTime, Duration, Utc};

/// One continuous recorded signal segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// SEED network code (up to 2 characters).
    pub network: String,
    /// SEED station code (up to 5 characters).
    pub station: String,
    /// SEED location code (up to 2 characters, often empty).
    pub location: String,
    /// SEED channel code (up to 3 characters).
    pub channel: String,
    /// Time of the first sample.
    pub starttime: DateTime<Utc>,
    /// Samples per second, always positive.
    pub sampling_rate: f64,
    pub samples: Vec<i32>,
}

impl Trace {
    /// Time of the last sample: `starttime + (len - 1) / sampling_rate`.
    ///
    /// A single-sample trace ends when it starts.
    pub fn endtime(&self) -> DateTime<Utc> {
        if self.samples.is_empty() {
            return self.starttime;
        }
        let span_us = (self.samples.len() - 1) as f64 / self.sampling_rate * 1_000_000.0;
        self.starttime + Duration::microseconds(span_us.round() as i64)
    }

    /// Identifier in `NET.STA.LOC.CHA` form.
    pub fn id(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.network, self.station, self.location, self.channel
        )
    }
}

/// An ordered sequence of traces read from one file.
///
/// Immutable for the duration of the pipeline: the summarizer derives metadata
/// from it and the uploader re-serializes it unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Waveform {
    pub traces: Vec<Trace>,
}

impl Waveform {
    pub fn new(traces: Vec<Trace>) -> Self {
        Self { traces }
    }

    /// Number of traces.
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    pub fn first(&self) -> Option<&Trace> {
        self.traces.first()
    }
}
