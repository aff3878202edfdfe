//! Seismic waveform summarize-and-upload pipeline.
//!
//! Reads a miniSEED waveform file, derives summary metadata (trace count,
//! first-trace duration and sampling rate), re-serializes the waveform as
//! little-endian miniSEED, and transfers it to an object-storage bucket.
//! The pipeline is a single synchronous pass with no retries: any failure
//! aborts the run with a typed [`SeismicError`].
//!
//! # Example
//!
//! ```rust,no_run
//! use seismic_uploader::config::Config;
//! use seismic_uploader::{summarize, S3ObjectStore, Uploader};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!
//!     let result = summarize("data/example.mseed")?;
//!
//!     let store = Arc::new(S3ObjectStore::new(&config.s3).await);
//!     Uploader::new(store)
//!         .upload(&result, "my-bucket", "example.mseed")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod mseed;
pub mod s3_uploader;
pub mod summarizer;
pub mod waveform;

// Re-export main types
pub use config::{Config, S3Config, ServiceConfig};
pub use error::SeismicError;
pub use s3_uploader::{confirmation_message, ObjectStore, S3ObjectStore, Uploader};
pub use summarizer::{summarize, Metadata, ProcessedResult};
pub use waveform::{Trace, Waveform};
