use anyhow::{bail, Context, Result};
use seismic_uploader::config::Config;
use seismic_uploader::s3_uploader::{S3ObjectStore, Uploader};
use seismic_uploader::summarizer;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    init_tracing(&config.service.log_level);

    let (file, bucket, key) = parse_args(std::env::args().skip(1).collect())?;

    info!(
        service = %config.service.name,
        file = %file,
        bucket = %bucket,
        key = %key,
        "Starting seismic upload"
    );

    let result = summarizer::summarize(&file)?;

    let store = Arc::new(S3ObjectStore::new(&config.s3).await);
    let uploader = Uploader::new(store);
    uploader.upload(&result, &bucket, &key).await?;

    Ok(())
}

/// Positional arguments only: waveform file, bucket, object key.
fn parse_args(args: Vec<String>) -> Result<(String, String, String)> {
    if args.len() != 3 {
        bail!("usage: seismic-uploader <waveform-file> <bucket> <object-key>");
    }
    let mut args = args.into_iter();
    let file = args.next().unwrap_or_default();
    let bucket = args.next().unwrap_or_default();
    let key = args.next().unwrap_or_default();
    if bucket.is_empty() {
        bail!("bucket name must not be empty");
    }
    if key.is_empty() {
        bail!("object key must not be empty");
    }
    Ok((file, bucket, key))
}

/// Initialize tracing/logging.
///
/// Diagnostics go to stderr; stdout carries only the upload confirmation.
fn init_tracing(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_accepts_three_positional_arguments() {
        let (file, bucket, key) =
            parse_args(args(&["data.mseed", "test-bucket", "out.mseed"])).unwrap();
        assert_eq!(file, "data.mseed");
        assert_eq!(bucket, "test-bucket");
        assert_eq!(key, "out.mseed");
    }

    #[test]
    fn test_parse_args_rejects_wrong_arity() {
        assert!(parse_args(args(&["data.mseed"])).is_err());
        assert!(parse_args(args(&["a", "b", "c", "d"])).is_err());
    }

    #[test]
    fn test_parse_args_rejects_empty_bucket_or_key() {
        assert!(parse_args(args(&["data.mseed", "", "out.mseed"])).is_err());
        assert!(parse_args(args(&["data.mseed", "test-bucket", ""])).is_err());
    }
}
