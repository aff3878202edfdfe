use crate::config::S3Config;
use crate::error::SeismicError;
use crate::mseed;
use crate::summarizer::ProcessedResult;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Builder as S3ConfigBuilder;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Narrow capability interface over an object-storage backend.
///
/// The uploader depends on this seam rather than a concrete vendor client, so
/// tests can supply an in-memory fake and any backend with a single-object
/// put can satisfy it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `key` in `bucket`.
    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), SeismicError>;
}

/// S3-backed object store using the SDK default credential chain.
pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    /// Create a client from ambient credentials plus the given region and
    /// optional custom endpoint.
    pub async fn new(config: &S3Config) -> Self {
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = S3ConfigBuilder::from(&aws_config);

        // Custom endpoint for MinIO/LocalStack
        if let Some(ref endpoint_url) = config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }

        // Path-style access for MinIO compatibility
        if config.force_path_style {
            builder = builder.force_path_style(true);
        }

        let client = S3Client::from_conf(builder.build());

        info!(region = %config.region, "S3 object store initialized");

        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), SeismicError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type("application/vnd.fdsn.mseed")
            .send()
            .await
            .map_err(|e| SeismicError::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                reason: DisplayErrorContext(e).to_string(),
            })?;

        Ok(())
    }
}

/// Serializes a processed waveform to a scoped temporary file and transfers
/// the bytes to object storage.
pub struct Uploader {
    store: Arc<dyn ObjectStore>,
}

impl Uploader {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Serialize `result.data` as little-endian miniSEED and upload it.
    ///
    /// The temporary file has a unique per-invocation name and is removed on
    /// drop whether or not the transfer succeeds. On success, one
    /// confirmation line naming the bucket and key goes to stdout.
    #[instrument(skip(self, result))]
    pub async fn upload(
        &self,
        result: &ProcessedResult,
        bucket: &str,
        key: &str,
    ) -> Result<(), SeismicError> {
        let tmp = tempfile::Builder::new()
            .prefix("seismic-")
            .suffix(".mseed")
            .tempfile()
            .map_err(|e| {
                SeismicError::serialization(format!("failed to create temporary file: {e}"))
            })?;

        mseed::write_file(&result.data, tmp.path())?;

        let body = std::fs::read(tmp.path()).map_err(|e| {
            SeismicError::serialization(format!("failed to read back temporary file: {e}"))
        })?;

        debug!(
            tmp_path = %tmp.path().display(),
            size_bytes = body.len(),
            "Serialized waveform to miniSEED"
        );

        self.store.put(bucket, key, body).await?;

        info!(
            num_traces = result.metadata.num_traces,
            "Waveform uploaded"
        );
        println!("{}", confirmation_message(bucket, key));

        Ok(())
    }
}

/// The single stdout line emitted after a successful upload.
pub fn confirmation_message(bucket: &str, key: &str) -> String {
    format!("Seismic data uploaded to S3 bucket '{bucket}' with object key '{key}'")
}
