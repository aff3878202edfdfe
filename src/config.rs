use serde::Deserialize;

/// Runtime configuration for the uploader binary.
///
/// Everything has a sensible default; credentials themselves stay with the
/// AWS SDK's default resolution chain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,
    /// S3 configuration
    #[serde(default)]
    pub s3: S3Config,
}

/// Service-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Service name for logging
    #[serde(default = "default_service_name")]
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// S3 client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct S3Config {
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint URL (for MinIO, LocalStack, etc.)
    pub endpoint_url: Option<String>,
    /// Force path-style access (required for MinIO)
    #[serde(default)]
    pub force_path_style: bool,
}

fn default_service_name() -> String {
    "seismic-uploader".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Config {
    /// Load configuration from an optional config file, overridden by
    /// environment variables:
    /// `SEISMIC__S3__ENDPOINT_URL` -> `s3.endpoint_url`
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/uploader").required(false))
            .add_source(
                config::Environment::with_prefix("SEISMIC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize().map_err(Into::into)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
            force_path_style: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.service.name, "seismic-uploader");
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.s3.region, "us-east-1");
        assert!(config.s3.endpoint_url.is_none());
        assert!(!config.s3.force_path_style);
    }
}
