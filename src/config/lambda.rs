#[cfg(feature = "lambda")]
use crate::core::Storage;
#[cfg(feature = "lambda")]
use crate::utils::error::{Result, SiteError};
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use std::env;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub s3_bucket: String,
    pub s3_prefix: String,
    pub s3_region: String,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            s3_bucket: env::var("S3_BUCKET").map_err(|_| SiteError::MissingConfigError {
                field: "S3_BUCKET".to_string(),
            })?,
            s3_prefix: env::var("S3_PREFIX").unwrap_or_else(|_| "consultations".to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "us-west-1".to_string()),
        })
    }
}

#[cfg(feature = "lambda")]
impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        // 驗證S3 bucket名稱
        validate_s3_bucket_name("s3_bucket", &self.s3_bucket)?;

        // 驗證S3前綴
        validate_non_empty_string("s3_prefix", &self.s3_prefix)?;

        // 驗證區域
        validate_aws_region("s3_region", &self.s3_region)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "lambda")]
fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    let invalid = |reason: &str| SiteError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: bucket_name.to_string(),
        reason: reason.to_string(),
    };

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(invalid("S3 bucket name must be between 3 and 63 characters"));
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid(
            "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(invalid("S3 bucket name cannot start or end with a hyphen"));
    }

    Ok(())
}

#[cfg(feature = "lambda")]
fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    crate::utils::validation::validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

#[cfg(feature = "lambda")]
impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[cfg(feature = "lambda")]
impl Storage for S3Storage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type("application/json")
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|e| SiteError::StorageError {
                message: format!("Failed to write to S3: {}", e.into_service_error()),
            })?;

        tracing::debug!("Wrote s3://{}/{} ({} bytes)", self.bucket, path, data.len());
        Ok(())
    }
}
