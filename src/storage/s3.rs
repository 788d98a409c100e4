// ABOUTME: ObjectStorage implementation backed by aws-sdk-s3.
// ABOUTME: Maps SDK failures onto StorageError without retrying.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};

use super::{ObjectStorage, StorageError, Upload};
use crate::types::{BucketName, Region};

/// S3 client bound to the deployment region.
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: aws_sdk_s3::Client,
}

impl S3Storage {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_s3::Client::new(config))
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn bucket_exists(&self, bucket: &BucketName) -> Result<bool, StorageError> {
        match self.client.head_bucket().bucket(bucket.as_str()).send().await {
            Ok(_) => Ok(true),
            Err(err) => match err.as_service_error() {
                // Any service-level rejection (404, 403, 301) means "not usable as-is";
                // creation decides whether the name can be claimed.
                Some(service_err) => {
                    tracing::debug!(
                        "head_bucket {} rejected (not_found={}): {}",
                        bucket,
                        service_err.is_not_found(),
                        DisplayErrorContext(&err)
                    );
                    Ok(false)
                }
                None => Err(StorageError::Request {
                    bucket: bucket.to_string(),
                    message: DisplayErrorContext(&err).to_string(),
                }),
            },
        }
    }

    async fn create_bucket(
        &self,
        bucket: &BucketName,
        region: &Region,
    ) -> Result<(), StorageError> {
        let mut request = self.client.create_bucket().bucket(bucket.as_str());

        if !region.is_default_s3_region() {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region.as_str()))
                    .build(),
            );
        }

        match request.send().await {
            Ok(_) => Ok(()),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_bucket_already_owned_by_you()) =>
            {
                // Created concurrently by the same account
                tracing::debug!("bucket {} already owned by caller", bucket);
                Ok(())
            }
            Err(err) => Err(StorageError::CreateRejected {
                bucket: bucket.to_string(),
                message: DisplayErrorContext(&err).to_string(),
            }),
        }
    }

    async fn upload_file(&self, upload: &Upload<'_>) -> Result<(), StorageError> {
        let body = ByteStream::from_path(upload.path)
            .await
            .map_err(|e| StorageError::ReadFile {
                path: upload.path.to_path_buf(),
                message: e.to_string(),
            })?;

        self.client
            .put_object()
            .bucket(upload.bucket.as_str())
            .key(upload.key)
            .set_content_type(upload.content_type.map(str::to_string))
            .body(body)
            .send()
            .await
            .map(|_| ())
            .map_err(|err| StorageError::Transfer {
                bucket: upload.bucket.to_string(),
                key: upload.key.to_string(),
                message: DisplayErrorContext(&err).to_string(),
            })
    }
}
