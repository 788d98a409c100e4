// ABOUTME: Object storage capability used for the artifact and website buckets.
// ABOUTME: Exposes existence checks, region-bound creation, and single-file uploads.

mod s3;

pub use s3::S3Storage;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::types::{BucketName, Region};

/// A single local file to place in a bucket.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    pub bucket: &'a BucketName,
    pub key: &'a str,
    pub path: &'a Path,
    pub content_type: Option<&'a str>,
}

/// Bucket operations: existence check, creation, file upload.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Check whether the bucket exists and is reachable with the current credentials.
    async fn bucket_exists(&self, bucket: &BucketName) -> Result<bool, StorageError>;

    /// Create the bucket in `region`.
    async fn create_bucket(&self, bucket: &BucketName, region: &Region)
    -> Result<(), StorageError>;

    /// Upload one local file.
    async fn upload_file(&self, upload: &Upload<'_>) -> Result<(), StorageError>;
}

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("request for bucket {bucket} failed: {message}")]
    Request { bucket: String, message: String },

    #[error("bucket {bucket} could not be created: {message}")]
    CreateRejected { bucket: String, message: String },

    #[error("failed to read {}: {message}", path.display())]
    ReadFile { path: PathBuf, message: String },

    #[error("upload of {key} to bucket {bucket} failed: {message}")]
    Transfer {
        bucket: String,
        key: String,
        message: String,
    },
}
