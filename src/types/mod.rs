// ABOUTME: Validated domain types for deployment configuration.
// ABOUTME: Stack, bucket, and region names are checked once at load time.

mod bucket_name;
mod region;
mod stack_name;

pub use bucket_name::{BucketName, BucketNameError};
pub use region::{DEFAULT_S3_REGION, Region, RegionError};
pub use stack_name::{StackName, StackNameError};
