// ABOUTME: Shared AWS SDK configuration.
// ABOUTME: Loads credentials from the default provider chain, pinned to the deployment region.

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region as SdkRegion;

use crate::types::Region;

/// Load SDK configuration for `region`. Credentials are resolved lazily on first request.
pub async fn load_sdk_config(region: &Region) -> aws_config::SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(SdkRegion::new(region.to_string()))
        .load()
        .await
}
