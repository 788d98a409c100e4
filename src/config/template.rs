// ABOUTME: Infrastructure template tool settings.
// ABOUTME: CLI binary, IAM capability acknowledgements, and extra parameter overrides.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::EnvValue;

/// Parameter override carrying the artifact bucket name.
pub const CODE_BUCKET_PARAMETER: &str = "CodeBucket";

/// Parameter override carrying the website bucket name.
pub const WEBSITE_BUCKET_PARAMETER: &str = "WebsiteBucketName";

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    #[serde(default = "default_cli")]
    pub cli: String,

    #[serde(default = "default_capabilities")]
    pub capabilities: Vec<String>,

    /// Overrides passed after the two bucket parameters, in key order.
    #[serde(default)]
    pub parameters: BTreeMap<String, EnvValue>,
}

fn default_cli() -> String {
    "sam".to_string()
}

fn default_capabilities() -> Vec<String> {
    vec![
        "CAPABILITY_IAM".to_string(),
        "CAPABILITY_NAMED_IAM".to_string(),
    ]
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            cli: default_cli(),
            capabilities: default_capabilities(),
            parameters: BTreeMap::new(),
        }
    }
}
