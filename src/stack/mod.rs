// ABOUTME: Stack state queries and output extraction.
// ABOUTME: Defines the StackQuery capability and the two outputs the deployment reports.

mod cloudformation;

pub use cloudformation::CloudFormationStacks;

use async_trait::async_trait;
use serde::Serialize;

use crate::types::StackName;

/// Output key holding the API endpoint.
pub const DETAILS_ENDPOINT_KEY: &str = "DetailsEndpoint";

/// Output key holding the static website URL.
pub const WEBSITE_URL_KEY: &str = "WebsiteURL";

/// One key/value output exposed by a deployed stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOutput {
    pub key: String,
    pub value: String,
}

impl StackOutput {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A described stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackRecord {
    pub name: String,
    pub status: Option<String>,
    pub outputs: Vec<StackOutput>,
}

impl StackRecord {
    /// Whether the stack sits in a settled, non-rollback state.
    pub fn is_settled(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.ends_with("_COMPLETE") && !s.contains("ROLLBACK"))
    }
}

/// The outputs a deployment reports. Keys missing from the stack stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StackOutputs {
    #[serde(rename = "DetailsEndpoint")]
    pub details_endpoint: Option<String>,
    #[serde(rename = "WebsiteURL")]
    pub website_url: Option<String>,
}

impl StackOutputs {
    /// Scan an output list for the two known keys. Later duplicates win.
    pub fn from_outputs(outputs: &[StackOutput]) -> Self {
        let mut extracted = Self::default();
        for output in outputs {
            match output.key.as_str() {
                DETAILS_ENDPOINT_KEY => extracted.details_endpoint = Some(output.value.clone()),
                WEBSITE_URL_KEY => extracted.website_url = Some(output.value.clone()),
                _ => {}
            }
        }
        extracted
    }

    /// Keys that were expected but not present.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.details_endpoint.is_none() {
            missing.push(DETAILS_ENDPOINT_KEY);
        }
        if self.website_url.is_none() {
            missing.push(WEBSITE_URL_KEY);
        }
        missing
    }
}

/// Read access to deployed stack state.
#[async_trait]
pub trait StackQuery: Send + Sync {
    /// Describe a stack by name. `Ok(None)` when no such stack exists.
    async fn describe_stack(&self, name: &StackName)
    -> Result<Option<StackRecord>, StackQueryError>;
}

/// Errors from stack queries other than a missing stack.
#[derive(Debug, thiserror::Error)]
pub enum StackQueryError {
    #[error("describe stack {stack} failed: {message}")]
    Request { stack: String, message: String },
}
