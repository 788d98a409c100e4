// ABOUTME: AWS region identifier.
// ABOUTME: Accepts lowercase codes such as "ap-south-1" and "us-gov-west-1".

use std::fmt;
use thiserror::Error;

/// Region that S3 treats as the default location; it takes no location constraint.
pub const DEFAULT_S3_REGION: &str = "us-east-1";

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("region cannot be empty")]
    Empty,

    #[error("region must look like \"ap-south-1\", got \"{0}\"")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region(String);

impl Region {
    pub fn new(value: &str) -> Result<Self, RegionError> {
        if value.is_empty() {
            return Err(RegionError::Empty);
        }

        let parts: Vec<&str> = value.split('-').collect();
        let well_formed = parts.len() >= 3
            && parts.iter().all(|p| !p.is_empty())
            && parts[..parts.len() - 1]
                .iter()
                .all(|p| p.chars().all(|c| c.is_ascii_lowercase()))
            && parts[parts.len() - 1].chars().all(|c| c.is_ascii_digit());

        if !well_formed {
            return Err(RegionError::Malformed(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap a built-in default without re-validating it.
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_string())
    }

    /// Whether bucket creation in this region must omit the location constraint.
    pub fn is_default_s3_region(&self) -> bool {
        self.0 == DEFAULT_S3_REGION
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
