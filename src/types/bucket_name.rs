// ABOUTME: S3 bucket name validation.
// ABOUTME: Enforces the general-purpose bucket naming rules before any request is sent.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BucketNameError {
    #[error("bucket name cannot be empty")]
    Empty,

    #[error("bucket name must be between 3 and 63 characters, got {0}")]
    InvalidLength(usize),

    #[error("bucket name must start and end with a lowercase letter or digit")]
    InvalidBoundary,

    #[error("bucket name cannot contain consecutive dots")]
    ConsecutiveDots,

    #[error("invalid character in bucket name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    pub fn new(value: &str) -> Result<Self, BucketNameError> {
        if value.is_empty() {
            return Err(BucketNameError::Empty);
        }

        if !(3..=63).contains(&value.len()) {
            return Err(BucketNameError::InvalidLength(value.len()));
        }

        for c in value.chars() {
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' && c != '.' {
                return Err(BucketNameError::InvalidChar(c));
            }
        }

        let is_edge =
            |c: Option<char>| c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if !is_edge(value.chars().next()) || !is_edge(value.chars().last()) {
            return Err(BucketNameError::InvalidBoundary);
        }

        if value.contains("..") {
            return Err(BucketNameError::ConsecutiveDots);
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
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
