// ABOUTME: Application-wide error types for stackdrop.
// ABOUTME: Uses thiserror; pipeline failures keep the step they originated from.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::PipelineError;
use crate::stack::StackQueryError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("stack not found: {0}")]
    StackNotFound(String),

    #[error(transparent)]
    StackQuery(#[from] StackQueryError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
