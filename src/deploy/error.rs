// ABOUTME: Error types for deployment steps.
// ABOUTME: DeployError is the failure taxonomy; PipelineError adds the step it happened in.

use snafu::Snafu;
use std::path::PathBuf;

use super::Step;

/// Failures a deployment step can raise. None are retried.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// External process exited non-zero or could not be started.
    #[error("command `{command}` {}: {detail}", describe_exit(.exit_code))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        detail: String,
    },

    /// Bucket creation was rejected.
    #[error("failed to provision bucket {bucket}: {reason}")]
    StorageProvisionFailed { bucket: String, reason: String },

    /// Layer archive missing locally.
    #[error("layer archive not found: {}", .0.display())]
    ArtifactNotFound(PathBuf),

    /// Website asset missing locally.
    #[error("website asset not found: {}", .0.display())]
    AssetNotFound(PathBuf),

    /// Transfer to object storage failed.
    #[error("failed to upload {key} to bucket {bucket}: {reason}")]
    UploadFailed {
        bucket: String,
        key: String,
        reason: String,
    },

    /// Stack query returned no matching stack.
    #[error("stack {0} not found")]
    StackNotFound(String),

    /// Stack query failed for a reason other than a missing stack.
    #[error("stack query failed: {0}")]
    StackQueryFailed(String),

    /// A parameter override could not be resolved.
    #[error("invalid parameter override: {0}")]
    InvalidParameter(String),
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exited with status {code}"),
        None => "did not run to completion".to_string(),
    }
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    CommandFailure,
    StorageProvisionFailure,
    ArtifactNotFound,
    AssetNotFound,
    UploadFailure,
    StackNotFound,
    StackQueryFailure,
    InvalidParameter,
}

impl DeployError {
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::CommandFailed { .. } => DeployErrorKind::CommandFailure,
            DeployError::StorageProvisionFailed { .. } => DeployErrorKind::StorageProvisionFailure,
            DeployError::ArtifactNotFound(_) => DeployErrorKind::ArtifactNotFound,
            DeployError::AssetNotFound(_) => DeployErrorKind::AssetNotFound,
            DeployError::UploadFailed { .. } => DeployErrorKind::UploadFailure,
            DeployError::StackNotFound(_) => DeployErrorKind::StackNotFound,
            DeployError::StackQueryFailed(_) => DeployErrorKind::StackQueryFailure,
            DeployError::InvalidParameter(_) => DeployErrorKind::InvalidParameter,
        }
    }
}

/// A deployment failure tagged with the step that raised it.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PipelineError {
    #[snafu(display("{step} failed: {source}"))]
    StepFailed { step: Step, source: DeployError },
}

impl PipelineError {
    /// The step the run stopped at.
    pub fn step(&self) -> Step {
        match self {
            PipelineError::StepFailed { step, .. } => *step,
        }
    }

    pub fn deploy_error(&self) -> &DeployError {
        match self {
            PipelineError::StepFailed { source, .. } => source,
        }
    }

    pub fn kind(&self) -> DeployErrorKind {
        self.deploy_error().kind()
    }
}
