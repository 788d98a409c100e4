// ABOUTME: The individual deployment operations, usable on their own.
// ABOUTME: Each maps capability failures onto DeployError; the type-state transitions call these.

use nonempty::NonEmpty;
use std::path::Path;

use crate::command::{CommandLine, CommandOutput, CommandRunner};
use crate::config::{Config, WebsiteFile};
use crate::diagnostics::{Diagnostics, Warning};
use crate::stack::{StackOutputs, StackQuery};
use crate::storage::{ObjectStorage, StorageError, Upload};
use crate::types::{BucketName, Region, StackName};

use super::DeployError;
use super::commands::{layer_build_command, package_build_command, package_deploy_command};

/// What `ensure_storage_location` had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketProvision {
    AlreadyExisted,
    Created,
}

/// Run an external command to completion, failing on a non-zero exit.
pub async fn run_external_command<R: CommandRunner + ?Sized>(
    runner: &R,
    command: &CommandLine,
    workdir: Option<&Path>,
) -> Result<CommandOutput, DeployError> {
    tracing::info!("Running: {}", command);

    let output = runner
        .execute(command, workdir)
        .await
        .map_err(|e| DeployError::CommandFailed {
            command: command.to_string(),
            exit_code: None,
            detail: e.to_string(),
        })?;

    if !output.success {
        return Err(DeployError::CommandFailed {
            command: command.to_string(),
            exit_code: output.exit_code,
            detail: output
                .last_diagnostic_line()
                .unwrap_or("no output")
                .to_string(),
        });
    }

    Ok(output)
}

/// Make sure `bucket` exists, creating it in `region` when absent.
///
/// Calling this again once the bucket exists performs no creation.
pub async fn ensure_storage_location<S: ObjectStorage + ?Sized>(
    storage: &S,
    bucket: &BucketName,
    region: &Region,
) -> Result<BucketProvision, DeployError> {
    tracing::info!("Ensuring bucket exists: {}", bucket);

    let exists = storage
        .bucket_exists(bucket)
        .await
        .map_err(|e| DeployError::StorageProvisionFailed {
            bucket: bucket.to_string(),
            reason: e.to_string(),
        })?;

    if exists {
        tracing::info!("Bucket already exists: {}", bucket);
        return Ok(BucketProvision::AlreadyExisted);
    }

    tracing::info!("Bucket not found, creating: {} in {}", bucket, region);
    storage
        .create_bucket(bucket, region)
        .await
        .map_err(|e| DeployError::StorageProvisionFailed {
            bucket: bucket.to_string(),
            reason: e.to_string(),
        })?;

    tracing::info!("Bucket created: {}", bucket);
    Ok(BucketProvision::Created)
}

/// Run the external layer build script.
pub async fn build_dependency_layer<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &Config,
) -> Result<(), DeployError> {
    tracing::info!(
        "Building dependency layer via {}",
        config.layer_build_script().display()
    );
    let root = config.project_root();
    run_external_command(runner, &layer_build_command(config), Some(&root)).await?;
    Ok(())
}

/// Upload the layer archive to the artifact bucket.
///
/// The archive is checked locally before any request is made.
pub async fn upload_layer_artifact<S: ObjectStorage + ?Sized>(
    storage: &S,
    archive: &Path,
    bucket: &BucketName,
    key: &str,
) -> Result<(), DeployError> {
    tracing::info!("Uploading layer {} to {}/{}", archive.display(), bucket, key);

    if !archive.is_file() {
        tracing::error!("Layer archive not found: {}", archive.display());
        return Err(DeployError::ArtifactNotFound(archive.to_path_buf()));
    }

    storage
        .upload_file(&Upload {
            bucket,
            key,
            path: archive,
            content_type: None,
        })
        .await
        .map_err(|e| upload_failed(bucket, key, e))?;

    tracing::info!("Layer uploaded");
    Ok(())
}

/// Run the template tool's build action.
pub async fn build_infrastructure_package<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &Config,
) -> Result<(), DeployError> {
    let root = config.project_root();
    run_external_command(runner, &package_build_command(config), Some(&root)).await?;
    tracing::info!("Package build done");
    Ok(())
}

/// Run the template tool's deploy action.
pub async fn deploy_infrastructure<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &Config,
) -> Result<(), DeployError> {
    let command = package_deploy_command(config)?;
    let root = config.project_root();
    let output = run_external_command(runner, &command, Some(&root)).await?;

    if output.stdout.contains("No changes to deploy") {
        tracing::info!("Stack {} is already up to date", config.stack_name);
    }
    tracing::info!("Deploy done");
    Ok(())
}

/// Query the stack and extract its endpoint and website URL.
///
/// Missing output keys are recorded as warnings and reported as `None`; only a
/// missing stack is an error.
pub async fn fetch_stack_outputs<Q: StackQuery + ?Sized>(
    stacks: &Q,
    stack: &StackName,
    diag: &mut Diagnostics,
) -> Result<StackOutputs, DeployError> {
    tracing::info!("Getting stack outputs for {}", stack);

    let record = stacks
        .describe_stack(stack)
        .await
        .map_err(|e| DeployError::StackQueryFailed(e.to_string()))?
        .ok_or_else(|| DeployError::StackNotFound(stack.to_string()))?;

    if !record.is_settled() {
        diag.warn(Warning::stack_status(&record.name, record.status.as_deref()));
    }

    let outputs = StackOutputs::from_outputs(&record.outputs);
    for key in outputs.missing_keys() {
        diag.warn(Warning::missing_output(key, &record.name));
    }

    tracing::info!(
        "API endpoint: {}",
        outputs.details_endpoint.as_deref().unwrap_or("<none>")
    );
    tracing::info!(
        "Website URL: {}",
        outputs.website_url.as_deref().unwrap_or("<none>")
    );

    Ok(outputs)
}

/// Upload every manifest file from `dir` to `bucket` with its content type.
///
/// All files are checked before the first upload. Files uploaded before a
/// transfer failure stay in the bucket. Returns the uploaded keys in order.
pub async fn publish_website_assets<S: ObjectStorage + ?Sized>(
    storage: &S,
    bucket: &BucketName,
    dir: &Path,
    files: &NonEmpty<WebsiteFile>,
) -> Result<Vec<String>, DeployError> {
    tracing::info!("Uploading website files to {}", bucket);

    for file in files.iter() {
        let path = dir.join(&file.name);
        if !path.is_file() {
            tracing::error!("Website asset not found: {}", path.display());
            return Err(DeployError::AssetNotFound(path));
        }
    }

    let mut uploaded = Vec::with_capacity(files.len());
    for file in files.iter() {
        let path = dir.join(&file.name);
        storage
            .upload_file(&Upload {
                bucket,
                key: &file.name,
                path: &path,
                content_type: Some(&file.content_type),
            })
            .await
            .map_err(|e| upload_failed(bucket, &file.name, e))?;

        tracing::info!("Uploaded {} ({})", file.name, file.content_type);
        uploaded.push(file.name.clone());
    }

    tracing::info!("Website upload finished");
    Ok(uploaded)
}

fn upload_failed(bucket: &BucketName, key: &str, err: StorageError) -> DeployError {
    DeployError::UploadFailed {
        bucket: bucket.to_string(),
        key: key.to_string(),
        reason: err.to_string(),
    }
}
