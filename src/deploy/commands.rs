// ABOUTME: Command lines for the layer build script and the SAM CLI.
// ABOUTME: Built purely from configuration so they can be inspected without running anything.

use crate::command::CommandLine;
use crate::config::Config;

use super::DeployError;

/// `bash <root>/<build_script>`
pub fn layer_build_command(config: &Config) -> CommandLine {
    CommandLine::new("bash").arg(config.layer_build_script().display().to_string())
}

/// `sam build`
pub fn package_build_command(config: &Config) -> CommandLine {
    CommandLine::new(config.template.cli.as_str()).arg("build")
}

/// `sam deploy` with stack identity, capabilities, artifact bucket and parameter overrides.
///
/// The change set is applied without confirmation, and an empty change set is not an error.
pub fn package_deploy_command(config: &Config) -> Result<CommandLine, DeployError> {
    let overrides = config
        .parameter_overrides()
        .map_err(|e| DeployError::InvalidParameter(e.to_string()))?;

    Ok(CommandLine::new(config.template.cli.as_str())
        .arg("deploy")
        .args(["--stack-name", config.stack_name.as_str()])
        .args(["--region", config.region.as_str()])
        .arg("--capabilities")
        .args(config.template.capabilities.iter().map(String::as_str))
        .args(["--s3-bucket", config.artifact_bucket.as_str()])
        .arg("--parameter-overrides")
        .args(overrides.iter().map(|(k, v)| format!("{k}={v}")))
        .arg("--no-confirm-changeset")
        .arg("--no-fail-on-empty-changeset"))
}
