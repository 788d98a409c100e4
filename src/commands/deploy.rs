// ABOUTME: Deploy command implementation.
// ABOUTME: Builds the production capabilities and runs the orchestrator.

use stackdrop::aws::load_sdk_config;
use stackdrop::command::ProcessRunner;
use stackdrop::config::Config;
use stackdrop::deploy::Orchestrator;
use stackdrop::error::Result;
use stackdrop::stack::CloudFormationStacks;
use stackdrop::storage::S3Storage;

/// Run the full pipeline with real processes, S3 and CloudFormation.
pub async fn deploy(config: Config) -> Result<()> {
    let sdk_config = load_sdk_config(&config.region).await;

    let orchestrator = Orchestrator::new(
        config,
        ProcessRunner,
        S3Storage::from_conf(&sdk_config),
        CloudFormationStacks::from_conf(&sdk_config),
    );

    let report = orchestrator.run().await?;

    tracing::debug!(
        "Published {} website file(s) for stack {} in {}",
        report.uploaded_assets.len(),
        report.stack_name,
        report.region
    );

    Ok(())
}
