// ABOUTME: Runs the full deployment sequence against injected capabilities.
// ABOUTME: Stops at the first failing step; earlier side effects are left in place.

use crate::command::CommandRunner;
use crate::config::Config;
use crate::stack::StackQuery;
use crate::storage::ObjectStorage;

use super::error::PipelineError;
use super::report::DeployReport;
use super::Deployment;

/// Owns the configuration and the three capabilities a run needs.
pub struct Orchestrator<R, S, Q> {
    config: Config,
    runner: R,
    storage: S,
    stacks: Q,
}

impl<R, S, Q> Orchestrator<R, S, Q>
where
    R: CommandRunner,
    S: ObjectStorage,
    Q: StackQuery,
{
    pub fn new(config: Config, runner: R, storage: S, stacks: Q) -> Self {
        Self {
            config,
            runner,
            storage,
            stacks,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run all eight steps in order.
    pub async fn run(&self) -> Result<DeployReport, PipelineError> {
        tracing::info!(
            "Starting deployment of stack {} in {} from {}",
            self.config.stack_name,
            self.config.region,
            self.config.project_root().display()
        );

        let report = Deployment::new(self.config.clone())
            .build_dependency_layer(&self.runner)
            .await?
            .ensure_artifact_bucket(&self.storage)
            .await?
            .upload_layer_artifact(&self.storage)
            .await?
            .build_infrastructure_package(&self.runner)
            .await?
            .deploy_infrastructure(&self.runner)
            .await?
            .fetch_stack_outputs(&self.stacks)
            .await?
            .publish_website_assets(&self.storage)
            .await?
            .finish();

        Ok(report)
    }
}
