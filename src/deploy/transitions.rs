// ABOUTME: State transition methods for deployment orchestration.
// ABOUTME: Each method runs one step, consumes self, and returns the next state on success.

use chrono::Utc;
use snafu::ResultExt;

use crate::command::CommandRunner;
use crate::stack::StackQuery;
use crate::storage::ObjectStorage;

use super::error::{PipelineError, StepFailedSnafu};
use super::operations;
use super::report::DeployReport;
use super::state::{
    ArtifactBucketReady, Initialized, LayerBuilt, LayerUploaded, OutputsFetched, PackageBuilt,
    StackDeployed, WebsitePublished,
};
use super::{Deployment, Step};

/// Result of a single step: the next state, or the failure tagged with its step.
pub type TransitionResult<T> = Result<Deployment<T>, PipelineError>;

// =============================================================================
// Internal Helpers
// =============================================================================

impl<S> Deployment<S> {
    /// Internal helper to move into the next state.
    fn transition<T>(self, state: T) -> Deployment<T> {
        Deployment {
            config: self.config,
            diagnostics: self.diagnostics,
            started_at: self.started_at,
            state,
        }
    }
}

fn begin(step: Step) {
    tracing::info!("==> {}", step);
}

// =============================================================================
// Initialized -> LayerBuilt -> ArtifactBucketReady -> LayerUploaded
// =============================================================================

impl Deployment<Initialized> {
    /// Build the dependency layer archive with the external build script.
    ///
    /// # Errors
    ///
    /// `CommandFailed` if the script exits non-zero.
    #[must_use = "deployment state must be used"]
    pub async fn build_dependency_layer<R: CommandRunner + ?Sized>(
        self,
        runner: &R,
    ) -> TransitionResult<LayerBuilt> {
        let step = Step::BuildLayer;
        begin(step);
        operations::build_dependency_layer(runner, &self.config)
            .await
            .context(StepFailedSnafu { step })?;
        Ok(self.transition(LayerBuilt))
    }
}

impl Deployment<LayerBuilt> {
    /// Create the artifact bucket unless it already exists.
    ///
    /// # Errors
    ///
    /// `StorageProvisionFailed` if creation is rejected.
    #[must_use = "deployment state must be used"]
    pub async fn ensure_artifact_bucket<S: ObjectStorage + ?Sized>(
        self,
        storage: &S,
    ) -> TransitionResult<ArtifactBucketReady> {
        let step = Step::EnsureArtifactBucket;
        begin(step);
        operations::ensure_storage_location(
            storage,
            &self.config.artifact_bucket,
            &self.config.region,
        )
        .await
        .context(StepFailedSnafu { step })?;
        Ok(self.transition(ArtifactBucketReady))
    }
}

impl Deployment<ArtifactBucketReady> {
    /// Upload the layer archive to the artifact bucket.
    ///
    /// # Errors
    ///
    /// `ArtifactNotFound` before any request if the archive is missing;
    /// `UploadFailed` on transfer errors.
    #[must_use = "deployment state must be used"]
    pub async fn upload_layer_artifact<S: ObjectStorage + ?Sized>(
        self,
        storage: &S,
    ) -> TransitionResult<LayerUploaded> {
        let step = Step::UploadLayer;
        begin(step);
        operations::upload_layer_artifact(
            storage,
            &self.config.layer_archive(),
            &self.config.artifact_bucket,
            &self.config.layer.object_key,
        )
        .await
        .context(StepFailedSnafu { step })?;
        Ok(self.transition(LayerUploaded))
    }
}

// =============================================================================
// LayerUploaded -> PackageBuilt -> StackDeployed
// =============================================================================

impl Deployment<LayerUploaded> {
    #[must_use = "deployment state must be used"]
    pub async fn build_infrastructure_package<R: CommandRunner + ?Sized>(
        self,
        runner: &R,
    ) -> TransitionResult<PackageBuilt> {
        let step = Step::BuildPackage;
        begin(step);
        operations::build_infrastructure_package(runner, &self.config)
            .await
            .context(StepFailedSnafu { step })?;
        Ok(self.transition(PackageBuilt))
    }
}

impl Deployment<PackageBuilt> {
    /// Deploy the stack. An empty change set counts as success.
    #[must_use = "deployment state must be used"]
    pub async fn deploy_infrastructure<R: CommandRunner + ?Sized>(
        self,
        runner: &R,
    ) -> TransitionResult<StackDeployed> {
        let step = Step::DeployStack;
        begin(step);
        operations::deploy_infrastructure(runner, &self.config)
            .await
            .context(StepFailedSnafu { step })?;
        Ok(self.transition(StackDeployed))
    }
}

// =============================================================================
// StackDeployed -> OutputsFetched -> WebsitePublished
// =============================================================================

impl Deployment<StackDeployed> {
    /// Read the stack outputs. Missing keys become warnings, not failures.
    ///
    /// # Errors
    ///
    /// `StackNotFound` if the stack does not exist.
    #[must_use = "deployment state must be used"]
    pub async fn fetch_stack_outputs<Q: StackQuery + ?Sized>(
        mut self,
        stacks: &Q,
    ) -> TransitionResult<OutputsFetched> {
        let step = Step::FetchOutputs;
        begin(step);
        let outputs =
            operations::fetch_stack_outputs(stacks, &self.config.stack_name, &mut self.diagnostics)
                .await
                .context(StepFailedSnafu { step })?;
        Ok(self.transition(OutputsFetched { outputs }))
    }
}

impl Deployment<OutputsFetched> {
    /// Upload the website manifest to the website bucket.
    ///
    /// # Errors
    ///
    /// `AssetNotFound` before any upload if a manifest file is missing;
    /// `UploadFailed` on transfer errors, leaving earlier files in place.
    #[must_use = "deployment state must be used"]
    pub async fn publish_website_assets<S: ObjectStorage + ?Sized>(
        self,
        storage: &S,
    ) -> TransitionResult<WebsitePublished> {
        let step = Step::PublishWebsite;
        begin(step);
        let uploaded = operations::publish_website_assets(
            storage,
            &self.config.website_bucket,
            &self.config.website_dir(),
            &self.config.website.files,
        )
        .await
        .context(StepFailedSnafu { step })?;

        let outputs = self.state.outputs.clone();
        Ok(self.transition(WebsitePublished { outputs, uploaded }))
    }
}

// =============================================================================
// WebsitePublished - terminal
// =============================================================================

impl Deployment<WebsitePublished> {
    /// Finish the run and produce its report.
    pub fn finish(self) -> DeployReport {
        begin(Step::Report);
        let report = DeployReport {
            stack_name: self.config.stack_name.to_string(),
            region: self.config.region.to_string(),
            outputs: self.state.outputs,
            uploaded_assets: self.state.uploaded,
            warnings: self.diagnostics.into_warnings(),
            started_at: self.started_at,
            finished_at: Utc::now(),
        };

        if !report.warnings.is_empty() {
            tracing::warn!(
                "Deployment finished with {} warning(s)",
                report.warnings.len()
            );
        }
        tracing::info!("Deployment finished OK ({:.1}s)", report.elapsed_secs());
        report
    }
}
