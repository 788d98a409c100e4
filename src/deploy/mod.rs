// ABOUTME: Deployment orchestration using the type state pattern.
// ABOUTME: Exports the step operations, state markers, and the Orchestrator that chains them.

mod commands;
mod deployment;
mod error;
mod operations;
mod orchestrator;
mod report;
mod state;
mod step;
mod transitions;

pub use commands::{layer_build_command, package_build_command, package_deploy_command};
pub use deployment::Deployment;
pub use error::{DeployError, DeployErrorKind, PipelineError};
pub use operations::{
    BucketProvision, build_dependency_layer, build_infrastructure_package, deploy_infrastructure,
    ensure_storage_location, fetch_stack_outputs, publish_website_assets, run_external_command,
    upload_layer_artifact,
};
pub use orchestrator::Orchestrator;
pub use report::DeployReport;
pub use state::{
    ArtifactBucketReady, Initialized, LayerBuilt, LayerUploaded, OutputsFetched, PackageBuilt,
    StackDeployed, WebsitePublished,
};
pub use step::Step;
pub use transitions::TransitionResult;
