// ABOUTME: Deployment state marker types for the type state pattern.
// ABOUTME: Each state names the last completed step; later states carry what earlier steps produced.

use crate::stack::StackOutputs;

/// Nothing has run yet.
/// Available actions: `build_dependency_layer()`
///
/// Later steps are not reachable from here:
///
/// ```compile_fail
/// use stackdrop::command::ProcessRunner;
/// use stackdrop::config::Config;
/// use stackdrop::deploy::{Deployment, Initialized};
///
/// async fn skip_ahead() {
///     let deployment: Deployment<Initialized> = Deployment::new(Config::default());
///     deployment.deploy_infrastructure(&ProcessRunner).await;
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Layer archive built.
/// Available actions: `ensure_artifact_bucket()`
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerBuilt;

/// Artifact bucket exists.
/// Available actions: `upload_layer_artifact()`
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactBucketReady;

/// Layer archive uploaded.
/// Available actions: `build_infrastructure_package()`
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerUploaded;

/// Template built.
/// Available actions: `deploy_infrastructure()`
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageBuilt;

/// Stack deployed (or already up to date).
/// Available actions: `fetch_stack_outputs()`
#[derive(Debug, Clone, Copy, Default)]
pub struct StackDeployed;

/// Stack outputs retrieved.
/// Available actions: `publish_website_assets()`
#[derive(Debug, Clone)]
pub struct OutputsFetched {
    pub(crate) outputs: StackOutputs,
}

impl OutputsFetched {
    pub fn outputs(&self) -> &StackOutputs {
        &self.outputs
    }
}

/// Website assets uploaded.
/// Available actions: `finish()`
///
/// A finished deployment cannot be deployed again:
///
/// ```compile_fail
/// use stackdrop::command::ProcessRunner;
/// use stackdrop::deploy::{Deployment, WebsitePublished};
///
/// async fn redeploy(deployment: Deployment<WebsitePublished>) {
///     deployment.deploy_infrastructure(&ProcessRunner).await;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct WebsitePublished {
    pub(crate) outputs: StackOutputs,
    pub(crate) uploaded: Vec<String>,
}

impl WebsitePublished {
    pub fn outputs(&self) -> &StackOutputs {
        &self.outputs
    }

    pub fn uploaded(&self) -> &[String] {
        &self.uploaded
    }
}
