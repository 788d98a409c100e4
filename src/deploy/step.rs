// ABOUTME: The eight named steps of a deployment run, in execution order.
// ABOUTME: Used for progress logging and to record where a failed run stopped.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    BuildLayer,
    EnsureArtifactBucket,
    UploadLayer,
    BuildPackage,
    DeployStack,
    FetchOutputs,
    PublishWebsite,
    Report,
}

impl Step {
    pub const ALL: [Step; 8] = [
        Step::BuildLayer,
        Step::EnsureArtifactBucket,
        Step::UploadLayer,
        Step::BuildPackage,
        Step::DeployStack,
        Step::FetchOutputs,
        Step::PublishWebsite,
        Step::Report,
    ];

    /// 1-based position in the run.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn description(self) -> &'static str {
        match self {
            Step::BuildLayer => "build dependency layer",
            Step::EnsureArtifactBucket => "ensure artifact bucket",
            Step::UploadLayer => "upload layer archive",
            Step::BuildPackage => "build infrastructure package",
            Step::DeployStack => "deploy infrastructure",
            Step::FetchOutputs => "fetch stack outputs",
            Step::PublishWebsite => "publish website assets",
            Step::Report => "report",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {}/{} ({})",
            self.number(),
            Step::ALL.len(),
            self.description()
        )
    }
}
