// ABOUTME: Summary of a successful deployment run.
// ABOUTME: Returned by the orchestrator and logged by the binary.

use chrono::{DateTime, Utc};

use crate::diagnostics::Warning;
use crate::stack::StackOutputs;

#[derive(Debug, Clone)]
pub struct DeployReport {
    pub stack_name: String,
    pub region: String,
    pub outputs: StackOutputs,
    pub uploaded_assets: Vec<String>,
    pub warnings: Vec<Warning>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl DeployReport {
    pub fn elapsed_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}
