// ABOUTME: Diagnostics accumulator for non-fatal warnings during deployment.
// ABOUTME: Collects findings that should not fail a deployment but belong in the report.

/// Collects non-fatal warnings during a deployment run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

/// A non-fatal warning collected during deployment.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// An expected stack output was absent.
    pub fn missing_output(key: &str, stack: &str) -> Self {
        Self {
            kind: WarningKind::MissingOutput,
            message: format!("stack {stack} has no output named {key}"),
        }
    }

    /// The described stack was not in a settled state.
    pub fn stack_status(stack: &str, status: Option<&str>) -> Self {
        Self {
            kind: WarningKind::StackStatus,
            message: format!(
                "stack {stack} is in state {}",
                status.unwrap_or("UNKNOWN")
            ),
        }
    }
}

/// Categories of warnings that can occur during deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// An expected stack output key was not found; its value is reported as absent.
    MissingOutput,
    /// The stack was in progress, failed, or rolled back when queried.
    StackStatus,
}
