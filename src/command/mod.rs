// ABOUTME: External command execution for the layer build script and the SAM CLI.
// ABOUTME: Defines the CommandRunner capability and its tokio::process implementation.

use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// A program and its arguments. Executed directly, without an intermediate shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg.replace('\'', "'\\''"))?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Result of running an external command to completion.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Last non-empty line of stderr, falling back to stdout.
    pub fn last_diagnostic_line(&self) -> Option<&str> {
        [&self.stderr, &self.stdout]
            .into_iter()
            .find_map(|stream| stream.lines().rev().find(|l| !l.trim().is_empty()))
            .map(str::trim)
    }
}

/// Errors raised before a command produced an exit status.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs external commands synchronously to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute `command`, optionally inside `workdir`, and capture its output.
    ///
    /// A non-zero exit is reported through `CommandOutput::success`, not as an error.
    async fn execute(
        &self,
        command: &CommandLine,
        workdir: Option<&Path>,
    ) -> Result<CommandOutput, CommandError>;
}

/// Spawns real child processes with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn execute(
        &self,
        command: &CommandLine,
        workdir: Option<&Path>,
    ) -> Result<CommandOutput, CommandError> {
        let mut process = Command::new(command.program());
        process
            .args(command.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = workdir {
            process.current_dir(dir);
        }

        let output = process.output().await.map_err(|source| CommandError::Spawn {
            command: command.to_string(),
            source,
        })?;

        let result = CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        for line in result.stdout.lines() {
            tracing::debug!(target: "stackdrop::command", "{line}");
        }
        for line in result.stderr.lines() {
            tracing::debug!(target: "stackdrop::command", "stderr: {line}");
        }

        Ok(result)
    }
}
