use std::fmt;
use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::ToolError;

/// One invocation of an external text-producing tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Text piped into the tool's stdin
    pub stdin: Option<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl ToolOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }
}

/// Runs external tools to completion and collects their text output
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run the command and wait for it. Never times out.
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput, ToolError>;
}

/// Spawns real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput, ToolError> {
        let program = command.program.clone();
        let io_error = |source| ToolError::Io {
            program: program.clone(),
            source,
        };

        let stdin = if command.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };

        tracing::debug!("Spawning `{}`", command);
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the lookup on shutdown takes the child with it
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => ToolError::Missing {
                    program: command.program.clone(),
                    source,
                },
                _ => io_error(source),
            })?;

        if let (Some(input), Some(mut pipe)) = (&command.stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes()).await.map_err(io_error)?;
            // Dropping the pipe closes it so the tool sees EOF
        }

        let output = child.wait_with_output().await.map_err(io_error)?;
        tracing::debug!("`{}` finished with {}", command, output.status);

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        let command = ToolCommand::new("dict").arg("-d").arg("wn").arg("cat");
        assert_eq!(command.to_string(), "dict -d wn cat");
        assert!(command.stdin.is_none());
    }

    #[tokio::test]
    async fn test_missing_program_is_reported() {
        let command = ToolCommand::new("reo-definitely-not-installed-tool");
        let result = ProcessRunner.run(&command).await;
        assert!(matches!(result, Err(ToolError::Missing { .. })));
    }
}
