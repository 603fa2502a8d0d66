//! Running external programs.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use pkgforge_core::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandSpec},
    },
    error::ForgeResult,
};

/// Runs commands directly (no shell), capturing their output so a failure
/// can be reported with the tool's own message.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessCommandRunner;

impl ProcessCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessCommandRunner {
    #[instrument(skip_all, fields(command = %command))]
    fn run(&self, command: &CommandSpec, cwd: &Path) -> ForgeResult<()> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::ExternalTool {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            debug!("Command finished");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.lines().rev().find(|l| !l.trim().is_empty());
        Err(ApplicationError::ExternalTool {
            command: command.to_string(),
            reason: match detail {
                Some(line) => format!("{}: {}", output.status, line.trim()),
                None => output.status.to_string(),
            },
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_program_is_an_external_tool_error() {
        let dir = TempDir::new().unwrap();
        let err = ProcessCommandRunner::new()
            .run(&CommandSpec::new("pkgforge-no-such-tool-7f3a", ["--version"]), dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("pkgforge-no-such-tool-7f3a"));
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_decides_success() {
        let dir = TempDir::new().unwrap();
        let runner = ProcessCommandRunner::new();
        assert!(runner.run(&CommandSpec::new("sh", ["-c", "exit 0"]), dir.path()).is_ok());

        let err = runner
            .run(&CommandSpec::new("sh", ["-c", "echo boom >&2; exit 3"]), dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
