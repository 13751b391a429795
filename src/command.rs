//! External command execution.
//!
//! The station shells out twice: once to apply the hostname live and once to
//! install packages. Both go through [`CommandRunner`] so the pipeline can be
//! exercised without touching the host.
//!
//! Commands run in their own process group with stdout/stderr captured. A
//! non-zero exit is an error carrying the command's stderr.

use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use tracing::{debug, error, info};

use crate::error::{DsError, Result};

/// Output from a command that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs a program to completion.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Spawns real processes on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

/// Extension trait to spawn commands in a new process group
pub trait CommandProcessGroup {
    /// Keep terminal signals aimed at us from reaching the child directly.
    fn in_new_process_group(&mut self) -> &mut Self;
}

impl CommandProcessGroup for Command {
    fn in_new_process_group(&mut self) -> &mut Self {
        self.process_group(0)
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        info!(program, ?args, "Running command");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .in_new_process_group()
            .output()
            .map_err(|e| {
                error!(program, error = %e, "Failed to spawn command");
                DsError::Spawn {
                    program: program.to_string(),
                    source: e,
                }
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            debug!(program, "Command exited successfully");
            return Ok(CommandOutput { stdout, stderr });
        }

        // None means the child was killed by a signal
        let code = output.status.code().unwrap_or(-1);
        error!(program, code, stderr = stderr.trim(), "Command failed");
        Err(DsError::Command {
            program: program.to_string(),
            code,
            stderr: stderr.trim().to_string(),
        })
    }
}
