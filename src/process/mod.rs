// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Child-process execution
//!
//! Every external tool (unzip, the converter, codesign, simctl) is invoked
//! through the [`ProcessRunner`] trait so the pipeline can be exercised in
//! tests with a scripted implementation. The system implementation shells
//! out via tokio.

use async_trait::async_trait;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Result of one external process invocation
///
/// A process that could not be started at all is a different condition from
/// one that ran and exited non-zero; both are terminal for the calling stage
/// but are logged differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Process ran to termination with this exit code
    Completed { code: i32 },
    /// The operating environment refused or could not start the process
    LaunchFailed { reason: String },
}

impl StageOutcome {
    /// True only for a clean exit
    pub fn success(&self) -> bool {
        matches!(self, Self::Completed { code: 0 })
    }
}

impl fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed { code } => write!(f, "exit code {}", code),
            Self::LaunchFailed { reason } => write!(f, "failed to launch: {}", reason),
        }
    }
}

/// Trait for launching external tools
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Launch a process and wait for it to terminate
    ///
    /// Output is discarded; only the termination status is reported.
    async fn run(&self, program: &Path, args: &[&OsStr]) -> StageOutcome;

    /// Launch a process, wait for it, and capture its standard output as text
    async fn run_captured(&self, program: &Path, args: &[&OsStr]) -> (StageOutcome, String);
}

/// Runner backed by real child processes
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, program: &Path, args: &[&OsStr]) -> StageOutcome {
        tracing::debug!(program = %program.display(), ?args, "spawning child process");

        let mut cmd = Command::new(program);
        cmd.args(args).stdout(Stdio::null()).stderr(Stdio::null());

        match cmd.status().await {
            Ok(status) => StageOutcome::Completed {
                code: status.code().unwrap_or(-1),
            },
            Err(e) => StageOutcome::LaunchFailed {
                reason: e.to_string(),
            },
        }
    }

    async fn run_captured(&self, program: &Path, args: &[&OsStr]) -> (StageOutcome, String) {
        tracing::debug!(program = %program.display(), ?args, "spawning child process (captured)");

        let mut cmd = Command::new(program);
        cmd.args(args).stderr(Stdio::null());

        match cmd.output().await {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                let outcome = StageOutcome::Completed {
                    code: output.status.code().unwrap_or(-1),
                };
                (outcome, stdout)
            }
            Err(e) => (
                StageOutcome::LaunchFailed {
                    reason: e.to_string(),
                },
                String::new(),
            ),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sh_args<'a>(script: &'a str) -> [&'a OsStr; 2] {
        [OsStr::new("-c"), OsStr::new(script)]
    }

    #[tokio::test]
    async fn test_clean_exit_is_success() {
        let runner = SystemRunner;
        let outcome = runner.run(Path::new("/bin/sh"), &sh_args("exit 0")).await;
        assert!(outcome.success());
        assert_eq!(outcome, StageOutcome::Completed { code: 0 });
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_reported_with_code() {
        let runner = SystemRunner;
        let outcome = runner.run(Path::new("/bin/sh"), &sh_args("exit 3")).await;
        assert!(!outcome.success());
        assert_eq!(outcome, StageOutcome::Completed { code: 3 });
    }

    #[tokio::test]
    async fn test_missing_binary_is_launch_failure() {
        let runner = SystemRunner;
        let outcome = runner
            .run(Path::new("/nonexistent/tool-that-is-not-there"), &[])
            .await;
        assert!(matches!(outcome, StageOutcome::LaunchFailed { .. }));
    }

    #[tokio::test]
    async fn test_captured_stdout_round_trips() {
        let runner = SystemRunner;
        let (outcome, stdout) = runner
            .run_captured(Path::new("/bin/sh"), &sh_args("echo booted-marker"))
            .await;
        assert!(outcome.success());
        assert_eq!(stdout.trim(), "booted-marker");
    }
}
