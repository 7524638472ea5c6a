// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Simulator installer
//!
//! Queries the simulator subsystem for a booted device and, if one exists,
//! installs the relocated bundle into it. Detection is a substring match on
//! the status command's output, not a structured parse; this mirrors how the
//! tool's output is conventionally scanned and is fragile against output
//! format changes.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::events::EventSender;
use crate::process::{ProcessRunner, StageOutcome};

/// Marker substring identifying a running device in the status output
pub const BOOTED_MARKER: &str = "Booted";

/// Terminal result of the install stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// No simulator was running; a valid end state, not an error
    NotBooted,
    /// The bundle was installed into the booted simulator
    Installed,
    /// The status query or the install invocation failed
    Failed(StageOutcome),
}

/// Installs a bundle into a currently booted simulator
pub struct SimulatorInstaller {
    xcrun: PathBuf,
    runner: Arc<dyn ProcessRunner>,
}

impl SimulatorInstaller {
    pub fn new(xcrun: PathBuf, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { xcrun, runner }
    }

    /// Install `bundle` into the booted simulator, if any
    pub async fn install(&self, bundle: &Path, events: &EventSender) -> InstallOutcome {
        let query = [
            OsStr::new("simctl"),
            OsStr::new("list"),
            OsStr::new("devices"),
            OsStr::new("booted"),
        ];
        let (outcome, output) = self.runner.run_captured(&self.xcrun, &query).await;

        if let StageOutcome::LaunchFailed { ref reason } = outcome {
            events.emit(format!("could not query simulator state: {}", reason));
            return InstallOutcome::Failed(outcome);
        }

        if !output.contains(BOOTED_MARKER) {
            events.emit("simulator not booted, nothing to install");
            return InstallOutcome::NotBooted;
        }

        let install = [
            OsStr::new("simctl"),
            OsStr::new("install"),
            OsStr::new("booted"),
            bundle.as_os_str(),
        ];
        let outcome = self.runner.run(&self.xcrun, &install).await;

        if outcome.success() {
            events.emit("installed app on the booted simulator");
            InstallOutcome::Installed
        } else {
            events.emit(format!("simulator install failed ({})", outcome));
            InstallOutcome::Failed(outcome)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events;
    use crate::process::testing::ScriptedRunner;

    fn installer(runner: Arc<ScriptedRunner>) -> SimulatorInstaller {
        SimulatorInstaller::new("/usr/bin/xcrun".into(), runner)
    }

    #[tokio::test]
    async fn test_not_booted_skips_install() {
        let runner = Arc::new(
            ScriptedRunner::ok().with_captured_output("== Devices ==\n-- iOS 17.2 --\n"),
        );
        let (events, mut rx) = events::channel();

        let outcome = installer(runner.clone())
            .install(Path::new("/tmp/App.app"), &events)
            .await;

        assert_eq!(outcome, InstallOutcome::NotBooted);
        // only the status query ran
        assert_eq!(runner.call_count(), 1);
        drop(events);
        let last = events::drain(&mut rx).pop().unwrap();
        assert!(last.message.contains("not booted"));
    }

    #[tokio::test]
    async fn test_booted_marker_triggers_install() {
        let runner = Arc::new(
            ScriptedRunner::ok()
                .with_captured_output("iPhone 15 (ABC-123) (Booted)\n"),
        );
        let (events, _rx) = events::channel();

        let outcome = installer(runner.clone())
            .install(Path::new("/tmp/App.app"), &events)
            .await;

        assert_eq!(outcome, InstallOutcome::Installed);
        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].1[0], "simctl");
        assert_eq!(calls[1].1[1], "install");
        assert_eq!(calls[1].1[2], "booted");
        assert_eq!(calls[1].1[3], "/tmp/App.app");
    }

    #[tokio::test]
    async fn test_install_exit_failure_is_reported() {
        let runner = Arc::new(
            ScriptedRunner::failing_on("App.app").with_captured_output("(Booted)"),
        );
        let (events, _rx) = events::channel();

        let outcome = installer(runner)
            .install(Path::new("/tmp/App.app"), &events)
            .await;

        assert_eq!(
            outcome,
            InstallOutcome::Failed(StageOutcome::Completed { code: 1 })
        );
    }

    #[tokio::test]
    async fn test_query_launch_failure_is_reported() {
        let runner = Arc::new(ScriptedRunner::refusing_launch_on("simctl"));
        let (events, _rx) = events::channel();

        let outcome = installer(runner)
            .install(Path::new("/tmp/App.app"), &events)
            .await;

        assert!(matches!(outcome, InstallOutcome::Failed(_)));
    }
}
