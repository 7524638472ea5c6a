// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Pipeline orchestrator
//!
//! Composes the six stages in fixed order as sequential async steps. Every
//! stage except framework signing halts the run on failure; nothing produced
//! by earlier stages is unwound when a later one fails.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{PipelineContext, StageKind};
use crate::bundle::{locate_app, FrameworkSigner, SigningReport};
use crate::config::Config;
use crate::errors::SimdeployError;
use crate::events::EventSender;
use crate::process::{ProcessRunner, StageOutcome, SystemRunner};
use crate::simulator::{InstallOutcome, SimulatorInstaller};

/// Summary of one completed (non-halted) run
#[derive(Debug)]
pub struct DeployReport {
    /// Final location of the signed bundle
    pub bundle: PathBuf,
    /// Aggregate framework signing result
    pub signing: SigningReport,
    /// Install stage result; `None` when installation was skipped
    pub install: Option<InstallOutcome>,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

/// The deployment pipeline
pub struct DeployPipeline {
    config: Config,
    runner: Arc<dyn ProcessRunner>,
    events: EventSender,
    install: bool,
}

impl DeployPipeline {
    pub fn new(config: Config, events: EventSender) -> Self {
        Self {
            config,
            runner: Arc::new(SystemRunner),
            events,
            install: true,
        }
    }

    /// Substitute the process runner (test seam)
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Stop after relocation instead of installing
    pub fn skip_install(mut self) -> Self {
        self.install = false;
        self
    }

    /// Run the pipeline against one archive
    ///
    /// A returned error means the run halted at the named stage; the event
    /// log already carries the diagnostic. Intermediate state from earlier
    /// stages is left in place.
    pub async fn run(&self, archive: &Path) -> Result<DeployReport, SimdeployError> {
        let start = Instant::now();
        let mut ctx =
            PipelineContext::new(archive.to_path_buf(), self.config.working_dir.clone());

        self.extract(&ctx).await?;
        let bundle = self.locate_and_convert(&mut ctx).await?;
        self.sign_bundle(&bundle).await?;
        let signing = self.sign_frameworks(&bundle).await;
        let relocated = self.relocate(&ctx, &bundle)?;

        let install = if self.install {
            let installer =
                SimulatorInstaller::new(self.config.tools.xcrun.clone(), Arc::clone(&self.runner));
            Some(installer.install(&relocated, &self.events).await)
        } else {
            self.events.emit("install skipped");
            None
        };

        Ok(DeployReport {
            bundle: relocated,
            signing,
            install,
            duration: start.elapsed(),
        })
    }

    async fn extract(&self, ctx: &PipelineContext) -> Result<(), SimdeployError> {
        // any leftovers from a previous run would alias this run's state
        if ctx.working_dir().exists() {
            std::fs::remove_dir_all(ctx.working_dir())?;
        }

        self.events.emit(format!(
            "extracting {}",
            display_name(ctx.source_archive())
        ));

        let args = [
            ctx.source_archive().as_os_str(),
            OsStr::new("-d"),
            ctx.working_dir().as_os_str(),
        ];
        let outcome = self.runner.run(&self.config.tools.unzip, &args).await;
        self.check(StageKind::Extract, outcome)?;

        self.events
            .emit("archive extracted, locating app bundle in Payload");
        Ok(())
    }

    async fn locate_and_convert(
        &self,
        ctx: &mut PipelineContext,
    ) -> Result<PathBuf, SimdeployError> {
        let bundle = match locate_app(ctx.working_dir()) {
            Ok(bundle) => bundle,
            Err(e) => {
                self.events.emit(e.to_string());
                return Err(e);
            }
        };
        ctx.set_located_bundle(bundle.clone());
        self.events
            .emit(format!("located bundle {}", display_name(&bundle)));

        // the converter lives at one fixed location; no PATH search
        let converter = &self.config.tools.converter;
        if !converter.exists() {
            self.events
                .emit(format!("converter not found at {}", converter.display()));
            return Err(SimdeployError::ConverterMissing {
                path: converter.clone(),
            });
        }

        let args = [OsStr::new("convert"), bundle.as_os_str()];
        let outcome = self.runner.run(converter, &args).await;
        self.check(StageKind::Convert, outcome)?;

        self.events.emit("conversion finished, signing app bundle");
        Ok(bundle)
    }

    async fn sign_bundle(&self, bundle: &Path) -> Result<(), SimdeployError> {
        // not --deep: frameworks are signed individually in the next stage,
        // after the main bundle is finalized
        let args = [
            OsStr::new("-f"),
            OsStr::new("-s"),
            OsStr::new("-"),
            bundle.as_os_str(),
        ];
        let outcome = self.runner.run(&self.config.tools.codesign, &args).await;
        self.check(StageKind::SignBundle, outcome)?;

        self.events.emit("app bundle signed");
        Ok(())
    }

    /// Never halts the pipeline; an aggregate failure is logged and carried
    /// in the report
    async fn sign_frameworks(&self, bundle: &Path) -> SigningReport {
        let signer =
            FrameworkSigner::new(self.config.tools.codesign.clone(), Arc::clone(&self.runner));
        let report = signer.sign_all(bundle).await;

        if report.jobs == 0 {
            self.events.emit("no embedded frameworks to sign");
        } else if report.all_signed() {
            self.events
                .emit(format!("signed {} embedded framework bundles", report.jobs));
        } else {
            self.events.emit(format!(
                "{} of {} framework signatures failed, continuing",
                report.failures, report.jobs
            ));
        }

        report
    }

    fn relocate(
        &self,
        ctx: &PipelineContext,
        bundle: &Path,
    ) -> Result<PathBuf, SimdeployError> {
        let name = bundle.file_name().ok_or_else(|| SimdeployError::Io {
            message: format!("bundle path has no file name: {}", bundle.display()),
        })?;
        let dest = ctx.destination_dir().join(name);

        // overwrite, not merge
        if dest.exists() {
            let removal = if dest.is_dir() {
                std::fs::remove_dir_all(&dest)
            } else {
                std::fs::remove_file(&dest)
            };
            removal.map_err(|e| self.relocate_failed(&dest, e))?;
        }

        std::fs::rename(bundle, &dest)
            .map_err(|e| self.relocate_failed(&dest, e))?;
        self.events
            .emit(format!("moved signed app to {}", dest.display()));

        // cleanup happens regardless of what the install stage does later
        let _ = std::fs::remove_dir_all(ctx.working_dir());

        Ok(dest)
    }

    fn relocate_failed(&self, dest: &Path, e: std::io::Error) -> SimdeployError {
        self.events.emit(format!(
            "failed to move bundle to {}: {}",
            dest.display(),
            e
        ));
        SimdeployError::RelocateFailed {
            dest: dest.to_path_buf(),
            error: e.to_string(),
        }
    }

    /// Map a stage outcome to the halt decision, emitting one diagnostic
    fn check(&self, stage: StageKind, outcome: StageOutcome) -> Result<(), SimdeployError> {
        match outcome {
            StageOutcome::Completed { code: 0 } => Ok(()),
            StageOutcome::Completed { code } => {
                self.events
                    .emit(format!("stage '{}' failed with exit code {}", stage, code));
                Err(SimdeployError::StageFailed { stage, code })
            }
            StageOutcome::LaunchFailed { reason } => {
                self.events.emit(format!(
                    "stage '{}' could not launch its process: {}",
                    stage, reason
                ));
                Err(SimdeployError::StageLaunchFailed { stage, reason })
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
