// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Framework signer
//!
//! Ad-hoc-signs every directory-form bundle under a bundle's `Frameworks`
//! directory. All signing processes are launched concurrently and joined
//! before the aggregate result is reported; individual failures never stop
//! the remaining tasks.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use walkdir::WalkDir;

use crate::process::ProcessRunner;

/// Sub-directory of a bundle holding embedded libraries
pub const FRAMEWORKS_DIR: &str = "Frameworks";

/// One directory queued for signing
#[derive(Debug, Clone)]
pub struct SigningJob {
    pub path: PathBuf,
}

/// Aggregate result of the signing fan-out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SigningReport {
    /// Number of signing processes launched
    pub jobs: usize,
    /// Number that failed to launch or exited non-zero
    pub failures: usize,
}

impl SigningReport {
    /// True when every enumerated bundle was signed cleanly
    pub fn all_signed(&self) -> bool {
        self.failures == 0
    }
}

/// Signs embedded framework bundles concurrently
pub struct FrameworkSigner {
    codesign: PathBuf,
    runner: Arc<dyn ProcessRunner>,
}

impl FrameworkSigner {
    pub fn new(codesign: PathBuf, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { codesign, runner }
    }

    /// Enumerate signable units under the bundle's `Frameworks` directory
    ///
    /// Every directory at any nesting depth is a signing job; regular files
    /// are never signed individually. A missing `Frameworks` directory yields
    /// an empty job list, which is not an error.
    pub fn collect_jobs(bundle: &Path) -> Vec<SigningJob> {
        let frameworks = bundle.join(FRAMEWORKS_DIR);
        if !frameworks.is_dir() {
            return Vec::new();
        }

        WalkDir::new(&frameworks)
            .min_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| SigningJob {
                path: entry.into_path(),
            })
            .collect()
    }

    /// Sign every enumerated framework bundle and wait for all of them
    ///
    /// One process per job, all launched up front; the join collects one
    /// terminal status per task, so the report reflects every job with none
    /// silently skipped.
    pub async fn sign_all(&self, bundle: &Path) -> SigningReport {
        let jobs = Self::collect_jobs(bundle);
        if jobs.is_empty() {
            return SigningReport::default();
        }

        let mut set = JoinSet::new();
        for job in &jobs {
            let runner = Arc::clone(&self.runner);
            let codesign = self.codesign.clone();
            let path = job.path.clone();

            set.spawn(async move {
                let args = [
                    OsStr::new("-f"),
                    OsStr::new("-s"),
                    OsStr::new("-"),
                    path.as_os_str(),
                ];
                let outcome = runner.run(&codesign, &args).await;
                (path, outcome)
            });
        }

        let mut failures = 0;
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((path, outcome)) => {
                    if !outcome.success() {
                        tracing::debug!(path = %path.display(), %outcome, "framework signing failed");
                        failures += 1;
                    }
                }
                // a panicked task still counts against the aggregate
                Err(_) => failures += 1,
            }
        }

        SigningReport {
            jobs: jobs.len(),
            failures,
        }
    }
}
