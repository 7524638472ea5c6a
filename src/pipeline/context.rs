// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Per-run pipeline state
//!
//! Owned and mutated exclusively by the orchestrator; only one run exists at
//! a time, so the context is never shared.

use std::path::{Path, PathBuf};

/// State threaded through one pipeline run
#[derive(Debug)]
pub struct PipelineContext {
    source_archive: PathBuf,
    working_dir: PathBuf,
    located_bundle: Option<PathBuf>,
}

impl PipelineContext {
    pub fn new(source_archive: PathBuf, working_dir: PathBuf) -> Self {
        Self {
            source_archive,
            working_dir,
            located_bundle: None,
        }
    }

    /// The original input archive; immutable for the run's lifetime
    pub fn source_archive(&self) -> &Path {
        &self.source_archive
    }

    /// Extraction directory, scoped to this run
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Where the relocated bundle ends up: the archive's parent directory
    pub fn destination_dir(&self) -> &Path {
        self.source_archive.parent().unwrap_or(Path::new("."))
    }

    /// Record the located bundle path; set at most once per run
    pub fn set_located_bundle(&mut self, path: PathBuf) {
        debug_assert!(self.located_bundle.is_none(), "bundle located twice in one run");
        self.located_bundle = Some(path);
    }

    /// The bundle path, once the locator has succeeded
    pub fn located_bundle(&self) -> Option<&Path> {
        self.located_bundle.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_is_archive_parent() {
        let ctx = PipelineContext::new("/tmp/drop/App.ipa".into(), "/tmp/work".into());
        assert_eq!(ctx.destination_dir(), Path::new("/tmp/drop"));
    }

    #[test]
    fn test_located_bundle_starts_unset() {
        let mut ctx = PipelineContext::new("/tmp/App.ipa".into(), "/tmp/work".into());
        assert!(ctx.located_bundle().is_none());

        ctx.set_located_bundle("/tmp/work/Payload/App.app".into());
        assert_eq!(
            ctx.located_bundle().unwrap(),
            Path::new("/tmp/work/Payload/App.app")
        );
    }
}
