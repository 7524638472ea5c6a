// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Deployment pipeline
//!
//! The fixed six-stage sequence that turns an archive into an app installed
//! on a booted simulator: extract, locate+convert, sign the main bundle,
//! sign embedded frameworks, relocate, install.

mod context;
mod runner;

pub use context::PipelineContext;
pub use runner::{DeployPipeline, DeployReport};

use std::fmt;

/// The six pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Extract,
    Convert,
    SignBundle,
    SignFrameworks,
    Relocate,
    Install,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Extract => "extract",
            Self::Convert => "convert",
            Self::SignBundle => "sign-bundle",
            Self::SignFrameworks => "sign-frameworks",
            Self::Relocate => "relocate",
            Self::Install => "install",
        };
        f.write_str(name)
    }
}
