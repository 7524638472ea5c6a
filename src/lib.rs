// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! # simdeploy - Simulator Deployment Helper
//!
//! `simdeploy` turns an IPA archive into an app installed on a booted iOS
//! simulator: extract, convert via an external tool, ad-hoc re-sign the app
//! and every embedded framework, relocate the result next to the archive,
//! then install it.
//!
//! ## Quick Start
//!
//! ```bash
//! # Deploy an archive to the booted simulator
//! simdeploy deploy App.ipa
//!
//! # Re-sign and relocate without installing
//! simdeploy deploy App.ipa --no-install
//!
//! # Check the external tools
//! simdeploy doctor
//! ```

pub mod bundle;
pub mod cli;
pub mod config;
pub mod errors;
pub mod events;
pub mod pipeline;
pub mod process;
pub mod simulator;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use errors::{SimdeployError, SimdeployResult};
pub use pipeline::{DeployPipeline, DeployReport, StageKind};
pub use process::StageOutcome;
pub use simulator::InstallOutcome;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
