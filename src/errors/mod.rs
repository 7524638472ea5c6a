// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Error types
//!
//! Failures inside a running pipeline are reported through the event log;
//! these types exist at the library boundary so callers (the CLI) can tell
//! a halted pipeline from a completed one and exit accordingly.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::StageKind;

/// Result type for simdeploy operations
pub type SimdeployResult<T> = Result<T, SimdeployError>;

/// Main error type for simdeploy
#[derive(Error, Debug, Diagnostic)]
pub enum SimdeployError {
    // ─────────────────────────────────────────────────────────────────────────
    // Stage Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("stage '{stage}' failed with exit code {code}")]
    #[diagnostic(code(simdeploy::stage_failed))]
    StageFailed { stage: StageKind, code: i32 },

    #[error("stage '{stage}' could not launch its process: {reason}")]
    #[diagnostic(
        code(simdeploy::stage_launch_failed),
        help("Check that the tool is installed and executable; see 'simdeploy doctor'")
    )]
    StageLaunchFailed { stage: StageKind, reason: String },

    #[error("converter not found at {path}")]
    #[diagnostic(
        code(simdeploy::converter_missing),
        help("The converter must be installed at this exact path; it is not searched for elsewhere")
    )]
    ConverterMissing { path: PathBuf },

    // ─────────────────────────────────────────────────────────────────────────
    // Bundle Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("payload directory missing or unreadable: {path}")]
    #[diagnostic(
        code(simdeploy::payload_missing),
        help("The archive should extract to a 'Payload' directory containing the app bundle")
    )]
    PayloadMissing { path: PathBuf, error: String },

    #[error("no app bundle found under {path}")]
    #[diagnostic(code(simdeploy::no_bundle_found))]
    NoBundleFound { path: PathBuf },

    #[error("failed to move bundle to {dest}: {error}")]
    #[diagnostic(code(simdeploy::relocate_failed))]
    RelocateFailed { dest: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // File/Config Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("failed to read file '{path}': {error}")]
    #[diagnostic(code(simdeploy::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(simdeploy::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(simdeploy::yaml_error))]
    Yaml { message: String },

    #[error("JSON error: {message}")]
    #[diagnostic(code(simdeploy::json_error))]
    Json { message: String },
}

impl From<std::io::Error> for SimdeployError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for SimdeployError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for SimdeployError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl SimdeployError {
    /// True for the two locator failure kinds
    pub fn is_locate_error(&self) -> bool {
        matches!(self, Self::PayloadMissing { .. } | Self::NoBundleFound { .. })
    }
}
