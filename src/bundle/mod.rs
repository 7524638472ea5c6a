// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! App bundle handling
//!
//! Locating the extracted app bundle and signing its embedded frameworks.

mod locator;
mod signer;

pub use locator::{locate_app, BUNDLE_EXTENSION, PAYLOAD_DIR};
pub use signer::{FrameworkSigner, SigningJob, SigningReport, FRAMEWORKS_DIR};
