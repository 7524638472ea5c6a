// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Bundle locator
//!
//! Finds the single app bundle inside an extraction root's `Payload`
//! directory.

use std::path::{Path, PathBuf};

use crate::errors::SimdeployError;

/// Conventional sub-directory an archive extracts its bundle into
pub const PAYLOAD_DIR: &str = "Payload";

/// Extension identifying an application bundle
pub const BUNDLE_EXTENSION: &str = "app";

/// Locate the app bundle under `<extraction_root>/Payload`
///
/// Returns the first entry carrying the `.app` extension. Directory listing
/// order is filesystem-dependent, so with more than one qualifying entry the
/// choice is not deterministic across environments; archives are expected to
/// contain exactly one.
pub fn locate_app(extraction_root: &Path) -> Result<PathBuf, SimdeployError> {
    let payload = extraction_root.join(PAYLOAD_DIR);

    let entries = std::fs::read_dir(&payload).map_err(|e| SimdeployError::PayloadMissing {
        path: payload.clone(),
        error: e.to_string(),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| SimdeployError::PayloadMissing {
            path: payload.clone(),
            error: e.to_string(),
        })?;

        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == BUNDLE_EXTENSION) {
            return Ok(path);
        }
    }

    Err(SimdeployError::NoBundleFound { path: payload })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_finds_single_app_bundle() {
        let root = TempDir::new().unwrap();
        let app = root.path().join("Payload/MyApp.app");
        std::fs::create_dir_all(&app).unwrap();

        let located = locate_app(root.path()).unwrap();
        assert_eq!(located, app);
    }

    #[test]
    fn test_missing_payload_is_payload_error() {
        let root = TempDir::new().unwrap();

        let err = locate_app(root.path()).unwrap_err();
        assert!(matches!(err, SimdeployError::PayloadMissing { .. }));
    }

    #[test]
    fn test_payload_without_app_is_not_found() {
        let root = TempDir::new().unwrap();
        let payload = root.path().join("Payload");
        std::fs::create_dir_all(payload.join("Other.framework")).unwrap();
        std::fs::write(payload.join("notes.txt"), "x").unwrap();

        let err = locate_app(root.path()).unwrap_err();
        assert!(matches!(err, SimdeployError::NoBundleFound { .. }));
    }

    #[test]
    fn test_identification_is_extension_based() {
        let root = TempDir::new().unwrap();
        let payload = root.path().join("Payload");
        std::fs::create_dir_all(&payload).unwrap();
        // even a regular file qualifies; locating does not validate the entry
        std::fs::write(payload.join("Strange.app"), "").unwrap();

        let located = locate_app(root.path()).unwrap();
        assert_eq!(located.file_name().unwrap(), "Strange.app");
    }
}
