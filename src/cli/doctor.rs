// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Doctor command - check tool availability

use colored::Colorize;
use miette::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::OutputFormat;
use crate::config::Config;
use crate::utils::{create_spinner, print_error, print_success};

/// Availability of one external tool
#[derive(Debug, Serialize)]
pub struct ToolStatus {
    pub name: String,
    pub path: PathBuf,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Run the doctor command
pub async fn run(
    config_path: Option<PathBuf>,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let config = super::load_config(config_path)?;

    let spinner = create_spinner("Checking external tools...");
    let statuses = check_tools(&config);
    spinner.finish_and_clear();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&statuses).map_err(
                |e| miette::miette!("failed to serialize report: {}", e),
            )?);
        }
        OutputFormat::Text => {
            println!("{}", "External tools".bold());
            for status in &statuses {
                if status.available {
                    print_success(&format!("{} ({})", status.name, status.path.display()));
                } else {
                    print_error(&format!("{} ({})", status.name, status.path.display()));
                }
                if let Some(ref note) = status.note {
                    if verbose || !status.available {
                        println!("      {}", note.dimmed());
                    }
                }
            }
        }
    }

    if statuses.iter().all(|s| s.available) {
        Ok(())
    } else {
        Err(miette::miette!("some required tools are missing"))
    }
}

fn check_tools(config: &Config) -> Vec<ToolStatus> {
    vec![
        path_or_which("unzip", &config.tools.unzip),
        // the converter is only ever used at its configured location
        fixed_path("converter", &config.tools.converter),
        path_or_which("codesign", &config.tools.codesign),
        path_or_which("xcrun", &config.tools.xcrun),
    ]
}

/// Available when the configured path exists, or when a same-named binary is
/// on PATH (reported as a note; the pipeline still uses the configured path)
fn path_or_which(name: &str, path: &Path) -> ToolStatus {
    if path.exists() {
        return ToolStatus {
            name: name.to_string(),
            path: path.to_path_buf(),
            available: true,
            note: None,
        };
    }

    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
    let on_path = file_name.as_deref().and_then(|n| which::which(n).ok());

    match on_path {
        Some(found) => ToolStatus {
            name: name.to_string(),
            path: path.to_path_buf(),
            available: true,
            note: Some(format!(
                "not at the configured path, but found at {}; update your config",
                found.display()
            )),
        },
        None => ToolStatus {
            name: name.to_string(),
            path: path.to_path_buf(),
            available: false,
            note: Some("not found at the configured path or on PATH".to_string()),
        },
    }
}

fn fixed_path(name: &str, path: &Path) -> ToolStatus {
    let available = path.exists();
    ToolStatus {
        name: name.to_string(),
        path: path.to_path_buf(),
        available,
        note: (!available)
            .then(|| "must be installed at this exact path; PATH is not searched".to_string()),
    }
}
