// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for simdeploy. The CLI is a thin
//! observer over the pipeline core: it triggers a run and renders the event
//! log as it arrives.

pub mod deploy;
pub mod doctor;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Simulator deployment helper
///
/// Turn an IPA archive into an app installed on a booted simulator.
#[derive(Parser, Debug)]
#[clap(
    name = "simdeploy",
    version,
    about = "Deploy IPA archives to a running iOS simulator",
    long_about = None,
    after_help = "Examples:\n\
        simdeploy deploy App.ipa        Extract, convert, re-sign, and install\n\
        simdeploy deploy App.ipa --no-install\n\
        simdeploy doctor                Check that the external tools are available\n\n\
        See 'simdeploy <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the deployment pipeline against an archive
    Deploy {
        /// Archive to deploy
        archive: PathBuf,

        /// Config file with tool paths and working directory
        #[clap(short, long)]
        config: Option<PathBuf>,

        /// Stop after relocating the signed app (skip the simulator install)
        #[clap(long)]
        no_install: bool,
    },

    /// Check that the external tools are installed
    Doctor {
        /// Config file with tool paths
        #[clap(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[clap(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for doctor
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Load the effective config for a command
pub(crate) fn load_config(path: Option<PathBuf>) -> miette::Result<crate::config::Config> {
    match path {
        Some(p) => crate::config::Config::from_file(&p).map_err(Into::into),
        None => crate::config::Config::discover().map_err(Into::into),
    }
}
