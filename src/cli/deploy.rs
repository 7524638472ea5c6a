// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Deploy command - run the pipeline

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use crate::events;
use crate::pipeline::DeployPipeline;
use crate::simulator::InstallOutcome;

/// Run the deployment pipeline
pub async fn run(
    archive: PathBuf,
    config_path: Option<PathBuf>,
    no_install: bool,
    verbose: bool,
) -> Result<()> {
    if !archive.exists() {
        return Err(miette::miette!(
            "archive not found: {}",
            archive.display()
        ));
    }

    let config = super::load_config(config_path)?;

    if verbose {
        eprintln!("{}: {}", "Working directory".bold(), config.working_dir.display());
        eprintln!("{}: {}", "Converter".bold(), config.tools.converter.display());
        eprintln!();
    }

    // render the event log as it is appended; the core never reads it back
    let (events, mut rx) = events::channel();
    let printer = tokio::spawn(async move {
        while let Some(entry) = rx.recv().await {
            println!("{}", entry);
        }
    });

    let mut pipeline = DeployPipeline::new(config, events);
    if no_install {
        pipeline = pipeline.skip_install();
    }

    let result = pipeline.run(&archive).await;

    // dropping the pipeline closes the channel and lets the printer drain
    drop(pipeline);
    let _ = printer.await;

    let report = result?;

    println!();
    if !report.signing.all_signed() {
        println!(
            "{}",
            format!(
                "Warning: {} of {} framework signatures failed",
                report.signing.failures, report.signing.jobs
            )
            .yellow()
        );
    }

    match report.install {
        Some(InstallOutcome::Failed(_)) => {
            println!(
                "{}",
                format!("Deploy failed after {:.2}s", report.duration.as_secs_f64()).red()
            );
            Err(miette::miette!("simulator install failed"))
        }
        _ => {
            println!(
                "{}",
                format!(
                    "Deploy completed in {:.2}s: {}",
                    report.duration.as_secs_f64(),
                    report.bundle.display()
                )
                .green()
            );
            Ok(())
        }
    }
}
