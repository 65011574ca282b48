// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `kdeploy evaluate` command: score the compiled model on `.raw` samples.

use super::{absolutize, file_name, inspect::describe_input};
use inference_eval::{list_samples, SampleOutcome};
use pipeline::{Pipeline, PipelineConfig};
use std::path::PathBuf;

pub async fn execute(
    mut config: PipelineConfig,
    target: String,
    samples: Option<PathBuf>,
    limit: Option<usize>,
    json: Option<PathBuf>,
    show_inputs: bool,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              kdeploy · Model Evaluator               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    if let Some(dir) = samples {
        config.evaluate.samples_dir = absolutize(dir)?;
    }
    if limit.is_some() {
        config.evaluate.limit = limit;
    }

    let pipeline = Pipeline::new(config);
    println!("  Target: {target}");
    println!("  Model:  {}", pipeline.kmodel_path(&target).display());
    println!(
        "  Tool:   {} (timeout {}s)",
        pipeline.config().tools.ncc.name(),
        pipeline.config().tools.ncc.timeout_secs,
    );
    println!();

    if show_inputs {
        let config = pipeline.config();
        let samples_dir = config
            .example_dir(&target)
            .join(&config.evaluate.samples_dir);
        for sample in list_samples(&samples_dir, config.evaluate.limit)? {
            println!("  {}", file_name(&sample));
            match describe_input(&sample, &config.input.target) {
                Ok(text) => println!("{text}"),
                Err(e) => println!("    unreadable: {e}\n"),
            }
        }
    }

    let report = pipeline.evaluate(&target).await?;

    println!(
        "  {:<24} {:>8} {:>9} {:>11}  {}",
        "Sample", "Expected", "Predicted", "Confidence", "Result"
    );
    println!("  {}", "-".repeat(64));
    for record in &report.samples {
        let expected = record
            .expected
            .map(|l| l.to_string())
            .unwrap_or_else(|| "?".into());
        match &record.outcome {
            SampleOutcome::Scored(interp) => println!(
                "  {:<24} {:>8} {:>9} {:>10.2}%  {}",
                file_name(&record.sample),
                expected,
                interp.predicted,
                interp.confidence_pct,
                if interp.correct { "ok" } else { "WRONG" },
            ),
            SampleOutcome::Failed { reason } => println!(
                "  {:<24} {:>8} {:>9} {:>11}  failed: {}",
                file_name(&record.sample),
                expected,
                "-",
                "-",
                reason,
            ),
        }
    }
    println!();
    println!("  {}", report.accuracy.summary());

    if let Some(path) = json {
        std::fs::write(&path, report.to_json()?)?;
        println!("  Report written to {}", path.display());
    }
    Ok(())
}
