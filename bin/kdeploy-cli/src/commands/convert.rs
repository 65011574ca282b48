// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `kdeploy convert` command: PNG images → `.raw` model inputs.

use super::{absolutize, file_name};
use inference_eval::parse_label;
use pipeline::{Pipeline, PipelineConfig};
use std::path::PathBuf;

pub async fn execute(
    mut config: PipelineConfig,
    target: String,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              kdeploy · Image Converter               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    if let Some(dir) = input {
        config.convert.input_dir = absolutize(dir)?;
    }
    if let Some(dir) = output {
        config.convert.output_dir = absolutize(dir)?;
    }
    if limit.is_some() {
        config.convert.limit = limit;
    }

    let spec = &config.input.target;
    println!("  Target: {target}");
    println!(
        "  Input tensor: {} {} ({} bytes, batch dim {})",
        spec.tensor_shape(),
        spec.dtype,
        spec.size_bytes(),
        if spec.batch_dim { "yes" } else { "no" },
    );
    println!();

    let converted = Pipeline::new(config).convert(&target)?;

    println!("  {:<28} {:>5}  {:<28} {:>6}", "Source", "Label", "Raw file", "Bytes");
    println!("  {}", "-".repeat(72));
    for c in &converted {
        let label = parse_label(&c.source)
            .map(|l| l.to_string())
            .unwrap_or_else(|_| "?".into());
        println!(
            "  {:<28} {:>5}  {:<28} {:>6}",
            file_name(&c.source),
            label,
            file_name(&c.raw_path),
            c.size_bytes,
        );
    }
    println!();
    println!("  Converted {} images.", converted.len());
    Ok(())
}
