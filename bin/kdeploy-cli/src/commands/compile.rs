// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `kdeploy compile` command: source model → `<target>.kmodel`.

use super::absolutize;
use pipeline::{CalibrationConfig, Pipeline, PipelineConfig};
use std::path::PathBuf;

pub async fn execute(
    mut config: PipelineConfig,
    target: String,
    model: PathBuf,
    calibration: Option<PathBuf>,
    columns: usize,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║               kdeploy · Model Compiler               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    if let Some(csv) = calibration {
        config.calibration = Some(CalibrationConfig {
            csv: absolutize(csv)?,
            columns,
        });
    }
    let model = absolutize(model)?;

    let opts = &config.compile;
    println!("  Target: {target}");
    println!("  Model:  {}", model.display());
    println!(
        "  ncc:    -i {} -t {} (quant {}, weights {})",
        opts.input_format,
        opts.target,
        opts.quant_type.ncc_name(),
        opts.w_quant_type.ncc_name(),
    );
    match &config.calibration {
        Some(cal) => println!(
            "  Calibration: {} (first {} columns)",
            cal.csv.display(),
            cal.columns
        ),
        None => println!("  Calibration: none"),
    }
    println!();

    let max_bytes = config.compile.max_kmodel_bytes;
    let compiled = Pipeline::new(config).compile(&target, &model).await?;

    println!("  Wrote {} ({} bytes)", compiled.path.display(), compiled.size_bytes);
    if compiled.oversized {
        println!("  WARNING: kmodel exceeds the {max_bytes}-byte budget of the board");
    }
    Ok(())
}
