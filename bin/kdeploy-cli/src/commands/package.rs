// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `kdeploy package` command: build `<target>.kfpkg`.
//!
//! Exits non-zero, naming the file, when a required artifact is missing.

use pipeline::{Pipeline, PipelineConfig};

pub async fn execute(config: PipelineConfig, target: String) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              kdeploy · Archive Builder               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let policy = config.policy(&target);
    let plan = policy.plan(&config.example_dir(&target), &config.kernel_path());
    println!("  Target: {target}");
    println!("  Required:");
    for path in &plan.required {
        let mark = if path.is_file() { "ok" } else { "MISSING" };
        println!("   {:<8} {}", mark, path.display());
    }
    if !plan.optional.is_empty() {
        println!("  Optional:");
        for path in &plan.optional {
            let mark = if path.is_file() { "ok" } else { "skip" };
            println!("   {:<8} {}", mark, path.display());
        }
    }
    println!();

    let archive = Pipeline::new(config)
        .package(&target)
        .map_err(|e| anyhow::anyhow!("packaging '{target}' failed: {e}"))?;

    println!("  Archive: {}", archive.path.display());
    println!("  Size:    {} bytes", archive.size_bytes);
    println!("  Members:");
    for member in &archive.members {
        println!("   - {member}");
    }
    println!();
    Ok(())
}
