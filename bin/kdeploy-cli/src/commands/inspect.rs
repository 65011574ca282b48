// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `kdeploy inspect` command.
//!
//! - `.raw`: decoded with the configured input tensor; stats + ASCII preview.
//! - `.kfpkg`: members and a flash-list cross-check.
//! - anything else: treated as a packed flash image.

use anyhow::Context;
use kfpkg::{DeploymentArchive, FlashList, FLASH_LIST_FILE};
use pipeline::PipelineConfig;
use raw_encoder::{ascii_preview, read_raw, TargetSpec, TensorStats};
use std::path::{Path, PathBuf};

pub async fn execute(config: PipelineConfig, path: PathBuf) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║                 kdeploy · Inspector                  ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("  File: {}", path.display());

    match path.extension().and_then(|e| e.to_str()) {
        Some("raw") => inspect_raw(&config, &path),
        Some("kfpkg") => inspect_archive(&path),
        _ => inspect_flash_image(&config, &path),
    }
}

fn inspect_raw(config: &PipelineConfig, path: &Path) -> anyhow::Result<()> {
    print!("{}", describe_input(path, &config.input.target)?);
    Ok(())
}

/// Tensor line, value statistics and an `o`/`.` preview of one `.raw` input.
pub(crate) fn describe_input(path: &Path, spec: &TargetSpec) -> anyhow::Result<String> {
    let tensor = read_raw(path, spec)?;
    let stats = TensorStats::from_tensor(&tensor)?;

    let mut out = format!(
        "  Tensor: {} {} ({} bytes)\n  Values: {}\n\n",
        tensor.shape(),
        tensor.dtype(),
        tensor.size_bytes(),
        stats.summary(),
    );
    for line in ascii_preview(&tensor, spec.width, spec.channels)?.lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}

fn inspect_archive(path: &Path) -> anyhow::Result<()> {
    let archive = DeploymentArchive::open(path)?;
    println!("  {}", archive.summary());
    println!();
    for member in &archive.members {
        println!("   - {member}");
    }

    if archive.contains(FLASH_LIST_FILE) {
        let json = archive.read_member(FLASH_LIST_FILE)?;
        let list = FlashList::from_json(&String::from_utf8_lossy(&json))?;
        println!();
        println!("  {:>12}  {:<24} {}", "Address", "Binary", "SHA-256 prefix");
        for entry in &list.files {
            println!(
                "  {:>#12X}  {:<24} {}",
                entry.address,
                entry.bin,
                if entry.sha256_prefix { "yes" } else { "no" },
            );
        }
        let problems = list.lint(&archive.members);
        if !problems.is_empty() {
            println!();
            for problem in problems {
                println!("  WARNING: {problem}");
            }
        }
    } else {
        println!();
        println!("  WARNING: archive has no {FLASH_LIST_FILE}");
    }
    Ok(())
}

fn inspect_flash_image(config: &PipelineConfig, path: &Path) -> anyhow::Result<()> {
    let layout = &config.flash.layout;
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;

    if bytes.len() != layout.total_bytes() {
        println!(
            "  WARNING: {} bytes, layout expects {} ({} × {})",
            bytes.len(),
            layout.total_bytes(),
            layout.slot_count,
            layout.sector_size,
        );
    }
    println!();
    println!("  {:<6} {:>10} {:>10}", "Slot", "Address", "Non-zero");
    println!("  {}", "-".repeat(30));
    for (slot, sector) in bytes.chunks(layout.sector_size).enumerate() {
        let non_zero = sector.iter().filter(|&&b| b != 0).count();
        println!("  {:<6} {:>#10X} {:>10}", slot, layout.address(slot), non_zero);
    }
    Ok(())
}
