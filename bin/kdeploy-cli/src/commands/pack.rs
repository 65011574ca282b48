// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `kdeploy pack` command: per-slot images → sector-aligned flash image.

use super::absolutize;
use pipeline::{Pipeline, PipelineConfig};
use std::path::PathBuf;

pub async fn execute(
    mut config: PipelineConfig,
    target: String,
    slots: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║                kdeploy · Flash Packer                ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    if let Some(dir) = slots {
        config.flash.slot_dir = absolutize(dir)?;
    }
    if let Some(file) = output {
        config.flash.image_file = absolutize(file)?;
    }

    let layout = config.flash.layout;
    println!("  Target: {target}");
    println!(
        "  Layout: {} slots × {} bytes from {:#X}",
        layout.slot_count, layout.sector_size, layout.base_address,
    );
    println!();

    let outcome = Pipeline::new(config).pack(&target)?;
    let image = &outcome.image;

    println!("  {:<6} {:>10} {:>10}  {}", "Slot", "Address", "Offset", "Status");
    println!("  {}", "-".repeat(44));
    for slot in 0..layout.slot_count {
        let status = if image.populated_slots().contains(&slot) {
            "populated"
        } else {
            "zero-filled"
        };
        println!(
            "  {:<6} {:>#10X} {:>#10X}  {}",
            slot,
            layout.address(slot),
            layout.offset(slot),
            status,
        );
    }
    println!();
    println!("  Wrote {} ({} bytes)", outcome.path.display(), image.len());
    if !image.missing_slots().is_empty() {
        println!("  Missing slots: {:?}", image.missing_slots());
    }
    println!(
        "  Flash with: kflash -b 2000000 {} -a {:#X}",
        outcome.path.display(),
        layout.base_address
    );
    Ok(())
}
