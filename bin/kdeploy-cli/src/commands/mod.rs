// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod compile;
pub mod convert;
pub mod evaluate;
pub mod inspect;
pub mod pack;
pub mod package;

use pipeline::PipelineConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Configuration file picked up from the working directory when `-c` is absent.
const DEFAULT_CONFIG_FILE: &str = "kdeploy.toml";

/// Installs the global subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads `path`, else `./kdeploy.toml` if it exists, else the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
    };
    match path {
        Some(p) => {
            tracing::info!("loading configuration from {}", p.display());
            Ok(PipelineConfig::from_file(&p)?)
        }
        None => Ok(PipelineConfig::default()),
    }
}

/// `kdeploy config`: prints the effective configuration.
pub fn show_config(config: &PipelineConfig) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║               kdeploy · Configuration                ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Makes a command-line path absolute so that joining it onto an example
/// directory leaves it unchanged.
pub(crate) fn absolutize(path: PathBuf) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Final path component, for table output.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
