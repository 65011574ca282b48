// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # kdeploy
//!
//! Command-line interface for preparing and validating K210 deployments.
//!
//! ## Usage
//! ```bash
//! # Convert test PNGs into .raw model inputs
//! kdeploy convert mnist --limit 30
//!
//! # Pack per-digit images into the flash data file
//! kdeploy pack mnist
//!
//! # Build example/mnist/mnist.kfpkg
//! kdeploy package mnist
//!
//! # Score the compiled model with ncc infer
//! kdeploy -c kdeploy.toml evaluate mnist --limit 5
//!
//! # Look at a .raw tensor, flash image or archive
//! kdeploy inspect example/mnist/raw_images/00000_7.raw
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kdeploy",
    about = "Model and data packaging toolkit for K210 boards",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (default: ./kdeploy.toml if present).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a directory of PNG images into .raw model inputs.
    Convert {
        /// Target (example) name.
        target: String,

        /// Directory of PNG images (overrides [convert].input_dir).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for .raw files (overrides [convert].output_dir).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Convert only the first N images in name order.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Pack per-slot images into a sector-aligned flash image.
    Pack {
        /// Target (example) name.
        target: String,

        /// Directory holding <slot>.png / .jpg / .raw (overrides [flash].slot_dir).
        #[arg(short, long)]
        slots: Option<PathBuf>,

        /// Output file (overrides [flash].image_file).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the .kfpkg deployment archive for a target.
    Package {
        /// Target (example) name.
        target: String,
    },

    /// Run the compiled model on .raw samples and report accuracy.
    Evaluate {
        /// Target (example) name.
        target: String,

        /// Directory of <id>_<label>.raw samples (overrides [evaluate].samples_dir).
        #[arg(short, long)]
        samples: Option<PathBuf>,

        /// Evaluate only the first N samples in name order.
        #[arg(short, long)]
        limit: Option<usize>,

        /// Write the full per-sample report as JSON.
        #[arg(long)]
        json: Option<PathBuf>,

        /// Print statistics and an ASCII preview of every input first.
        #[arg(long)]
        show_inputs: bool,
    },

    /// Compile a source model into the target's kmodel with ncc.
    Compile {
        /// Target (example) name.
        target: String,

        /// Source model (e.g. a .tflite file).
        #[arg(short, long)]
        model: PathBuf,

        /// CSV of calibration samples (overrides [calibration].csv).
        #[arg(long)]
        calibration: Option<PathBuf>,

        /// Number of leading CSV columns to use as features.
        #[arg(long, default_value_t = 4)]
        columns: usize,
    },

    /// Inspect a .raw tensor, a packed flash image or a .kfpkg archive.
    Inspect {
        /// File to inspect.
        path: PathBuf,
    },

    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert {
            target,
            input,
            output,
            limit,
        } => commands::convert::execute(config, target, input, output, limit).await,
        Commands::Pack {
            target,
            slots,
            output,
        } => commands::pack::execute(config, target, slots, output).await,
        Commands::Package { target } => commands::package::execute(config, target).await,
        Commands::Evaluate {
            target,
            samples,
            limit,
            json,
            show_inputs,
        } => {
            commands::evaluate::execute(config, target, samples, limit, json, show_inputs).await
        }
        Commands::Compile {
            target,
            model,
            calibration,
            columns,
        } => commands::compile::execute(config, target, model, calibration, columns).await,
        Commands::Inspect { path } => commands::inspect::execute(config, path).await,
        Commands::Config => commands::show_config(&config),
    }
}
