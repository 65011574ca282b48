// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pipeline configuration loaded from TOML files or constructed programmatically.
//!
//! Every section is optional; the defaults describe the MNIST example.
//!
//! # TOML Format
//! ```toml
//! [workspace]
//! root = "."
//! examples_dir = "example"
//! kernel = "build/acoral-kernel.bin"
//!
//! [input]
//! height = 28
//! width = 28
//! channels = 1
//! dtype = "uint8"
//! batch_dim = true
//! mean = 0.0
//! std = 255.0
//!
//! [convert]
//! input_dir = "images/test"
//! output_dir = "raw_images"
//! limit = 30
//!
//! [flash]
//! sector_size = 4096
//! slot_count = 10
//! base_address = 13631488
//! slot_dir = "."
//! image_file = "mnist_images.bin"
//!
//! [evaluate]
//! samples_dir = "raw_images"
//! limit = 5
//!
//! [tools.ncc]
//! program = "/opt/ncc/ncc"
//! timeout_secs = 120
//!
//! [compile]
//! target = "k210"
//! quant_type = "int8"
//!
//! [calibration]
//! csv = "iris_data/iris.csv"
//! columns = 4
//!
//! [[targets]]
//! name = "mnist"
//! extra_required = ["mnist_images.bin"]
//! ```
//!
//! Paths inside `[convert]`, `[flash]`, `[evaluate]` and `[calibration]` are
//! relative to the target's example directory,
//! `<root>/<examples_dir>/<target>`.

use crate::PipelineError;
use flash_packer::SectorLayout;
use kfpkg::TargetPolicy;
use raw_encoder::TargetSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toolchain::{CompileOptions, ToolCommand};

/// Configuration for the deployment pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub flash: FlashConfig,
    #[serde(default)]
    pub evaluate: EvaluateConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub compile: CompileOptions,
    #[serde(default)]
    pub calibration: Option<CalibrationConfig>,
    #[serde(default = "TargetPolicy::defaults")]
    pub targets: Vec<TargetPolicy>,
}

/// Where examples and the kernel live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub root: PathBuf,
    pub examples_dir: PathBuf,
    /// Kernel binary shipped in every archive.
    pub kernel: PathBuf,
}

/// Model input geometry plus the normalization `ncc infer` applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(flatten)]
    pub target: TargetSpec,
    #[serde(default)]
    pub mean: f32,
    #[serde(default = "default_std")]
    pub std: f32,
}

fn default_std() -> f32 {
    255.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub limit: Option<usize>,
}

/// Sector layout plus where slot sources and the packed image live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashConfig {
    #[serde(flatten)]
    pub layout: SectorLayout,
    #[serde(default = "default_slot_dir")]
    pub slot_dir: PathBuf,
    #[serde(default = "default_image_file")]
    pub image_file: PathBuf,
}

fn default_slot_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_image_file() -> PathBuf {
    PathBuf::from("mnist_images.bin")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluateConfig {
    pub samples_dir: PathBuf,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ncc: ToolCommand,
}

/// Tabular calibration data for the quantizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    pub csv: PathBuf,
    #[serde(default = "default_columns")]
    pub columns: usize,
}

fn default_columns() -> usize {
    4
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            examples_dir: PathBuf::from("example"),
            kernel: PathBuf::from("build/acoral-kernel.bin"),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            target: TargetSpec::default(),
            mean: 0.0,
            std: default_std(),
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("images/test"),
            output_dir: PathBuf::from("raw_images"),
            limit: Some(30),
        }
    }
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            layout: SectorLayout::default(),
            slot_dir: default_slot_dir(),
            image_file: default_image_file(),
        }
    }
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            samples_dir: PathBuf::from("raw_images"),
            limit: None,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workspace: WorkspaceConfig::default(),
            input: InputConfig::default(),
            convert: ConvertConfig::default(),
            flash: FlashConfig::default(),
            evaluate: EvaluateConfig::default(),
            tools: ToolsConfig::default(),
            compile: CompileOptions::default(),
            calibration: None,
            targets: TargetPolicy::defaults(),
        }
    }
}

impl PipelineConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, PipelineError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| PipelineError::ConfigError(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, PipelineError> {
        toml::to_string_pretty(self)
            .map_err(|e| PipelineError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Checks values that parse fine but cannot work.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.flash
            .layout
            .validate()
            .map_err(|e| PipelineError::ConfigError(e.to_string()))?;

        let tensor_bytes = self.input.target.size_bytes();
        if tensor_bytes > self.flash.layout.sector_size {
            tracing::warn!(
                "input tensor ({} bytes) does not fit a {}-byte flash sector; packing will fail",
                tensor_bytes,
                self.flash.layout.sector_size
            );
        }
        if self.input.std == 0.0 {
            return Err(PipelineError::ConfigError("input std must be non-zero".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for t in &self.targets {
            if !seen.insert(t.name.as_str()) {
                return Err(PipelineError::ConfigError(format!(
                    "target '{}' is declared more than once",
                    t.name
                )));
            }
        }
        Ok(())
    }

    /// `<root>/<examples_dir>/<target>`.
    pub fn example_dir(&self, target: &str) -> PathBuf {
        self.workspace
            .root
            .join(&self.workspace.examples_dir)
            .join(target)
    }

    /// Kernel binary path, resolved against the workspace root.
    pub fn kernel_path(&self) -> PathBuf {
        self.workspace.root.join(&self.workspace.kernel)
    }

    /// Archive policy for `target`; unknown targets get the base set.
    pub fn policy(&self, target: &str) -> TargetPolicy {
        TargetPolicy::lookup(&self.targets, target)
    }
}
