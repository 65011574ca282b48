// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `ncc infer` as an inference backend.
//!
//! Each call gets its own empty output directory:
//!
//! ```text
//! ncc infer <kmodel> <tmp> --dataset <sample.raw> --dataset-format raw \
//!     --input-mean <m> --input-std <s>
//! <tmp>/<single file>  ──► little-endian f32 values, one per class
//! ```

use crate::{ToolCommand, ToolError};
use inference_eval::{EvalError, InferenceBackend};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Runs a compiled kmodel on one sample at a time through `ncc infer`.
#[derive(Debug, Clone)]
pub struct NccInference {
    tool: ToolCommand,
    kmodel: PathBuf,
    input_mean: f32,
    input_std: f32,
}

impl NccInference {
    /// Uses the default input normalization (mean 0, std 255).
    pub fn new(tool: ToolCommand, kmodel: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            kmodel: kmodel.into(),
            input_mean: 0.0,
            input_std: 255.0,
        }
    }

    pub fn with_normalization(mut self, mean: f32, std: f32) -> Self {
        self.input_mean = mean;
        self.input_std = std;
        self
    }

    pub fn kmodel(&self) -> &Path {
        &self.kmodel
    }

    /// Runs inference on `sample` and returns the raw output.
    pub async fn run(&self, sample: &Path) -> Result<Vec<f32>, ToolError> {
        let out_dir = tempfile::Builder::new()
            .prefix("kdeploy-infer-")
            .tempdir()
            .map_err(|e| ToolError::io(std::env::temp_dir(), e))?;

        let args: Vec<OsString> = vec![
            "infer".into(),
            self.kmodel.clone().into(),
            out_dir.path().into(),
            "--dataset".into(),
            sample.into(),
            "--dataset-format".into(),
            "raw".into(),
            "--input-mean".into(),
            self.input_mean.to_string().into(),
            "--input-std".into(),
            self.input_std.to_string().into(),
        ];
        self.tool.run(&args).await?;

        read_single_output(out_dir.path()).map_err(|detail| ToolError::Failed {
            program: self.tool.name(),
            detail,
        })
    }
}

impl InferenceBackend for NccInference {
    async fn infer(&self, sample: &Path) -> Result<Vec<f32>, EvalError> {
        self.run(sample).await.map_err(EvalError::backend)
    }
}

/// Reads the one output file `ncc infer` leaves in `dir`.
///
/// Returns a diagnostic when the directory holds no file, more than one
/// file, or a file whose length is not a whole number of `f32` values.
pub fn read_single_output(dir: &Path) -> Result<Vec<f32>, String> {
    let mut files = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| format!("{}: {e}", dir.display()))?;
    for entry in entries {
        let path = entry.map_err(|e| format!("{}: {e}", dir.display()))?.path();
        if path.is_file() {
            files.push(path);
        }
    }

    let path = match files.as_slice() {
        [only] => only,
        [] => return Err(format!("no output file in {}", dir.display())),
        many => {
            return Err(format!(
                "expected one output file in {}, found {}",
                dir.display(),
                many.len()
            ))
        }
    };

    let bytes = std::fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?;
    if bytes.len() % 4 != 0 {
        return Err(format!(
            "{} is {} bytes, not a whole number of f32 values",
            path.display(),
            bytes.len()
        ));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}
