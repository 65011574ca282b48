// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for output interpretation and evaluation.

use std::path::PathBuf;

/// Errors that can occur while interpreting or scoring model output.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// The model produced no output values.
    #[error("model output is empty")]
    EmptyOutput,

    /// A raw output value is NaN or infinite.
    #[error("model output value {value} at index {index} is not finite")]
    NonFiniteOutput { index: usize, value: f32 },

    /// The ground-truth label could not be parsed from a sample name.
    #[error("cannot parse a label from '{name}' (expected <id>_<label>.<ext>)")]
    InvalidLabelFormat { name: String },

    /// The inference backend failed for one sample.
    #[error("inference backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Listing or reading samples failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the tensor operations.
    #[error("tensor error: {0}")]
    Tensor(#[from] tensor_core::TensorError),
}

impl EvalError {
    /// Wraps any backend failure.
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}
