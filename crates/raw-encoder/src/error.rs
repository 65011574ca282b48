// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor encoding.

use std::path::PathBuf;
use tensor_core::{DType, Shape};

/// Errors that can occur while encoding a source into a raw tensor.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The source's dimensions do not match the declared target geometry.
    #[error("shape mismatch for '{origin}': expected {expected}, got {actual}")]
    ShapeMismatch {
        origin: String,
        expected: Shape,
        actual: Shape,
    },

    /// The target dtype has no defined cast rule.
    #[error("unsupported target dtype {dtype}: no cast rule defined")]
    UnsupportedDtype { dtype: DType },

    /// The source is missing, unreadable or corrupt.
    #[error("cannot read source '{}': {detail}", path.display())]
    SourceRead { path: PathBuf, detail: String },

    /// Writing an encoded tensor to disk failed.
    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tensor construction rejected the encoded buffer.
    #[error("tensor error: {0}")]
    Tensor(#[from] tensor_core::TensorError),
}
