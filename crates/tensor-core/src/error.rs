// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor construction and activations.

/// Errors that can occur when building tensors or running activations.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// The provided buffer size does not match the expected size for the given shape and dtype.
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Input and output slices of an operation differ in length.
    #[error("length mismatch for {op}: input has {input} elements, output has {output}")]
    LengthMismatch {
        op: &'static str,
        input: usize,
        output: usize,
    },

    /// The requested data type is not supported for this operation.
    #[error("unsupported dtype {dtype:?} for operation {op}")]
    UnsupportedDType {
        op: &'static str,
        dtype: crate::DType,
    },

    /// The operation needs at least one element.
    #[error("empty input for {op}")]
    EmptyInput { op: &'static str },

    /// A numeric computation failed (e.g., NaN or infinity in the input).
    #[error("numeric error in {op}: {detail}")]
    Numeric {
        op: &'static str,
        detail: String,
    },
}
