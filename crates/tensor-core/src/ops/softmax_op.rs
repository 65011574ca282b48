// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Softmax activation operation.

use crate::TensorError;

/// Computes softmax over a vector: `output[i] = exp(x[i] - max) / sum(exp(x - max))`.
///
/// Uses the numerically stable variant that subtracts the maximum value
/// before exponentiation to prevent overflow. For finite, non-empty input
/// the result sums to 1 and contains no NaN or infinity.
///
/// # Errors
/// Returns [`TensorError::EmptyInput`] for an empty slice.
/// Returns [`TensorError::LengthMismatch`] if `input` and `output` differ in length.
/// Returns [`TensorError::Numeric`] if any input value is not finite.
pub fn softmax_in_place(input: &[f32], output: &mut [f32]) -> Result<(), TensorError> {
    if input.is_empty() {
        return Err(TensorError::EmptyInput { op: "softmax" });
    }

    if input.len() != output.len() {
        return Err(TensorError::LengthMismatch {
            op: "softmax",
            input: input.len(),
            output: output.len(),
        });
    }

    if let Some((i, v)) = input.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(TensorError::Numeric {
            op: "softmax",
            detail: format!("non-finite value {v} at index {i}"),
        });
    }

    // Find max for numerical stability.
    let max_val = input.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    // Compute exp(x - max) and sum. The max element contributes exp(0) = 1,
    // so the sum is at least 1.
    let mut sum = 0.0f32;
    for (d, &s) in output.iter_mut().zip(input.iter()) {
        let e = (s - max_val).exp();
        *d = e;
        sum += e;
    }

    let inv_sum = 1.0 / sum;
    for d in output.iter_mut() {
        *d *= inv_sum;
    }

    Ok(())
}

/// Allocating convenience wrapper around [`softmax_in_place`].
pub fn softmax(input: &[f32]) -> Result<Vec<f32>, TensorError> {
    let mut output = vec![0.0f32; input.len()];
    softmax_in_place(input, &mut output)?;
    Ok(output)
}
