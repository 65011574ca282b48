// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Raw model output → prediction.

use crate::EvalError;
use std::fmt::Write as _;
use tensor_core::{argmax, softmax};

/// A scored model output.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Interpretation {
    /// Index of the most probable class.
    pub predicted: usize,
    /// Probability of `predicted`, in percent.
    pub confidence_pct: f32,
    /// Whether `predicted` matches the expected label.
    pub correct: bool,
    /// Softmax of the raw output.
    pub probabilities: Vec<f32>,
}

impl Interpretation {
    /// One `class: pct%` line per class.
    pub fn distribution(&self) -> String {
        let mut out = String::new();
        for (class, p) in self.probabilities.iter().enumerate() {
            let _ = writeln!(out, "{class}: {:.2}%", p * 100.0);
        }
        out
    }
}

/// Interprets one raw output vector against its expected label.
///
/// # Errors
/// [`EvalError::EmptyOutput`] for an empty vector and
/// [`EvalError::NonFiniteOutput`] if any value is NaN or infinite.
pub fn interpret(raw_output: &[f32], expected_label: usize) -> Result<Interpretation, EvalError> {
    if raw_output.is_empty() {
        return Err(EvalError::EmptyOutput);
    }
    if let Some((index, &value)) = raw_output.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(EvalError::NonFiniteOutput { index, value });
    }

    // Ranked on the raw values: nearly equal logits can collapse to equal
    // probabilities in f32.
    let predicted = argmax(raw_output).ok_or(EvalError::EmptyOutput)?;
    let probabilities = softmax(raw_output)?;

    Ok(Interpretation {
        predicted,
        confidence_pct: probabilities[predicted] * 100.0,
        correct: predicted == expected_label,
        probabilities,
    })
}
