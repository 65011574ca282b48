// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # inference-eval
//!
//! Turns raw classifier output into a prediction and scores a batch of
//! samples against the labels encoded in their file names.
//!
//! - [`interpret`] — softmax, top-1 with lowest-index tie-break, confidence
//!   in percent.
//! - [`parse_label`] — ground truth from `<anything>_<label>.<ext>`.
//! - [`AccuracyCounter`] / [`AccuracyReport`] — running and final accuracy.
//! - [`Evaluator`] — drives an [`InferenceBackend`] over a directory of
//!   `.raw` samples, recording failed samples instead of aborting.
//!
//! # Example
//! ```
//! use inference_eval::interpret;
//!
//! let out = interpret(&[2.0, 1.0, 0.1], 0).unwrap();
//! assert_eq!(out.predicted, 0);
//! assert!(out.correct);
//! assert!((out.confidence_pct - 65.9).abs() < 0.1);
//! ```

mod accuracy;
mod error;
mod evaluator;
mod interpret;
mod label;

pub use accuracy::{AccuracyCounter, AccuracyReport};
pub use error::EvalError;
pub use evaluator::{
    list_samples, EvaluationReport, Evaluator, InferenceBackend, SampleOutcome, SampleRecord,
};
pub use interpret::{interpret, Interpretation};
pub use label::parse_label;
