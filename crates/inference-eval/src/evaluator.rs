// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Batch evaluation over a directory of samples.
//!
//! # Sample Lifecycle
//! ```text
//! <dir>/*.raw (sorted, optional limit)
//!        │
//!        ▼
//!  parse_label ──► backend.infer ──► interpret ──► AccuracyCounter
//!        │               │               │
//!        └───── any failure: record_failure, log, continue ─────┘
//! ```

use crate::{interpret, parse_label, AccuracyCounter, AccuracyReport, EvalError, Interpretation};
use std::future::Future;
use std::path::{Path, PathBuf};

/// Something that can run the model on one encoded sample.
///
/// Implemented by the `ncc infer` wrapper in the toolchain crate and by
/// in-process fakes in tests.
pub trait InferenceBackend {
    /// Runs inference on the `.raw` file at `sample` and returns the raw
    /// model output, one value per class.
    fn infer(&self, sample: &Path) -> impl Future<Output = Result<Vec<f32>, EvalError>> + Send;
}

/// What happened to one sample.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SampleOutcome {
    Scored(Interpretation),
    Failed { reason: String },
}

/// One row of an evaluation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SampleRecord {
    pub sample: PathBuf,
    /// `None` when the label could not be parsed.
    pub expected: Option<usize>,
    pub outcome: SampleOutcome,
}

/// Result of evaluating a batch.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EvaluationReport {
    pub accuracy: AccuracyReport,
    pub samples: Vec<SampleRecord>,
}

impl EvaluationReport {
    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Lists the `.raw` files of `dir` sorted by file name, keeping at most
/// `limit` of them.
pub fn list_samples(dir: &Path, limit: Option<usize>) -> Result<Vec<PathBuf>, EvalError> {
    let io_err = |source| EvalError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut samples = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "raw") {
            samples.push(path);
        }
    }
    samples.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if let Some(limit) = limit {
        samples.truncate(limit);
    }
    Ok(samples)
}

/// Scores samples one at a time against an [`InferenceBackend`].
#[derive(Debug)]
pub struct Evaluator<B> {
    backend: B,
}

impl<B: InferenceBackend> Evaluator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Evaluates the first `limit` samples of `dir` (all when `None`).
    pub async fn evaluate_dir(
        &self,
        dir: &Path,
        limit: Option<usize>,
    ) -> Result<EvaluationReport, EvalError> {
        let samples = list_samples(dir, limit)?;
        if samples.is_empty() {
            tracing::warn!("no .raw samples found in {}", dir.display());
        }
        Ok(self.evaluate(&samples).await)
    }

    /// Evaluates `samples` in order.
    ///
    /// A failing sample is recorded and logged; the batch always runs to
    /// completion.
    pub async fn evaluate(&self, samples: &[PathBuf]) -> EvaluationReport {
        let mut counter = AccuracyCounter::new();
        let mut records = Vec::with_capacity(samples.len());

        for sample in samples {
            let name = sample.display();
            let expected = parse_label(sample).ok();

            let outcome = match self.evaluate_one(sample).await {
                Ok(interp) => {
                    tracing::info!(
                        "{name}: expected {}, predicted {} ({:.2}%){}",
                        expected.unwrap_or_default(),
                        interp.predicted,
                        interp.confidence_pct,
                        if interp.correct { "" } else { " MISS" },
                    );
                    tracing::debug!("{name} distribution:\n{}", interp.distribution());
                    counter.record(interp.correct);
                    SampleOutcome::Scored(interp)
                }
                Err(e) => {
                    tracing::warn!("{name}: {e}");
                    counter.record_failure();
                    SampleOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };

            records.push(SampleRecord {
                sample: sample.clone(),
                expected,
                outcome,
            });
        }

        let accuracy = counter.report();
        tracing::info!("{}", accuracy.summary());
        EvaluationReport {
            accuracy,
            samples: records,
        }
    }

    /// Scores a single sample. The label is checked before the backend runs.
    pub async fn evaluate_one(&self, sample: &Path) -> Result<Interpretation, EvalError> {
        let expected = parse_label(sample)?;
        let output = self.backend.infer(sample).await?;
        interpret(&output, expected)
    }
}
