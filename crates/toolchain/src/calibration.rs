// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Calibration data for quantizing tabular models.
//!
//! The compiler's quantizer needs representative, already-normalized
//! inputs. For a CSV such as `iris.csv` that means taking the leading
//! feature columns and applying a per-column z-score:
//!
//! ```text
//! x' = (x - mean(col)) / std(col)      std is the population std
//! x' =  x - mean(col)                  when std(col) == 0
//! ```

use crate::ToolError;
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};

/// Normalized calibration samples, one row per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationSet {
    columns: Vec<String>,
    samples: Vec<Vec<f32>>,
    means: Vec<f32>,
    stds: Vec<f32>,
}

impl CalibrationSet {
    /// Loads the first `num_columns` columns of a CSV file with a header row.
    pub fn from_csv(path: &Path, num_columns: usize) -> Result<Self, ToolError> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

        let headers = reader.headers()?.clone();
        if headers.len() < num_columns {
            return Err(ToolError::Calibration(format!(
                "{} has {} columns, {} requested",
                path.display(),
                headers.len(),
                num_columns
            )));
        }
        let columns: Vec<String> = headers.iter().take(num_columns).map(String::from).collect();

        let mut rows = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let record = result?;
            let row = (0..num_columns)
                .map(|i| {
                    let cell = record.get(i).unwrap_or("").trim();
                    cell.parse::<f32>().map_err(|_| {
                        ToolError::Calibration(format!(
                            "row {}, column '{}': '{cell}' is not a number",
                            line + 1,
                            columns[i]
                        ))
                    })
                })
                .collect::<Result<Vec<f32>, _>>()?;
            rows.push(row);
        }

        let set = Self::from_rows(columns, rows)?;
        tracing::info!(
            "Loaded {} calibration samples x {} features from {}",
            set.len(),
            set.num_features(),
            path.display()
        );
        Ok(set)
    }

    /// Normalizes raw rows column by column.
    pub fn from_rows(columns: Vec<String>, mut rows: Vec<Vec<f32>>) -> Result<Self, ToolError> {
        if rows.is_empty() {
            return Err(ToolError::Calibration("no samples".into()));
        }
        let width = columns.len();
        if let Some(i) = rows.iter().position(|r| r.len() != width) {
            return Err(ToolError::Calibration(format!(
                "row {} has {} values, expected {width}",
                i + 1,
                rows[i].len()
            )));
        }

        let n = rows.len() as f64;
        let mut means = Vec::with_capacity(width);
        let mut stds = Vec::with_capacity(width);
        for col in 0..width {
            let mean = rows.iter().map(|r| r[col] as f64).sum::<f64>() / n;
            let var = rows
                .iter()
                .map(|r| (r[col] as f64 - mean).powi(2))
                .sum::<f64>()
                / n;
            means.push(mean as f32);
            stds.push(var.sqrt() as f32);
        }

        for (col, name) in columns.iter().enumerate() {
            if stds[col] == 0.0 {
                tracing::warn!("calibration column '{name}' is constant; centring only");
            }
        }

        for row in &mut rows {
            for (col, v) in row.iter_mut().enumerate() {
                *v -= means[col];
                if stds[col] != 0.0 {
                    *v /= stds[col];
                }
            }
        }

        Ok(Self {
            columns,
            samples: rows,
            means,
            stds,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn num_features(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn samples(&self) -> &[Vec<f32>] {
        &self.samples
    }

    /// Per-column means of the raw data.
    pub fn means(&self) -> &[f32] {
        &self.means
    }

    /// Per-column population standard deviations of the raw data.
    pub fn stds(&self) -> &[f32] {
        &self.stds
    }

    /// Writes each sample as `sample_<n>.raw` (little-endian `f32`) for the
    /// compiler's `--dataset` directory.
    pub fn write_raw_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, ToolError> {
        std::fs::create_dir_all(dir).map_err(|e| ToolError::io(dir, e))?;
        let mut written = Vec::with_capacity(self.samples.len());
        for (i, sample) in self.samples.iter().enumerate() {
            let path = dir.join(format!("sample_{i:05}.raw"));
            let bytes: Vec<u8> = sample.iter().flat_map(|v| v.to_le_bytes()).collect();
            std::fs::write(&path, bytes).map_err(|e| ToolError::io(&path, e))?;
            written.push(path);
        }
        tracing::info!("Wrote {} calibration samples to {}", written.len(), dir.display());
        Ok(written)
    }
}
