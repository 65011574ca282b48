// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for external tool invocation.

use std::path::PathBuf;
use std::time::Duration;

/// Errors raised by external tools and their inputs.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The program could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but failed, or produced unusable output.
    #[error("'{program}' failed: {detail}")]
    Failed { program: String, detail: String },

    /// The program did not finish in time and was killed.
    #[error("'{program}' timed out after {}s", timeout.as_secs())]
    TimedOut { program: String, timeout: Duration },

    /// A filesystem operation around the tool failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The calibration CSV could not be read.
    #[error("calibration CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The calibration data is unusable.
    #[error("invalid calibration data: {0}")]
    Calibration(String),
}

impl ToolError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
