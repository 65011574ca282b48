// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the deployment pipeline.

use std::path::PathBuf;

/// Errors that can occur while running a pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Encoding an input failed.
    #[error("encode error: {0}")]
    Encode(#[from] raw_encoder::EncodeError),

    /// Packing the flash image failed.
    #[error("pack error: {0}")]
    Pack(#[from] flash_packer::PackError),

    /// Building the deployment archive failed.
    #[error("archive error: {0}")]
    Archive(#[from] kfpkg::ArchiveError),

    /// Interpreting or scoring model output failed.
    #[error("evaluation error: {0}")]
    Eval(#[from] inference_eval::EvalError),

    /// An external tool failed.
    #[error("tool error: {0}")]
    Tool(#[from] toolchain::ToolError),

    /// A stage input directory or file does not exist.
    #[error("{what} not found: {}", path.display())]
    MissingInput { what: &'static str, path: PathBuf },

    /// A filesystem operation around a stage failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
