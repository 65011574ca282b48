// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for archive building.

use std::path::PathBuf;

/// Errors that can occur while building a deployment archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// A required input file does not exist. Nothing was written.
    #[error("missing artifact: {}", path.display())]
    MissingArtifact { path: PathBuf },

    /// Two inputs share a base name and would collide in the flat archive.
    #[error("duplicate archive member '{name}'")]
    DuplicateMember { name: String },

    /// The archive name is empty or would escape the output directory.
    #[error("invalid archive name '{name}'")]
    InvalidName { name: String },

    /// An input path has no usable file name.
    #[error("cannot derive an archive member name from '{}'", path.display())]
    InvalidMemberName { path: PathBuf },

    /// A filesystem operation failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The zip writer or reader failed.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// `flash-list.json` could not be parsed.
    #[error("failed to parse flash list: {0}")]
    FlashList(#[from] serde_json::Error),
}

impl ArchiveError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
