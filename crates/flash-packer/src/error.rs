// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for flash image packing.

use std::path::PathBuf;

/// Errors that can occur while packing a flash image.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// A slot's tensor does not fit in one sector.
    #[error("slot {slot}: tensor of {len} bytes overflows sector size {sector_size}")]
    SectorOverflow {
        slot: usize,
        len: usize,
        sector_size: usize,
    },

    /// The sector layout is unusable (zero sizes, misaligned base address).
    #[error("invalid sector layout: {0}")]
    InvalidLayout(String),

    /// Writing the flash image to disk failed.
    #[error("cannot write flash image '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
