// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The packed flash image.

use crate::{PackError, SectorLayout};
use std::path::Path;

/// A complete flash image: `layout.slot_count` sectors, concatenated in
/// ascending slot order.
///
/// Only [`crate::pack`] constructs images, so `as_bytes().len()` always
/// equals `layout.total_bytes()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashImage {
    layout: SectorLayout,
    data: Vec<u8>,
    populated: Vec<usize>,
}

impl FlashImage {
    pub(crate) fn new(layout: SectorLayout, data: Vec<u8>, populated: Vec<usize>) -> Self {
        debug_assert_eq!(data.len(), layout.total_bytes());
        Self {
            layout,
            data,
            populated,
        }
    }

    pub fn layout(&self) -> &SectorLayout {
        &self.layout
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the bytes of one sector, or `None` past the last slot.
    pub fn sector(&self, slot: usize) -> Option<&[u8]> {
        if slot >= self.layout.slot_count {
            return None;
        }
        let start = self.layout.offset(slot);
        Some(&self.data[start..start + self.layout.sector_size])
    }

    /// Slots that received a tensor, ascending.
    pub fn populated_slots(&self) -> &[usize] {
        &self.populated
    }

    /// Slots that were zero-filled because no source was given, ascending.
    pub fn missing_slots(&self) -> Vec<usize> {
        (0..self.layout.slot_count)
            .filter(|s| self.populated.binary_search(s).is_err())
            .collect()
    }

    /// Writes the image to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), PackError> {
        std::fs::write(path, &self.data).map_err(|e| PackError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::info!(
            "flash image: wrote {} ({} sectors × {} bytes, {} populated)",
            path.display(),
            self.layout.slot_count,
            self.layout.sector_size,
            self.populated.len(),
        );
        Ok(())
    }

    /// Human-readable summary for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "FlashImage: {} bytes, {} slots × {} B at {:#X}, populated {:?}, missing {:?}",
            self.len(),
            self.layout.slot_count,
            self.layout.sector_size,
            self.layout.base_address,
            self.populated,
            self.missing_slots(),
        )
    }
}
