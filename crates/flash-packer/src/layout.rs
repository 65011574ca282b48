// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sector geometry of a flash image.

use crate::PackError;

/// K210 SPI flash erase sector.
pub const DEFAULT_SECTOR_SIZE: usize = 0x1000;

/// Flash address the firmware reads the first image slot from.
pub const DEFAULT_BASE_ADDRESS: u32 = 0xD0_0000;

/// Fixed geometry of a flash image: `slot_count` sectors of `sector_size`
/// bytes, programmed at `base_address`.
///
/// # TOML Format
/// ```toml
/// sector_size = 4096
/// slot_count = 10
/// base_address = 13631488   # 0xD00000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SectorLayout {
    pub sector_size: usize,
    pub slot_count: usize,
    #[serde(default = "default_base_address")]
    pub base_address: u32,
}

fn default_base_address() -> u32 {
    DEFAULT_BASE_ADDRESS
}

impl SectorLayout {
    /// Creates a layout at the default base address.
    pub fn new(sector_size: usize, slot_count: usize) -> Result<Self, PackError> {
        let layout = Self {
            sector_size,
            slot_count,
            base_address: DEFAULT_BASE_ADDRESS,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Returns a copy programmed at a different base address.
    pub fn with_base_address(self, base_address: u32) -> Result<Self, PackError> {
        let layout = Self {
            base_address,
            ..self
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Checks sizes and sector alignment of the base address.
    ///
    /// Layouts deserialised from configuration must be validated before use.
    pub fn validate(&self) -> Result<(), PackError> {
        if self.sector_size == 0 {
            return Err(PackError::InvalidLayout("sector_size must be > 0".into()));
        }
        if self.slot_count == 0 {
            return Err(PackError::InvalidLayout("slot_count must be > 0".into()));
        }
        if self.base_address as usize % self.sector_size != 0 {
            return Err(PackError::InvalidLayout(format!(
                "base address {:#X} is not aligned to {} byte sectors",
                self.base_address, self.sector_size
            )));
        }
        if self.sector_size.checked_mul(self.slot_count).is_none() {
            return Err(PackError::InvalidLayout("image size overflows usize".into()));
        }
        Ok(())
    }

    /// Total image length: `slot_count × sector_size`.
    pub fn total_bytes(&self) -> usize {
        self.slot_count * self.sector_size
    }

    /// Byte offset of a slot inside the image.
    pub fn offset(&self, slot: usize) -> usize {
        slot * self.sector_size
    }

    /// Absolute flash address of a slot.
    pub fn address(&self, slot: usize) -> u64 {
        self.base_address as u64 + self.offset(slot) as u64
    }
}

impl Default for SectorLayout {
    fn default() -> Self {
        Self {
            sector_size: DEFAULT_SECTOR_SIZE,
            slot_count: 10,
            base_address: DEFAULT_BASE_ADDRESS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let l = SectorLayout::default();
        l.validate().unwrap();
        assert_eq!(l.total_bytes(), 40960);
        assert_eq!(l.offset(3), 12288);
        assert_eq!(l.address(1), 0xD0_1000);
    }

    #[test]
    fn test_rejects_zero_sizes() {
        assert!(SectorLayout::new(0, 10).is_err());
        assert!(SectorLayout::new(4096, 0).is_err());
    }

    #[test]
    fn test_rejects_misaligned_base() {
        let l = SectorLayout::new(4096, 2).unwrap();
        assert!(l.with_base_address(0xD0_0800).is_err());
        assert_eq!(l.with_base_address(0xC0_0000).unwrap().address(0), 0xC0_0000);
    }
}
