// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sector packing.

use crate::{FlashImage, PackError, SectorLayout};
use std::collections::BTreeMap;
use tensor_core::RawTensor;

/// Packs slot sources into a flash image.
///
/// Walks `0..layout.slot_count` in ascending order. A present tensor is
/// written at its sector's offset 0 and the rest of the sector stays zero;
/// an absent slot logs a warning and contributes a zero sector. Sources
/// keyed at or beyond `slot_count` are ignored with a warning.
///
/// # Errors
/// [`PackError::SectorOverflow`] if a tensor is longer than one sector, or
/// [`PackError::InvalidLayout`] for an unusable layout.
pub fn pack(
    slots: &BTreeMap<usize, RawTensor>,
    layout: &SectorLayout,
) -> Result<FlashImage, PackError> {
    layout.validate()?;

    for &slot in slots.keys().filter(|&&s| s >= layout.slot_count) {
        tracing::warn!(
            "slot {} is outside the {} slot layout; source ignored",
            slot,
            layout.slot_count,
        );
    }

    let mut data = vec![0u8; layout.total_bytes()];
    let mut populated = Vec::with_capacity(slots.len());

    for slot in 0..layout.slot_count {
        let Some(tensor) = slots.get(&slot) else {
            tracing::warn!("slot {slot}: no source, emitting zero-filled sector");
            continue;
        };

        let bytes = tensor.as_bytes();
        if bytes.len() > layout.sector_size {
            return Err(PackError::SectorOverflow {
                slot,
                len: bytes.len(),
                sector_size: layout.sector_size,
            });
        }

        let offset = layout.offset(slot);
        data[offset..offset + bytes.len()].copy_from_slice(bytes);
        populated.push(slot);
        tracing::debug!(
            "slot {}: {} bytes at offset {:#X} (flash {:#X})",
            slot,
            bytes.len(),
            offset,
            layout.address(slot),
        );
    }

    Ok(FlashImage::new(*layout, data, populated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::{DType, Shape};

    fn tensor(fill: u8, len: usize) -> RawTensor {
        RawTensor::from_bytes(Shape::vector(len), DType::U8, vec![fill; len]).unwrap()
    }

    fn layout(sector: usize, slots: usize) -> SectorLayout {
        SectorLayout::new(sector, slots).unwrap()
    }

    #[test]
    fn test_only_slot_three_populated() {
        let payload: Vec<u8> = (0..784).map(|i| (i % 251) as u8 + 1).collect();
        let t = RawTensor::from_bytes(Shape::hwc(28, 28, 1), DType::U8, payload.clone()).unwrap();
        let slots = BTreeMap::from([(3, t)]);

        let img = pack(&slots, &layout(4096, 10)).unwrap();
        let bytes = img.as_bytes();
        assert_eq!(bytes.len(), 40960);
        assert_eq!(&bytes[3 * 4096..3 * 4096 + 784], &payload[..]);
        assert!(bytes[..3 * 4096].iter().all(|&b| b == 0));
        assert!(bytes[3 * 4096 + 784..].iter().all(|&b| b == 0));
        assert_eq!(img.populated_slots(), &[3]);
        assert_eq!(img.missing_slots(), vec![0, 1, 2, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_length_invariant_regardless_of_sources() {
        for (sector, count) in [(16, 1), (64, 3), (4096, 10), (512, 7)] {
            let l = layout(sector, count);
            let empty = pack(&BTreeMap::new(), &l).unwrap();
            assert_eq!(empty.len(), sector * count);

            let full: BTreeMap<_, _> = (0..count).map(|s| (s, tensor(s as u8, sector))).collect();
            assert_eq!(pack(&full, &l).unwrap().len(), sector * count);
        }
    }

    #[test]
    fn test_missing_slot_does_not_shift_offsets() {
        let slots = BTreeMap::from([(0, tensor(0xAA, 4)), (2, tensor(0xBB, 4))]);
        let img = pack(&slots, &layout(8, 3)).unwrap();
        assert_eq!(img.sector(0).unwrap(), &[0xAA, 0xAA, 0xAA, 0xAA, 0, 0, 0, 0]);
        assert_eq!(img.sector(1).unwrap(), &[0; 8]);
        assert_eq!(img.sector(2).unwrap(), &[0xBB, 0xBB, 0xBB, 0xBB, 0, 0, 0, 0]);
        assert!(img.sector(3).is_none());
    }

    #[test]
    fn test_deterministic() {
        let slots = BTreeMap::from([(1, tensor(7, 10)), (4, tensor(9, 3))]);
        let a = pack(&slots, &layout(32, 5)).unwrap();
        let b = pack(&slots.clone(), &layout(32, 5)).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_sector_overflow() {
        let slots = BTreeMap::from([(1, tensor(1, 17))]);
        let err = pack(&slots, &layout(16, 2)).unwrap_err();
        assert!(matches!(
            err,
            PackError::SectorOverflow {
                slot: 1,
                len: 17,
                sector_size: 16
            }
        ));
    }

    #[test]
    fn test_exact_fit_and_out_of_range_slot() {
        let slots = BTreeMap::from([(0, tensor(5, 16)), (9, tensor(6, 4))]);
        let img = pack(&slots, &layout(16, 2)).unwrap();
        assert_eq!(img.sector(0).unwrap(), &[5; 16]);
        assert_eq!(img.len(), 32);
        assert_eq!(img.populated_slots(), &[0]);
    }

    #[test]
    fn test_write_to() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mnist_images.bin");
        let img = pack(&BTreeMap::from([(0, tensor(1, 4))]), &layout(8, 2)).unwrap();
        img.write_to(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), img.as_bytes());
        assert!(img.summary().contains("16 bytes"));
    }
}
