// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Building the slot → tensor map from a directory of per-slot files.

use crate::SectorLayout;
use raw_encoder::{encode, TargetSpec, TensorSource};
use std::collections::BTreeMap;
use std::path::Path;
use tensor_core::RawTensor;

/// File extensions tried for each slot, in priority order.
pub const SLOT_EXTENSIONS: [&str; 3] = ["png", "jpg", "raw"];

/// Looks up `<slot>.png`, `<slot>.jpg` and `<slot>.raw` (first match wins)
/// in `dir` for every slot of the layout and encodes what it finds.
///
/// Slots are probed by index, so the result never depends on directory
/// iteration order. A slot with no file, or whose file fails to encode, is
/// left out of the map with a warning; [`crate::pack`] then zero-fills it.
pub fn resolve_slot_sources(
    dir: &Path,
    layout: &SectorLayout,
    target: &TargetSpec,
) -> BTreeMap<usize, RawTensor> {
    let mut slots = BTreeMap::new();

    for slot in 0..layout.slot_count {
        let Some(path) = SLOT_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{slot}.{ext}")))
            .find(|p| p.is_file())
        else {
            tracing::warn!(
                "slot {slot}: no {slot}.png, {slot}.jpg or {slot}.raw in {}",
                dir.display()
            );
            continue;
        };

        match encode(&TensorSource::from_path(&path), target) {
            Ok(tensor) => {
                tracing::info!(
                    "slot {}: {} ({} bytes)",
                    slot,
                    path.display(),
                    tensor.size_bytes(),
                );
                slots.insert(slot, tensor);
            }
            Err(e) => {
                tracing::warn!("slot {slot}: skipping {}: {e}", path.display());
            }
        }
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack;

    #[test]
    fn test_resolution_priority_and_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let target = TargetSpec::new(28, 28, 1, tensor_core::DType::U8, false);

        // Slot 0: png wins over raw.
        image::GrayImage::from_pixel(28, 28, image::Luma([10]))
            .save(dir.path().join("0.png"))
            .unwrap();
        std::fs::write(dir.path().join("0.raw"), vec![99u8; 784]).unwrap();
        // Slot 2: raw only.
        std::fs::write(dir.path().join("2.raw"), vec![7u8; 784]).unwrap();
        // Slot 3: corrupt raw → skipped.
        std::fs::write(dir.path().join("3.raw"), vec![1u8; 12]).unwrap();

        let layout = SectorLayout::new(4096, 4).unwrap();
        let slots = resolve_slot_sources(dir.path(), &layout, &target);
        assert_eq!(slots.keys().copied().collect::<Vec<_>>(), vec![0, 2]);
        assert!(slots[&0].as_bytes().iter().all(|&b| b == 10));
        assert!(slots[&2].as_bytes().iter().all(|&b| b == 7));

        let img = pack(&slots, &layout).unwrap();
        assert_eq!(img.len(), 4 * 4096);
        assert_eq!(img.sector(2).unwrap()[783], 7);
        assert!(img.sector(3).unwrap().iter().all(|&b| b == 0));
    }
}
