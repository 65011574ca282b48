// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for flash image packing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flash_packer::{pack, SectorLayout};
use std::collections::BTreeMap;
use tensor_core::{DType, RawTensor, Shape};

fn bench_pack_mnist(c: &mut Criterion) {
    let layout = SectorLayout::default();
    let slots: BTreeMap<usize, RawTensor> = (0..layout.slot_count)
        .map(|s| {
            let data = vec![s as u8; 784];
            (s, RawTensor::from_bytes(Shape::hwc(28, 28, 1), DType::U8, data).unwrap())
        })
        .collect();

    c.bench_function("pack_10x4096_full", |b| {
        b.iter(|| pack(black_box(&slots), black_box(&layout)).unwrap())
    });

    let sparse: BTreeMap<usize, RawTensor> = slots.into_iter().filter(|(s, _)| s % 3 == 0).collect();
    c.bench_function("pack_10x4096_sparse", |b| {
        b.iter(|| pack(black_box(&sparse), black_box(&layout)).unwrap())
    });
}

criterion_group!(benches, bench_pack_mnist);
criterion_main!(benches);
