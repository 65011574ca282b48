// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Fixed-layout tensor types shared by every stage of the deployment pipeline.
//!
//! This crate provides:
//! - [`RawTensor`] — an owned, exact-length byte encoding of one model input.
//! - [`Shape`] — row-major dimension descriptors.
//! - [`DType`] — supported element data types (u8, i8, f32, f16, bf16).
//! - Output activations: numerically stable [`softmax`] and [`argmax`].
//!
//! # Design Goals
//! - A `RawTensor` can only exist with a byte length equal to
//!   `shape.size_bytes(dtype)`.
//! - Byte order is little-endian for multi-byte dtypes, matching the K210.
//! - Clean error types via `thiserror`.

mod dtype;
mod error;
mod ops;
mod shape;
mod tensor;

pub use dtype::DType;
pub use error::TensorError;
pub use ops::{argmax, softmax, softmax_in_place};
pub use shape::Shape;
pub use tensor::RawTensor;
