// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Declared input geometry of a target model.

use tensor_core::{DType, Shape};

/// Input description of the model a tensor is encoded for.
///
/// The byte layout is always row-major height, width, channel. Whether the
/// tensor shape carries a leading batch dimension of 1 is declared here per
/// model and never inferred from the source.
///
/// # TOML Format
/// ```toml
/// height = 28
/// width = 28
/// channels = 1
/// dtype = "u8"
/// batch_dim = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TargetSpec {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
    pub dtype: DType,
    /// Prepend a batch dimension of 1 (`[1, H, W, C]`).
    #[serde(default)]
    pub batch_dim: bool,
}

impl TargetSpec {
    /// Creates a target description.
    pub fn new(height: usize, width: usize, channels: usize, dtype: DType, batch_dim: bool) -> Self {
        Self {
            height,
            width,
            channels,
            dtype,
            batch_dim,
        }
    }

    /// The `[H, W, C]` image shape, without any batch dimension.
    pub fn image_shape(&self) -> Shape {
        Shape::hwc(self.height, self.width, self.channels)
    }

    /// The tensor shape written to disk: `[1, H, W, C]` or `[H, W, C]`.
    pub fn tensor_shape(&self) -> Shape {
        let shape = self.image_shape();
        if self.batch_dim {
            shape.with_batch()
        } else {
            shape
        }
    }

    /// Exact byte length of an encoded tensor.
    pub fn size_bytes(&self) -> usize {
        self.tensor_shape().size_bytes(self.dtype)
    }

    /// Number of pixels per channel plane.
    pub fn pixels(&self) -> usize {
        self.height * self.width
    }
}

/// 28x28 grayscale `u8` with a batch dimension, as compiled for the MNIST kmodel.
impl Default for TargetSpec {
    fn default() -> Self {
        Self::new(28, 28, 1, DType::U8, true)
    }
}
