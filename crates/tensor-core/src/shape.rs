// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shapes of model inputs and outputs.

use crate::DType;
use std::fmt;

/// Dimensions of a [`crate::RawTensor`], outermost first.
///
/// Image inputs follow the NHWC convention of the K210 toolchain: `[H, W, C]`,
/// or `[1, H, W, C]` when the model declares a batch dimension. Both describe
/// the same bytes; the leading 1 changes the declared shape only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// # Examples
    /// ```
    /// use tensor_core::Shape;
    /// let s = Shape::new(vec![1, 28, 28, 1]);
    /// assert_eq!(s.num_elements(), 784);
    /// assert!(s.has_batch());
    /// ```
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// A flat shape of `len` elements.
    pub fn vector(len: usize) -> Self {
        Self::new(vec![len])
    }

    /// `[height, width, channels]`.
    pub fn hwc(height: usize, width: usize, channels: usize) -> Self {
        Self::new(vec![height, width, channels])
    }

    /// This shape with a leading batch dimension of 1.
    pub fn with_batch(&self) -> Self {
        let dims = std::iter::once(1).chain(self.dims.iter().copied()).collect();
        Self::new(dims)
    }

    /// `true` for `[1, H, W, C]`.
    pub fn has_batch(&self) -> bool {
        matches!(self.dims.as_slice(), [1, _, _, _])
    }

    /// Product of all dimensions (1 for an empty shape).
    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Bytes needed to hold this shape in `dtype`.
    pub fn size_bytes(&self, dtype: DType) -> usize {
        self.num_elements() * dtype.size_bytes()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self.dims.iter().map(usize::to_string).collect();
        write!(f, "[{}]", dims.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hwc_has_no_batch() {
        let s = Shape::hwc(28, 28, 1);
        assert_eq!(s.dims(), &[28, 28, 1]);
        assert_eq!(s.num_elements(), 784);
        assert!(!s.has_batch());
    }

    #[test]
    fn test_with_batch_keeps_element_count() {
        let s = Shape::hwc(64, 64, 3).with_batch();
        assert_eq!(s.dims(), &[1, 64, 64, 3]);
        assert!(s.has_batch());
        assert_eq!(s.num_elements(), 64 * 64 * 3);
        assert_eq!(s.size_bytes(DType::U8), Shape::hwc(64, 64, 3).size_bytes(DType::U8));
    }

    #[test]
    fn test_vector_and_empty() {
        assert_eq!(Shape::vector(10).num_elements(), 10);
        assert_eq!(Shape::new(vec![]).num_elements(), 1);
        assert!(!Shape::vector(4).has_batch());
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::new(vec![1, 28, 28, 1]).to_string(), "[1, 28, 28, 1]");
        assert_eq!(Shape::new(vec![]).to_string(), "[]");
    }

    #[test]
    fn test_size_bytes() {
        let s = Shape::hwc(28, 28, 1);
        assert_eq!(s.size_bytes(DType::U8), 784);
        assert_eq!(s.size_bytes(DType::F32), 3136);
    }

    #[test]
    fn test_serde_is_plain_list() {
        let json = serde_json::to_string(&Shape::hwc(2, 3, 1)).unwrap();
        assert_eq!(json, "[2,3,1]");
    }
}
