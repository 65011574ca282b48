// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The fixed-layout raw tensor carried between pipeline stages.

use crate::{DType, Shape, TensorError};

/// An owned, exact-length byte encoding of one model input.
///
/// `RawTensor` is what ends up in a `.raw` file and in one flash sector.
/// Its byte length always equals `shape.size_bytes(dtype)`; every
/// constructor enforces this.
///
/// # Memory Layout
/// Row-major (C) order, multi-byte elements little-endian. For images the
/// order is height, then width, then channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTensor {
    shape: Shape,
    dtype: DType,
    data: Vec<u8>,
}

impl RawTensor {
    /// Creates a new tensor filled with zeros.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{RawTensor, Shape, DType};
    /// let t = RawTensor::zeros(Shape::hwc(28, 28, 1), DType::U8);
    /// assert_eq!(t.size_bytes(), 784);
    /// ```
    pub fn zeros(shape: Shape, dtype: DType) -> Self {
        let size = shape.size_bytes(dtype);
        Self {
            shape,
            dtype,
            data: vec![0u8; size],
        }
    }

    /// Creates a tensor from raw bytes.
    ///
    /// Returns an error if the buffer size does not match `shape.size_bytes(dtype)`.
    pub fn from_bytes(shape: Shape, dtype: DType, data: Vec<u8>) -> Result<Self, TensorError> {
        let expected = shape.size_bytes(dtype);
        if data.len() != expected {
            return Err(TensorError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, dtype, data })
    }

    /// Creates an `F32` tensor from a slice of values, stored little-endian.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{RawTensor, Shape};
    /// let t = RawTensor::from_f32(Shape::vector(3), &[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(t.to_f32_vec().unwrap(), vec![1.0, 2.0, 3.0]);
    /// ```
    pub fn from_f32(shape: Shape, values: &[f32]) -> Result<Self, TensorError> {
        let expected_elements = shape.num_elements();
        if values.len() != expected_elements {
            return Err(TensorError::BufferSizeMismatch {
                expected: expected_elements * DType::F32.size_bytes(),
                actual: values.len() * DType::F32.size_bytes(),
            });
        }
        let data = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        Ok(Self {
            shape,
            dtype: DType::F32,
            data,
        })
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the tensor's data type.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Returns the raw byte slice backing this tensor.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the tensor and returns its byte buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Returns the memory footprint of this tensor in bytes.
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Returns the same bytes under a different shape with the same element count.
    ///
    /// Used to add or drop the leading batch dimension without copying layout.
    pub fn reshape(self, shape: Shape) -> Result<Self, TensorError> {
        Self::from_bytes(shape, self.dtype, self.data)
    }

    /// Decodes the buffer as little-endian `f32` values.
    ///
    /// Returns [`TensorError::UnsupportedDType`] unless the dtype is `F32`.
    pub fn to_f32_vec(&self) -> Result<Vec<f32>, TensorError> {
        if self.dtype != DType::F32 {
            return Err(TensorError::UnsupportedDType {
                op: "to_f32_vec",
                dtype: self.dtype,
            });
        }
        Ok(self
            .data
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let t = RawTensor::zeros(Shape::hwc(28, 28, 1), DType::U8);
        assert_eq!(t.size_bytes(), 784);
        assert_eq!(t.shape(), &Shape::hwc(28, 28, 1));
        assert_eq!(t.dtype(), DType::U8);
        assert!(t.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_f32_little_endian() {
        let t = RawTensor::from_f32(Shape::vector(2), &[1.0, 2.0]).unwrap();
        assert_eq!(&t.as_bytes()[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&t.as_bytes()[4..8], &2.0f32.to_le_bytes());
        assert_eq!(t.to_f32_vec().unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_from_bytes_size_mismatch() {
        let result = RawTensor::from_bytes(Shape::hwc(28, 28, 1), DType::U8, vec![0u8; 783]);
        assert!(matches!(
            result,
            Err(TensorError::BufferSizeMismatch {
                expected: 784,
                actual: 783
            })
        ));
    }

    #[test]
    fn test_reshape_keeps_bytes() {
        let data: Vec<u8> = (0..12).collect();
        let t = RawTensor::from_bytes(Shape::hwc(2, 2, 3), DType::U8, data.clone()).unwrap();
        let b = t.reshape(Shape::hwc(2, 2, 3).with_batch()).unwrap();
        assert_eq!(b.as_bytes(), &data[..]);
        assert!(b.clone().reshape(Shape::vector(13)).is_err());
    }

    #[test]
    fn test_to_f32_rejects_u8() {
        let t = RawTensor::zeros(Shape::vector(4), DType::U8);
        assert!(t.to_f32_vec().is_err());
    }
}
