// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Operator-facing statistics over an encoded tensor.

use tensor_core::{DType, RawTensor, TensorError};

/// Summary statistics of a tensor's element values.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TensorStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub non_zero: usize,
    pub total: usize,
}

impl TensorStats {
    /// Computes statistics over every element of the tensor.
    pub fn from_tensor(tensor: &RawTensor) -> Result<Self, TensorError> {
        let values = element_values(tensor)?;
        if values.is_empty() {
            return Err(TensorError::EmptyInput { op: "stats" });
        }
        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let sum: f64 = values.iter().map(|&v| v as f64).sum();
        Ok(Self {
            min,
            max,
            mean: (sum / values.len() as f64) as f32,
            non_zero: values.iter().filter(|&&v| v != 0.0).count(),
            total: values.len(),
        })
    }

    /// Share of non-zero elements, in percent.
    pub fn non_zero_pct(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.non_zero as f64 * 100.0 / self.total as f64
        }
    }

    /// One-line summary for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "min {:.0}, max {:.0}, mean {:.2}, non-zero {} ({:.1}%)",
            self.min,
            self.max,
            self.mean,
            self.non_zero,
            self.non_zero_pct(),
        )
    }
}

/// Renders the tensor as rows of `o` (non-zero pixel) and `.` (zero pixel).
///
/// `width` is the image width and `channels` the number of interleaved
/// channels; a pixel is non-zero if any of its channels is.
pub fn ascii_preview(tensor: &RawTensor, width: usize, channels: usize) -> Result<String, TensorError> {
    let values = element_values(tensor)?;
    let pixel = channels.max(1);
    let row_len = width.max(1) * pixel;

    let mut out = String::with_capacity(values.len() / pixel + values.len() / row_len + 1);
    for row in values.chunks(row_len) {
        for px in row.chunks(pixel) {
            out.push(if px.iter().any(|&v| v != 0.0) { 'o' } else { '.' });
        }
        out.push('\n');
    }
    Ok(out)
}

fn element_values(tensor: &RawTensor) -> Result<Vec<f32>, TensorError> {
    match tensor.dtype() {
        DType::U8 => Ok(tensor.as_bytes().iter().map(|&b| b as f32).collect()),
        DType::I8 => Ok(tensor.as_bytes().iter().map(|&b| b as i8 as f32).collect()),
        DType::F32 => tensor.to_f32_vec(),
        dtype => Err(TensorError::UnsupportedDType { op: "stats", dtype }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::Shape;

    #[test]
    fn test_stats_u8() {
        let t = RawTensor::from_bytes(Shape::hwc(2, 2, 1), DType::U8, vec![0, 10, 0, 30]).unwrap();
        let s = TensorStats::from_tensor(&t).unwrap();
        assert_eq!(s.min, 0.0);
        assert_eq!(s.max, 30.0);
        assert!((s.mean - 10.0).abs() < 1e-6);
        assert_eq!(s.non_zero, 2);
        assert!((s.non_zero_pct() - 50.0).abs() < 1e-9);
        assert!(s.summary().contains("non-zero 2 (50.0%)"));
    }

    #[test]
    fn test_stats_i8_signed() {
        let t = RawTensor::from_bytes(Shape::vector(2), DType::I8, vec![0xFF, 0x01]).unwrap();
        let s = TensorStats::from_tensor(&t).unwrap();
        assert_eq!(s.min, -1.0);
        assert_eq!(s.max, 1.0);
    }

    #[test]
    fn test_preview() {
        let t = RawTensor::from_bytes(Shape::hwc(2, 3, 1), DType::U8, vec![0, 5, 0, 1, 0, 0]).unwrap();
        assert_eq!(ascii_preview(&t, 3, 1).unwrap(), ".o.\no..\n");
    }

    #[test]
    fn test_preview_multichannel() {
        // 1x2 RGB: first pixel black, second has only blue.
        let t = RawTensor::from_bytes(Shape::hwc(1, 2, 3), DType::U8, vec![0, 0, 0, 0, 0, 9]).unwrap();
        assert_eq!(ascii_preview(&t, 2, 3).unwrap(), ".o\n");
    }

    #[test]
    fn test_f16_unsupported() {
        let t = RawTensor::zeros(Shape::vector(2), DType::F16);
        assert!(TensorStats::from_tensor(&t).is_err());
    }
}
