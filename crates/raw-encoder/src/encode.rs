// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Source → [`RawTensor`] conversion.

use crate::{EncodeError, IntensityImage, TargetSpec, TensorSource};
use tensor_core::{DType, RawTensor, Shape};

/// Encodes a source into the target model's raw input layout.
///
/// Steps:
/// 1. Reject dtypes without a cast rule.
/// 2. Load the source with the target's channel count.
/// 3. Require the exact `[H, W, C]` geometry (no resize, no crop).
/// 4. Cast every value with the dtype's clip rule.
///
/// # Errors
/// [`EncodeError::UnsupportedDtype`], [`EncodeError::SourceRead`] or
/// [`EncodeError::ShapeMismatch`].
pub fn encode(source: &TensorSource, target: &TargetSpec) -> Result<RawTensor, EncodeError> {
    if !target.dtype.has_cast_rule() {
        return Err(EncodeError::UnsupportedDtype {
            dtype: target.dtype,
        });
    }
    let image = source.load(target)?;
    encode_checked(&image, target, &source.origin())
}

/// Encodes already-decoded intensity data.
pub fn encode_pixels(image: &IntensityImage, target: &TargetSpec) -> Result<RawTensor, EncodeError> {
    if !target.dtype.has_cast_rule() {
        return Err(EncodeError::UnsupportedDtype {
            dtype: target.dtype,
        });
    }
    encode_checked(image, target, "<memory>")
}

fn encode_checked(
    image: &IntensityImage,
    target: &TargetSpec,
    origin: &str,
) -> Result<RawTensor, EncodeError> {
    let expected = target.image_shape();
    if image.shape() != expected {
        return Err(EncodeError::ShapeMismatch {
            origin: origin.to_string(),
            expected,
            actual: image.shape(),
        });
    }
    // The fields are public, so the buffer may disagree with the geometry.
    if image.values.len() != expected.num_elements() {
        return Err(EncodeError::ShapeMismatch {
            origin: origin.to_string(),
            expected,
            actual: Shape::vector(image.values.len()),
        });
    }

    let bytes = cast_values(&image.values, target.dtype, origin)?;
    let tensor = RawTensor::from_bytes(target.tensor_shape(), target.dtype, bytes)?;

    tracing::debug!(
        "encoded '{}' as {} {} ({} bytes, batch_dim={})",
        origin,
        tensor.shape(),
        tensor.dtype(),
        tensor.size_bytes(),
        target.batch_dim,
    );
    Ok(tensor)
}

/// Casts intensity values to the byte encoding of `dtype`.
///
/// Integer targets round to nearest and clip to the dtype range (`[0, 255]`
/// for `u8`, `[-128, 127]` for `i8`); they never wrap. `f32` is stored
/// unchanged, little-endian.
pub fn cast_values(values: &[f32], dtype: DType, origin: &str) -> Result<Vec<u8>, EncodeError> {
    if let Some((lo, hi)) = dtype.clip_range() {
        if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(EncodeError::SourceRead {
                path: origin.into(),
                detail: format!("non-finite value {v} at element {i}"),
            });
        }
        let clipped = values.iter().map(|v| v.round().clamp(lo, hi));
        return Ok(match dtype {
            DType::U8 => clipped.map(|v| v as u8).collect(),
            // `as i8` then reinterpret as the two's-complement byte.
            _ => clipped.map(|v| (v as i8) as u8).collect(),
        });
    }

    match dtype {
        DType::F32 => Ok(values.iter().flat_map(|v| v.to_le_bytes()).collect()),
        other => Err(EncodeError::UnsupportedDtype { dtype: other }),
    }
}
