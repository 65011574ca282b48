// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pixel sources accepted by the encoder.

use crate::{EncodeError, TargetSpec};
use std::path::{Path, PathBuf};
use tensor_core::Shape;

/// Decoded intensity data in row-major `[H, W, C]` order.
///
/// Values are kept as `f32` so that out-of-range inputs survive until the
/// dtype cast, where they are clipped deterministically.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityImage {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
    pub values: Vec<f32>,
}

impl IntensityImage {
    /// Wraps a buffer, checking that it holds `height * width * channels` values.
    pub fn new(
        height: usize,
        width: usize,
        channels: usize,
        values: Vec<f32>,
    ) -> Result<Self, EncodeError> {
        let expected = Shape::hwc(height, width, channels);
        if values.len() != expected.num_elements() {
            return Err(EncodeError::ShapeMismatch {
                origin: "<memory>".into(),
                expected,
                actual: Shape::vector(values.len()),
            });
        }
        Ok(Self {
            height,
            width,
            channels,
            values,
        })
    }

    /// An image of the given geometry filled with one value.
    pub fn filled(height: usize, width: usize, channels: usize, value: f32) -> Self {
        Self {
            height,
            width,
            channels,
            values: vec![value; height * width * channels],
        }
    }

    /// Returns the `[H, W, C]` shape of this image.
    pub fn shape(&self) -> Shape {
        Shape::hwc(self.height, self.width, self.channels)
    }
}

/// Where an encoder input comes from.
#[derive(Debug, Clone)]
pub enum TensorSource {
    /// An image file decoded with the `image` crate (PNG, JPEG).
    ImageFile(PathBuf),
    /// A headerless `u8` buffer of exactly `H * W * C` bytes.
    RawFile(PathBuf),
    /// Already-decoded intensity data.
    Pixels(IntensityImage),
}

impl TensorSource {
    /// Picks the source kind from the file extension: `.raw` is a raw buffer,
    /// anything else is decoded as an image.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let is_raw = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("raw"));
        if is_raw {
            Self::RawFile(path.to_path_buf())
        } else {
            Self::ImageFile(path.to_path_buf())
        }
    }

    /// A short label for diagnostics.
    pub fn origin(&self) -> String {
        match self {
            Self::ImageFile(p) | Self::RawFile(p) => p.display().to_string(),
            Self::Pixels(_) => "<memory>".into(),
        }
    }

    /// Loads the source as intensity data with the target's channel count.
    ///
    /// Channel conversion: 1 → luma, 3 → RGB, 4 → RGBA. No resizing is
    /// performed; the caller checks the spatial geometry.
    pub fn load(&self, target: &TargetSpec) -> Result<IntensityImage, EncodeError> {
        match self {
            Self::ImageFile(path) => load_image(path, target.channels),
            Self::RawFile(path) => load_raw_u8(path, target),
            Self::Pixels(image) => Ok(image.clone()),
        }
    }
}

fn load_image(path: &Path, channels: usize) -> Result<IntensityImage, EncodeError> {
    let img = image::open(path).map_err(|e| EncodeError::SourceRead {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    let (width, height) = (img.width() as usize, img.height() as usize);

    let bytes = match channels {
        1 => img.to_luma8().into_raw(),
        3 => img.to_rgb8().into_raw(),
        4 => img.to_rgba8().into_raw(),
        other => {
            return Err(EncodeError::ShapeMismatch {
                origin: path.display().to_string(),
                expected: Shape::hwc(height, width, other),
                actual: Shape::hwc(height, width, img.color().channel_count() as usize),
            })
        }
    };

    Ok(IntensityImage {
        height,
        width,
        channels,
        values: bytes.into_iter().map(f32::from).collect(),
    })
}

fn load_raw_u8(path: &Path, target: &TargetSpec) -> Result<IntensityImage, EncodeError> {
    let bytes = std::fs::read(path).map_err(|e| EncodeError::SourceRead {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    let expected = target.image_shape();
    if bytes.len() != expected.num_elements() {
        return Err(EncodeError::ShapeMismatch {
            origin: path.display().to_string(),
            expected,
            actual: Shape::vector(bytes.len()),
        });
    }
    Ok(IntensityImage {
        height: target.height,
        width: target.width,
        channels: target.channels,
        values: bytes.into_iter().map(f32::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_kind() {
        assert!(matches!(TensorSource::from_path("a/3.raw"), TensorSource::RawFile(_)));
        assert!(matches!(TensorSource::from_path("a/3.RAW"), TensorSource::RawFile(_)));
        assert!(matches!(TensorSource::from_path("a/3.png"), TensorSource::ImageFile(_)));
        assert!(matches!(TensorSource::from_path("a/3"), TensorSource::ImageFile(_)));
    }

    #[test]
    fn test_intensity_image_len_checked() {
        assert!(IntensityImage::new(2, 2, 1, vec![0.0; 4]).is_ok());
        assert!(matches!(
            IntensityImage::new(2, 2, 1, vec![0.0; 5]),
            Err(EncodeError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_image_is_source_read() {
        let src = TensorSource::from_path("/definitely/not/here.png");
        let err = src.load(&TargetSpec::default()).unwrap_err();
        assert!(matches!(err, EncodeError::SourceRead { .. }));
    }

    #[test]
    fn test_corrupt_image_is_source_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        let err = TensorSource::from_path(&path)
            .load(&TargetSpec::default())
            .unwrap_err();
        assert!(matches!(err, EncodeError::SourceRead { .. }));
    }

    #[test]
    fn test_rgb_image_to_luma() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("white.png");
        image::RgbImage::from_pixel(4, 3, image::Rgb([255, 255, 255]))
            .save(&path)
            .unwrap();
        let target = TargetSpec::new(3, 4, 1, tensor_core::DType::U8, false);
        let img = TensorSource::from_path(&path).load(&target).unwrap();
        assert_eq!((img.height, img.width, img.channels), (3, 4, 1));
        assert!(img.values.iter().all(|&v| v == 255.0));
    }

    #[test]
    fn test_raw_wrong_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0.raw");
        std::fs::write(&path, vec![0u8; 100]).unwrap();
        let err = TensorSource::from_path(&path)
            .load(&TargetSpec::default())
            .unwrap_err();
        assert!(matches!(err, EncodeError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_unsupported_channel_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.png");
        image::GrayImage::new(2, 2).save(&path).unwrap();
        let target = TargetSpec::new(2, 2, 2, tensor_core::DType::U8, false);
        assert!(matches!(
            TensorSource::from_path(&path).load(&target),
            Err(EncodeError::ShapeMismatch { .. })
        ));
    }
}
