// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `.raw` tensor files: headerless, exactly `shape × dtype` bytes.

use crate::{EncodeError, TargetSpec};
use std::path::Path;
use tensor_core::RawTensor;

/// Writes the tensor bytes verbatim. No transposition, no header.
pub fn write_raw(tensor: &RawTensor, path: &Path) -> Result<(), EncodeError> {
    std::fs::write(path, tensor.as_bytes()).map_err(|e| EncodeError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!("wrote {} bytes to {}", tensor.size_bytes(), path.display());
    Ok(())
}

/// Reads a `.raw` file back as a tensor of the target's shape and dtype.
///
/// The file must be exactly `target.size_bytes()` long.
pub fn read_raw(path: &Path, target: &TargetSpec) -> Result<RawTensor, EncodeError> {
    let data = std::fs::read(path).map_err(|e| EncodeError::SourceRead {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    let expected = target.size_bytes();
    if data.len() != expected {
        return Err(EncodeError::SourceRead {
            path: path.to_path_buf(),
            detail: format!("expected {expected} bytes, found {}", data.len()),
        });
    }
    Ok(RawTensor::from_bytes(
        target.tensor_shape(),
        target.dtype,
        data,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encode_pixels, IntensityImage};

    #[test]
    fn test_written_file_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.raw");
        let values: Vec<f32> = (0..784).map(|i| (i % 256) as f32).collect();
        let image = IntensityImage::new(28, 28, 1, values).unwrap();
        let tensor = encode_pixels(&image, &TargetSpec::default()).unwrap();

        write_raw(&tensor, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), tensor.as_bytes());

        let back = read_raw(&path, &TargetSpec::default()).unwrap();
        assert_eq!(back, tensor);
    }

    #[test]
    fn test_read_wrong_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.raw");
        std::fs::write(&path, [0u8; 10]).unwrap();
        let err = read_raw(&path, &TargetSpec::default()).unwrap_err();
        assert!(err.to_string().contains("expected 784 bytes, found 10"));
    }

    #[test]
    fn test_write_into_missing_dir() {
        let tensor = RawTensor::zeros(TargetSpec::default().tensor_shape(), tensor_core::DType::U8);
        let err = write_raw(&tensor, Path::new("/no/such/dir/x.raw")).unwrap_err();
        assert!(matches!(err, EncodeError::Write { .. }));
    }
}
