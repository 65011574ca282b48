// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Batch conversion of an image directory into `.raw` files.

use crate::{encode, write_raw, EncodeError, TargetSpec, TensorSource};
use std::path::{Path, PathBuf};

/// One converted image.
#[derive(Debug, Clone)]
pub struct ConvertedImage {
    /// The PNG that was read.
    pub source: PathBuf,
    /// The `.raw` file that was written (same stem).
    pub raw_path: PathBuf,
    /// Bytes written.
    pub size_bytes: usize,
}

/// Converts every `.png` in `input_dir` into `<stem>.raw` in `output_dir`.
///
/// Files are processed in ascending file-name order, never directory order;
/// `limit` keeps only the first N of that order. `output_dir` is created if
/// needed. The first failing image aborts the batch with its error.
pub fn convert_dir(
    input_dir: &Path,
    output_dir: &Path,
    target: &TargetSpec,
    limit: Option<usize>,
) -> Result<Vec<ConvertedImage>, EncodeError> {
    let mut images = list_with_extension(input_dir, "png")?;
    if let Some(n) = limit {
        images.truncate(n);
    }

    std::fs::create_dir_all(output_dir).map_err(|e| EncodeError::Write {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        "converting {} images from {} as {} {}",
        images.len(),
        input_dir.display(),
        target.tensor_shape(),
        target.dtype,
    );

    let mut converted = Vec::with_capacity(images.len());
    for source in images {
        let tensor = encode(&TensorSource::ImageFile(source.clone()), target)?;
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let raw_path = output_dir.join(format!("{stem}.raw"));
        write_raw(&tensor, &raw_path)?;
        converted.push(ConvertedImage {
            source,
            raw_path,
            size_bytes: tensor.size_bytes(),
        });
    }
    Ok(converted)
}

/// Lists files in `dir` with the given extension (case-insensitive), sorted by name.
pub(crate) fn list_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, EncodeError> {
    let read_err = |e: std::io::Error| EncodeError::SourceRead {
        path: dir.to_path_buf(),
        detail: e.to_string(),
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str, value: u8) {
        image::GrayImage::from_pixel(28, 28, image::Luma([value]))
            .save(dir.join(name))
            .unwrap();
    }

    #[test]
    fn test_convert_sorted_and_limited() {
        let input = tempfile::tempdir().unwrap();
        let output = input.path().join("raw_images");
        write_png(input.path(), "00002_1.png", 2);
        write_png(input.path(), "00000_7.png", 0);
        write_png(input.path(), "00001_2.png", 1);
        std::fs::write(input.path().join("notes.txt"), "ignore me").unwrap();

        let out = convert_dir(input.path(), &output, &TargetSpec::default(), Some(2)).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[0].source.ends_with("00000_7.png"));
        assert!(out[1].source.ends_with("00001_2.png"));
        assert!(out[0].raw_path.ends_with("raw_images/00000_7.raw"));

        let bytes = std::fs::read(&out[1].raw_path).unwrap();
        assert_eq!(bytes.len(), 784);
        assert!(bytes.iter().all(|&b| b == 1));
        assert!(!output.join("00002_1.raw").exists());
    }

    #[test]
    fn test_convert_missing_dir() {
        let err = convert_dir(
            Path::new("/no/such/images"),
            Path::new("/tmp/unused"),
            &TargetSpec::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, EncodeError::SourceRead { .. }));
    }
}
