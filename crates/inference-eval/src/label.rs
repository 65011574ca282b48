// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Ground-truth labels from sample file names.

use crate::EvalError;
use std::path::Path;

/// Extracts the label from a sample path.
///
/// The label is the unsigned integer between the last `_` and the
/// extension: `00042_7.raw` → 7, `test_img_3.png` → 3. A name without an
/// underscore or with a non-numeric label is rejected.
pub fn parse_label(path: &Path) -> Result<usize, EvalError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let invalid = || EvalError::InvalidLabelFormat { name: name.clone() };

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(invalid)?;
    let (_, label) = stem.rsplit_once('_').ok_or_else(invalid)?;

    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    label.parse().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names() {
        assert_eq!(parse_label(Path::new("00042_7.raw")).unwrap(), 7);
        assert_eq!(parse_label(Path::new("raw_images/test_img_3.png")).unwrap(), 3);
        assert_eq!(parse_label(Path::new("a_b_12.raw")).unwrap(), 12);
    }

    #[test]
    fn test_rejected_names() {
        for name in ["7.raw", "sample_.raw", "sample_x.raw", "sample_-1.raw", "sample_+1.raw", ""] {
            let err = parse_label(Path::new(name)).unwrap_err();
            assert!(
                matches!(err, EvalError::InvalidLabelFormat { .. }),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_error_names_the_sample() {
        let err = parse_label(Path::new("dir/digit.raw")).unwrap_err();
        assert!(err.to_string().contains("digit.raw"));
    }
}
