// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Supported tensor element data types.

use std::fmt;
use std::str::FromStr;

/// Enumerates the element types a [`crate::RawTensor`] can hold.
///
/// The encoder uses `DType` to decide the element width and the cast rule
/// applied to intensity values. Only [`DType::U8`], [`DType::I8`] and
/// [`DType::F32`] have a defined cast rule; the half-precision types can be
/// declared in a model description but not produced by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// 8-bit unsigned integer (K210 camera/image input).
    #[serde(alias = "uint8")]
    U8,
    /// 8-bit signed integer (int8-quantised input).
    #[serde(alias = "int8")]
    I8,
    /// 32-bit IEEE 754 floating point.
    #[serde(alias = "float32")]
    F32,
    /// 16-bit IEEE 754 floating point.
    F16,
    /// 16-bit brain floating point.
    BF16,
}

impl DType {
    /// Returns the size of a single element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            DType::U8 | DType::I8 => 1,
            DType::F16 | DType::BF16 => 2,
            DType::F32 => 4,
        }
    }

    /// Returns a human-readable label for this data type.
    pub fn as_str(self) -> &'static str {
        match self {
            DType::U8 => "u8",
            DType::I8 => "i8",
            DType::F32 => "f32",
            DType::F16 => "f16",
            DType::BF16 => "bf16",
        }
    }

    /// Returns the inclusive value range that integer dtypes are clipped to.
    ///
    /// `None` for floating-point types, which are stored unclipped.
    pub fn clip_range(self) -> Option<(f32, f32)> {
        match self {
            DType::U8 => Some((0.0, 255.0)),
            DType::I8 => Some((-128.0, 127.0)),
            DType::F32 | DType::F16 | DType::BF16 => None,
        }
    }

    /// Returns `true` if intensity values can be cast into this dtype.
    pub fn has_cast_rule(self) -> bool {
        matches!(self, DType::U8 | DType::I8 | DType::F32)
    }

    /// Parses a dtype name, accepting both short and long spellings
    /// (`"u8"`/`"uint8"`, `"f32"`/`"float32"`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "u8" | "uint8" => Some(DType::U8),
            "i8" | "int8" => Some(DType::I8),
            "f32" | "float32" | "float" => Some(DType::F32),
            "f16" | "float16" => Some(DType::F16),
            "bf16" | "bfloat16" => Some(DType::BF16),
            _ => None,
        }
    }

    /// Returns the spelling used by the `ncc` command line (`uint8`, `float32`, ...).
    pub fn ncc_name(self) -> &'static str {
        match self {
            DType::U8 => "uint8",
            DType::I8 => "int8",
            DType::F32 => "float32",
            DType::F16 => "float16",
            DType::BF16 => "bfloat16",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown dtype '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_bytes() {
        assert_eq!(DType::U8.size_bytes(), 1);
        assert_eq!(DType::I8.size_bytes(), 1);
        assert_eq!(DType::F16.size_bytes(), 2);
        assert_eq!(DType::F32.size_bytes(), 4);
    }

    #[test]
    fn test_parse() {
        assert_eq!(DType::parse("uint8"), Some(DType::U8));
        assert_eq!(DType::parse("U8"), Some(DType::U8));
        assert_eq!(DType::parse("int8"), Some(DType::I8));
        assert_eq!(DType::parse("float32"), Some(DType::F32));
        assert_eq!(DType::parse("BF16"), Some(DType::BF16));
        assert_eq!(DType::parse("garbage"), None);
        assert!("q4".parse::<DType>().is_err());
    }

    #[test]
    fn test_cast_rules() {
        assert!(DType::U8.has_cast_rule());
        assert!(DType::F32.has_cast_rule());
        assert!(!DType::F16.has_cast_rule());
        assert_eq!(DType::U8.clip_range(), Some((0.0, 255.0)));
        assert_eq!(DType::I8.clip_range(), Some((-128.0, 127.0)));
        assert_eq!(DType::F32.clip_range(), None);
    }

    #[test]
    fn test_display_matches_parse() {
        for d in [DType::U8, DType::I8, DType::F32, DType::F16, DType::BF16] {
            assert_eq!(DType::parse(&d.to_string()), Some(d));
        }
        assert_eq!(DType::U8.ncc_name(), "uint8");
    }
}
