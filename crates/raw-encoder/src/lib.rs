// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # raw-encoder
//!
//! Turns source images (or raw `u8` buffers) into the exact byte layout a
//! compiled kmodel expects as input.
//!
//! - [`TargetSpec`] — declared input geometry and dtype of the target model,
//!   including whether it carries an explicit leading batch dimension.
//! - [`TensorSource`] — where the pixels come from (image file, `.raw` file,
//!   or an in-memory [`IntensityImage`]).
//! - [`encode`] — validates the geometry and casts values with the dtype's
//!   clip rule. No implicit resizing or cropping is ever performed.
//! - [`write_raw`] / [`read_raw`] — `.raw` files holding exactly the tensor bytes.
//! - [`convert_dir`] — batch conversion of a directory of PNG images.
//! - [`TensorStats`] — pixel statistics and an ASCII preview for operators.
//!
//! # Example
//! ```no_run
//! use raw_encoder::{encode, write_raw, TargetSpec, TensorSource};
//! use std::path::Path;
//!
//! let target = TargetSpec::default(); // 28x28x1 u8 with batch dim
//! let tensor = encode(&TensorSource::from_path("digit_7.png"), &target).unwrap();
//! write_raw(&tensor, Path::new("digit_7.raw")).unwrap();
//! ```

mod convert;
mod encode;
mod error;
mod raw_file;
mod source;
mod stats;
mod target;

pub use convert::{convert_dir, ConvertedImage};
pub use encode::{cast_values, encode, encode_pixels};
pub use error::EncodeError;
pub use raw_file::{read_raw, write_raw};
pub use source::{IntensityImage, TensorSource};
pub use stats::{ascii_preview, TensorStats};
pub use target::TargetSpec;
