// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # flash-packer
//!
//! Assembles per-slot raw tensors into one flash-programmable image.
//!
//! # Layout
//! ```text
//! base_address
//!   │
//!   ▼
//!   ┌──────────────┬──────────────┬─────┬──────────────┐
//!   │ slot 0       │ slot 1       │ ... │ slot N-1     │
//!   │ tensor │ 0.. │ 0 0 0 0 0 0  │     │ tensor │ 0.. │
//!   └──────────────┴──────────────┴─────┴──────────────┘
//!    sector_size    sector_size          sector_size
//! ```
//!
//! - [`SectorLayout`] — sector size, slot count and flash base address.
//! - [`pack`] — builds a [`FlashImage`] from an explicit slot → tensor map.
//!   Slots are always emitted in ascending index order; a slot without a
//!   source becomes a zero sector so later offsets never shift.
//! - [`resolve_slot_sources`] — finds `<slot>.png|.jpg|.raw` in a directory.
//!
//! Output is deterministic: identical inputs give byte-identical images.

mod error;
mod flash_image;
mod layout;
mod pack;
mod slots;

pub use error::PackError;
pub use flash_image::FlashImage;
pub use layout::{SectorLayout, DEFAULT_BASE_ADDRESS, DEFAULT_SECTOR_SIZE};
pub use pack::pack;
pub use slots::{resolve_slot_sources, SLOT_EXTENSIONS};
