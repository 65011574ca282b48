// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Output activations applied to raw model output on the host.
//!
//! The K210 kmodel emits unnormalised class scores; these operations turn
//! them into a probability distribution and a top-1 index.

mod argmax_op;
mod softmax_op;

pub use argmax_op::argmax;
pub use softmax_op::{softmax, softmax_in_place};
