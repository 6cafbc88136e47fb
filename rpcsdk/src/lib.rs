// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

//! Version-independent control parameter definitions.
//!
//! Every structure in this crate is the normalized form of a control call
//! result: it is large enough to hold the data of every protocol revision
//! that ever carried it. The versioned on-wire layouts and the code that
//! copies between the two live in the `rpccopy` crate.

#![no_std]

/// Implements [`Default`] as the all-zeroes value for parameter structures
/// whose arrays are too large for `#[derive(Default)]`.
macro_rules! impl_zeroed_default {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Default for $t {
                fn default() -> Self {
                    <Self as zerocopy::FromZeros>::new_zeroed()
                }
            }
        )+
    };
}

pub mod bus;
pub mod ce;
pub mod ctrl;
pub mod fb;
pub mod fifo;
pub mod gpu;
pub mod gr;
pub mod mc;
pub mod vgpu;
