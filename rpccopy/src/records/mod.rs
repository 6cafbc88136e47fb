// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

//! Wire layouts of every record revision, grouped by the area of the GPU
//! they describe.
//!
//! Layout types carry the revision that introduced them in their name
//! (`BusInfoV2V1C_09` is the bus info layout of protocol v1C_09). All
//! layouts are packed and built from byte-order aware integers, so their
//! size and field offsets are the same on every host.

#![allow(non_camel_case_types)]

pub mod bus;
pub mod ce;
pub mod fb;
pub mod fifo;
pub mod gpu;
pub mod gr;
pub mod mc;
pub mod vgpu;

use zerocopy::little_endian::{U16, U32, U64};

/// Conversion between a wire field and the matching field of a
/// normalized structure.
pub(crate) trait WireField<T> {
    fn load(&self, dst: &mut T);
    fn store(&mut self, src: &T);
}

macro_rules! impl_scalar_field {
    ($($wire:ty => $native:ty),+ $(,)?) => {
        $(
            impl WireField<$native> for $wire {
                fn load(&self, dst: &mut $native) {
                    *dst = (*self).into();
                }

                fn store(&mut self, src: &$native) {
                    *self = (*src).into();
                }
            }
        )+
    };
}

impl_scalar_field!(U16 => u16, U32 => u32, U64 => u64, u8 => u8);

impl WireField<bool> for u8 {
    fn load(&self, dst: &mut bool) {
        *dst = *self != 0;
    }

    fn store(&mut self, src: &bool) {
        *self = u8::from(*src);
    }
}

// Arrays of different lengths copy their common prefix. That is how an
// older revision with a smaller table fills a newer, larger structure.
impl<W: WireField<T>, T, const N: usize, const M: usize> WireField<[T; M]> for [W; N] {
    fn load(&self, dst: &mut [T; M]) {
        load_prefix(self, dst, N);
    }

    fn store(&mut self, src: &[T; M]) {
        store_prefix(self, src, N);
    }
}

/// Loads the first `count` elements of `src`.
pub(crate) fn load_prefix<W: WireField<T>, T>(src: &[W], dst: &mut [T], count: usize) {
    for (s, d) in src.iter().zip(dst.iter_mut()).take(count) {
        s.load(d);
    }
}

/// Stores the first `count` elements of `src`.
pub(crate) fn store_prefix<W: WireField<T>, T>(dst: &mut [W], src: &[T], count: usize) {
    for (d, s) in dst.iter_mut().zip(src.iter()).take(count) {
        d.store(s);
    }
}

/// Implements [`WireField`] for a nested wire structure whose fields map
/// one to one onto fields of the normalized structure.
macro_rules! wire_fields {
    ($wire:ty => $native:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::records::WireField<$native> for $wire {
            fn load(&self, dst: &mut $native) {
                $($crate::records::WireField::load(&{ self.$field }, &mut dst.$field);)+
            }

            fn store(&mut self, src: &$native) {
                $(
                    let mut v = self.$field;
                    $crate::records::WireField::store(&mut v, &src.$field);
                    self.$field = v;
                )+
            }
        }
    };
}

pub(crate) use wire_fields;
