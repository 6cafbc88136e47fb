// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

#![no_main]

use arbitrary::Arbitrary;
use core::hint::black_box;
use libfuzzer_sys::fuzz_target;
use rpccopy::static_info::{copy_static_info, static_info_size};
use rpccopy::{ProtocolVersion, StaticInfo};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    major: u8,
    minor: u8,
    align: bool,
    data: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let Ok(mut info) = StaticInfo::new_boxed() else {
        return;
    };
    let version = ProtocolVersion::new(input.major, input.minor);
    let buffer_size = u32::try_from(input.data.len()).unwrap_or(u32::MAX);
    let mut offset = 0;
    let res = copy_static_info(
        Some(&mut *info),
        version,
        Some(input.data),
        buffer_size,
        Some(&mut offset),
        input.align,
    );
    if res.is_ok() {
        assert_eq!(Ok(offset), static_info_size(version, input.align));
        assert!(offset <= buffer_size);
    }
    black_box(info);
});
