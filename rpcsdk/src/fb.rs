// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use zerocopy::FromZeros;

pub const FB_REGION_INFO_MAX_ENTRIES: usize = 16;
pub const FB_REGION_MEM_TYPES: usize = 17;

pub const DYNAMIC_BLACKLIST_MAX_ENTRIES: usize = 64;
pub const DYNAMIC_BLACKLIST_MAX_PAGES: usize = 512;
/// Number of blacklist pages needed to transfer the whole blacklist.
pub const DYNAMIC_BLACKLIST_ITERATIONS: usize =
    DYNAMIC_BLACKLIST_MAX_PAGES / DYNAMIC_BLACKLIST_MAX_ENTRIES;

pub const MAX_FBPS: usize = 16;
pub const ZBC_CLEAR_TABLE_TYPE_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct FbRegion {
    pub base: u64,
    pub limit: u64,
    pub reserved: u64,
    pub performance: u32,
    pub support_compressed: bool,
    pub support_iso: bool,
    pub protected: bool,
    pub black_list: [u8; FB_REGION_MEM_TYPES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct FbRegionInfoParams {
    pub num_fb_regions: u32,
    pub fb_region: [FbRegion; FB_REGION_INFO_MAX_ENTRIES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct OfflinedPage {
    pub page_number: u64,
    pub source: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeros)]
pub struct DynamicOfflinedPages {
    pub base_index: u32,
    pub valid_entries: u32,
    pub more: bool,
    pub offlined: [OfflinedPage; DYNAMIC_BLACKLIST_MAX_ENTRIES],
}

/// The dynamic page blacklist, transferred as consecutive pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct DynamicBlacklistedPages {
    pub pages: [DynamicOfflinedPages; DYNAMIC_BLACKLIST_ITERATIONS],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct LtcInfoForFbp {
    pub fbp_index: u32,
    pub ltc_mask: u32,
    pub ltc_count: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct VgpuLtcInfoForFbp {
    pub fbp: [LtcInfoForFbp; MAX_FBPS],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct ZbcTableSize {
    pub index_start: u32,
    pub index_end: u32,
}

/// ZBC clear table ranges, indexed by table type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct ZbcTableSizes {
    pub sizes: [ZbcTableSize; ZBC_CLEAR_TABLE_TYPE_COUNT],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct MemsysStaticConfig {
    pub one_to_one_comptag_line_allocation: bool,
    pub use_one_to_four_comptag_line_allocation: bool,
    pub use_raw_mode_comptagline_allocation: bool,
    pub disable_compbit_backing: bool,
    pub disable_post_l2_compression: bool,
    pub enabled_ecc_fbpa: bool,
    pub l2_pre_fill: bool,
    pub l2_cache_size: u64,
    pub fbpa_present: bool,
    pub compr_page_size: u64,
    pub compr_page_shift: u32,
    pub ram_type: u32,
    pub ltc_count: u32,
    pub lts_per_ltc_count: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct FlaRangeParams {
    pub base: u64,
    pub size: u64,
}

impl_zeroed_default!(DynamicOfflinedPages);
