// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use super::{wire_fields, WireField};
use crate::codec::WireRecord;
use crate::dispatch::{copy_entry, reserved_entry, LogicalRecord, RecordKind, VersionEntry};
use rpcsdk::fb::*;
use zerocopy::little_endian::{U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct FbRegionWire {
    base: U64,
    limit: U64,
    reserved: U64,
    performance: U32,
    support_compressed: u8,
    support_iso: u8,
    protected: u8,
    black_list: [u8; FB_REGION_MEM_TYPES],
}

const _: () = assert!(size_of::<FbRegionWire>() == 48);

wire_fields!(FbRegionWire => FbRegion {
    base,
    limit,
    reserved,
    performance,
    support_compressed,
    support_iso,
    protected,
    black_list,
});

/// Every region slot is transferred, including those past
/// `num_fb_regions`.
#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct FbRegionInfoV03_00 {
    num_fb_regions: U32,
    _pad: [u8; 4],
    fb_region: [FbRegionWire; FB_REGION_INFO_MAX_ENTRIES],
}

impl WireRecord for FbRegionInfoV03_00 {
    type Params = FbRegionInfoParams;

    fn copy_to(&self, p: &mut FbRegionInfoParams) {
        self.num_fb_regions.load(&mut p.num_fb_regions);
        self.fb_region.load(&mut p.fb_region);
    }

    fn copy_from(&mut self, p: &FbRegionInfoParams) {
        self.num_fb_regions.store(&p.num_fb_regions);
        self.fb_region.store(&p.fb_region);
    }
}

impl LogicalRecord for FbRegionInfoParams {
    const KIND: RecordKind = RecordKind::FbRegionInfo;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V03_00, FbRegionInfoV03_00)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct OfflinedPageWire {
    page_number: U64,
    source: u8,
    _pad: [u8; 7],
}

wire_fields!(OfflinedPageWire => OfflinedPage { page_number, source });

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct DynamicOfflinedPagesWire {
    base_index: U32,
    valid_entries: U32,
    more: u8,
    _pad: [u8; 7],
    offlined: [OfflinedPageWire; DYNAMIC_BLACKLIST_MAX_ENTRIES],
}

// `valid_entries` does not bound the copy; every slot of every page goes
// across.
wire_fields!(DynamicOfflinedPagesWire => DynamicOfflinedPages {
    base_index,
    valid_entries,
    more,
    offlined,
});

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct DynamicBlacklistedPagesV1A_07 {
    pages: [DynamicOfflinedPagesWire; DYNAMIC_BLACKLIST_ITERATIONS],
}

const _: () = assert!(size_of::<DynamicBlacklistedPagesV1A_07>() == 8 * (16 + 64 * 16));

impl WireRecord for DynamicBlacklistedPagesV1A_07 {
    type Params = DynamicBlacklistedPages;

    fn copy_to(&self, p: &mut DynamicBlacklistedPages) {
        self.pages.load(&mut p.pages);
    }

    fn copy_from(&mut self, p: &DynamicBlacklistedPages) {
        self.pages.store(&p.pages);
    }
}

impl LogicalRecord for DynamicBlacklistedPages {
    const KIND: RecordKind = RecordKind::DynamicBlacklistedPages;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V1A_07, DynamicBlacklistedPagesV1A_07)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct LtcInfoForFbpWire {
    fbp_index: U32,
    ltc_mask: U32,
    ltc_count: U32,
}

wire_fields!(LtcInfoForFbpWire => LtcInfoForFbp { fbp_index, ltc_mask, ltc_count });

// The per-FBP LTC query is answered through the vGPU table below. Its own
// slot in the static info stream is skipped.
impl LogicalRecord for LtcInfoForFbp {
    const KIND: RecordKind = RecordKind::FbLtcInfoForFbp;
    const HISTORY: &'static [VersionEntry<Self>] = &[reserved_entry!(V15_03, LtcInfoForFbpWire)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct VgpuLtcInfoForFbpV1A_0D {
    fbp: [LtcInfoForFbpWire; MAX_FBPS],
}

impl WireRecord for VgpuLtcInfoForFbpV1A_0D {
    type Params = VgpuLtcInfoForFbp;

    fn copy_to(&self, p: &mut VgpuLtcInfoForFbp) {
        self.fbp.load(&mut p.fbp);
    }

    fn copy_from(&mut self, p: &VgpuLtcInfoForFbp) {
        self.fbp.store(&p.fbp);
    }
}

impl LogicalRecord for VgpuLtcInfoForFbp {
    const KIND: RecordKind = RecordKind::VgpuLtcInfoForFbp;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V1A_0D, VgpuLtcInfoForFbpV1A_0D)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ZbcTableSizeWire {
    index_start: U32,
    index_end: U32,
}

wire_fields!(ZbcTableSizeWire => ZbcTableSize { index_start, index_end });

/// One range per ZBC clear table type, back to back.
#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ZbcTableSizesV1A_07 {
    sizes: [ZbcTableSizeWire; ZBC_CLEAR_TABLE_TYPE_COUNT],
}

impl WireRecord for ZbcTableSizesV1A_07 {
    type Params = ZbcTableSizes;

    fn copy_to(&self, p: &mut ZbcTableSizes) {
        self.sizes.load(&mut p.sizes);
    }

    fn copy_from(&mut self, p: &ZbcTableSizes) {
        self.sizes.store(&p.sizes);
    }
}

impl LogicalRecord for ZbcTableSizes {
    const KIND: RecordKind = RecordKind::ZbcTableSizes;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V1A_07, ZbcTableSizesV1A_07)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MemsysStaticConfigV25_06 {
    one_to_one_comptag_line_allocation: u8,
    use_one_to_four_comptag_line_allocation: u8,
    use_raw_mode_comptagline_allocation: u8,
    disable_compbit_backing: u8,
    disable_post_l2_compression: u8,
    enabled_ecc_fbpa: u8,
    l2_pre_fill: u8,
    _pad: u8,
    l2_cache_size: U64,
    fbpa_present: u8,
    _pad1: [u8; 7],
    compr_page_size: U64,
    compr_page_shift: U32,
    ram_type: U32,
    ltc_count: U32,
    lts_per_ltc_count: U32,
}

const _: () = assert!(size_of::<MemsysStaticConfigV25_06>() == 48);

wire_fields!(MemsysStaticConfigV25_06 => MemsysStaticConfig {
    one_to_one_comptag_line_allocation,
    use_one_to_four_comptag_line_allocation,
    use_raw_mode_comptagline_allocation,
    disable_compbit_backing,
    disable_post_l2_compression,
    enabled_ecc_fbpa,
    l2_pre_fill,
    l2_cache_size,
    fbpa_present,
    compr_page_size,
    compr_page_shift,
    ram_type,
    ltc_count,
    lts_per_ltc_count,
});

impl WireRecord for MemsysStaticConfigV25_06 {
    type Params = MemsysStaticConfig;

    fn copy_to(&self, p: &mut MemsysStaticConfig) {
        self.load(p);
    }

    fn copy_from(&mut self, p: &MemsysStaticConfig) {
        self.store(p);
    }
}

impl LogicalRecord for MemsysStaticConfig {
    const KIND: RecordKind = RecordKind::MemsysStaticConfig;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V25_06, MemsysStaticConfigV25_06)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct FlaRangeV1A_18 {
    base: U64,
    size: U64,
}

wire_fields!(FlaRangeV1A_18 => FlaRangeParams { base, size });

impl WireRecord for FlaRangeV1A_18 {
    type Params = FlaRangeParams;

    fn copy_to(&self, p: &mut FlaRangeParams) {
        self.load(p);
    }

    fn copy_from(&mut self, p: &FlaRangeParams) {
        self.store(p);
    }
}

impl LogicalRecord for FlaRangeParams {
    const KIND: RecordKind = RecordKind::FlaRange;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V1A_18, FlaRangeV1A_18)];
}
