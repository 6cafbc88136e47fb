// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use zerocopy::FromZeros;

/// Number of GR engines covered by the internal static GR controls.
pub const GR_MAX_ENGINES: usize = 8;
pub const GR_MAX_SM: usize = 512;
pub const GR_MAX_GPC: usize = 12;
pub const GR_MAX_TPC_PER_GPC: usize = 10;
/// Size of the per-engine GR info list in the newest protocol revision.
pub const GR_INFO_MAX_SIZE: usize = 0x3C;
pub const CONTEXT_ENGINE_ID_COUNT: usize = 0x19;
/// Capacity of an SM issue rate modifier V2 list. A valid list holds
/// strictly fewer entries than this.
pub const SM_ISSUE_RATE_MODIFIER_V2_MAX_LIST_SIZE: usize = 0xFF;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct GrRouteInfo {
    pub flags: u32,
    pub route: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct GrZcullInfo {
    pub width_align_pixels: u32,
    pub height_align_pixels: u32,
    pub pixel_squares_by_aliquots: u32,
    pub aliquot_total: u32,
    pub zcull_region_byte_multiplier: u32,
    pub zcull_region_header_size: u32,
    pub zcull_subregion_header_size: u32,
    pub subregion_count: u32,
    pub subregion_width_align_pixels: u32,
    pub subregion_height_align_pixels: u32,
}

/// Per-instruction-class issue rate scaling factors of an SM.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct SmIssueRates {
    pub imla0: u8,
    pub imla1: u8,
    pub imla2: u8,
    pub imla3: u8,
    pub imla4: u8,
    pub fmla16: u8,
    pub fmla32: u8,
    pub ffma: u8,
    pub dp: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct SmIssueRateModifierParams {
    pub gr_route_info: GrRouteInfo,
    pub rates: SmIssueRates,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct SmIssueRateModifierEntry {
    pub index: u32,
    pub data: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeros)]
pub struct SmIssueRateModifierList {
    pub list_size: u32,
    pub list: [SmIssueRateModifierEntry; SM_ISSUE_RATE_MODIFIER_V2_MAX_LIST_SIZE],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct SmIssueRateModifierV2Params {
    pub gr_route_info: GrRouteInfo,
    pub modifiers: SmIssueRateModifierList,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct GrInfo {
    pub index: u32,
    pub data: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeros)]
pub struct GrEngineInfo {
    pub info_list: [GrInfo; GR_INFO_MAX_SIZE],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct StaticGrInfoParams {
    pub engine_info: [GrEngineInfo; GR_MAX_ENGINES],
}

/// Location of one SM in the global SM order. `ugpu_id` is only reported
/// by newer protocol revisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct GlobalSmId {
    pub gpc_id: u16,
    pub local_tpc_id: u16,
    pub local_sm_id: u16,
    pub global_tpc_id: u16,
    pub virtual_gpc_id: u16,
    pub migratable_tpc_id: u16,
    pub ugpu_id: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeros)]
pub struct GlobalSmOrder {
    pub global_sm_id: [GlobalSmId; GR_MAX_SM],
    pub num_sm: u16,
    pub num_tpc: u16,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct GlobalSmOrderParams {
    pub global_sm_order: [GlobalSmOrder; GR_MAX_ENGINES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct RopInfo {
    pub rop_unit_count: u32,
    pub rop_operations_factor: u32,
    pub rop_operations_count: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct RopInfoParams {
    pub engine_rop_info: [RopInfo; GR_MAX_ENGINES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct PpcMask {
    pub mask: [u32; GR_MAX_GPC],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct PpcMasksParams {
    pub engine_ppc_masks: [PpcMask; GR_MAX_ENGINES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct ContextBufferInfo {
    pub size: u32,
    pub alignment: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct EngineContextBuffersInfo {
    pub engine: [ContextBufferInfo; CONTEXT_ENGINE_ID_COUNT],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct ContextBuffersInfoParams {
    pub engine_context_buffers_info: [EngineContextBuffersInfo; GR_MAX_ENGINES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct FloorsweepingMasks {
    pub gpc_mask: u32,
    pub phys_gpc_mask: u32,
    pub tpc_mask: [u32; GR_MAX_GPC],
    pub tpc_count: [u32; GR_MAX_GPC],
    pub num_pes_per_gpc: [u32; GR_MAX_GPC],
    pub mmu_per_gpc: [u32; GR_MAX_GPC],
    pub zcull_mask: [u32; GR_MAX_GPC],
    pub tpc_to_pes_map: [u32; GR_MAX_TPC_PER_GPC],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct FloorsweepingMasksParams {
    pub floorsweeping_masks: [FloorsweepingMasks; GR_MAX_ENGINES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct StaticZcullInfoParams {
    pub engine_zcull_info: [GrZcullInfo; GR_MAX_ENGINES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct FecsRecordSizeParams {
    pub fecs_record_size: [u16; GR_MAX_ENGINES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct FecsTraceDefines {
    pub fecs_record_size: u32,
    pub timestamp_hi_tag_mask: u32,
    pub timestamp_hi_tag_shift: u8,
    pub timestamp_v_mask: u64,
    pub num_lower_bits_zero_shift: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct FecsTraceDefinesParams {
    pub fecs_trace_defines: [FecsTraceDefines; GR_MAX_ENGINES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct PdbProperties {
    pub per_sub_ctxheader_supported: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct PdbPropertiesParams {
    pub pdb_table: [PdbProperties; GR_MAX_ENGINES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct StaticSmIssueRateModifierParams {
    pub sm_issue_rate_modifier: [SmIssueRates; GR_MAX_ENGINES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct StaticSmIssueRateModifierV2Params {
    pub sm_issue_rate_modifier_v2: [SmIssueRateModifierList; GR_MAX_ENGINES],
}

impl_zeroed_default!(SmIssueRateModifierList, GrEngineInfo, GlobalSmOrder);
