// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

//! Graphics engine records. Apart from the zcull info and the SM issue
//! rate queries, every record here comes from the internal static GR
//! controls and carries one entry per GR engine. Those per-engine tables
//! are transferred whole.

use super::{load_prefix, store_prefix, wire_fields, WireField};
use crate::codec::{check_count, WireRecord};
use crate::dispatch::{copy_entry, not_supported, LogicalRecord, RecordKind, VersionEntry};
use crate::error::RpcError;
use rpcsdk::gr::*;
use zerocopy::little_endian::{U16, U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Highest SM issue rate modifier list size a V2 list may carry.
const SM_ISSUE_RATE_LIST_LIMIT: usize = SM_ISSUE_RATE_MODIFIER_V2_MAX_LIST_SIZE - 1;

/// SM entries per engine in the global SM order tables since v1E_03.
const GR_MAX_SM_V1E_03: usize = 240;

const _: () = assert!(GR_MAX_SM_V1E_03 <= GR_MAX_SM);

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct GrRouteInfoWire {
    flags: U32,
    _pad: [u8; 4],
    route: U64,
}

wire_fields!(GrRouteInfoWire => GrRouteInfo { flags, route });

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct GrZcullInfoV12_01 {
    width_align_pixels: U32,
    height_align_pixels: U32,
    pixel_squares_by_aliquots: U32,
    aliquot_total: U32,
    zcull_region_byte_multiplier: U32,
    zcull_region_header_size: U32,
    zcull_subregion_header_size: U32,
    subregion_count: U32,
    subregion_width_align_pixels: U32,
    subregion_height_align_pixels: U32,
}

wire_fields!(GrZcullInfoV12_01 => GrZcullInfo {
    width_align_pixels,
    height_align_pixels,
    pixel_squares_by_aliquots,
    aliquot_total,
    zcull_region_byte_multiplier,
    zcull_region_header_size,
    zcull_subregion_header_size,
    subregion_count,
    subregion_width_align_pixels,
    subregion_height_align_pixels,
});

const _: () = assert!(size_of::<GrZcullInfoV12_01>() == 40);

impl WireRecord for GrZcullInfoV12_01 {
    type Params = GrZcullInfo;

    fn copy_to(&self, p: &mut GrZcullInfo) {
        self.load(p);
    }

    fn copy_from(&mut self, p: &GrZcullInfo) {
        self.store(p);
    }
}

impl LogicalRecord for GrZcullInfo {
    const KIND: RecordKind = RecordKind::GrZcullInfo;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        not_supported!(V03_00),
        copy_entry!(V12_01, GrZcullInfoV12_01),
    ];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct SmIssueRatesWire {
    imla0: u8,
    fmla16: u8,
    dp: u8,
    fmla32: u8,
    ffma: u8,
    imla1: u8,
    imla2: u8,
    imla3: u8,
    imla4: u8,
}

wire_fields!(SmIssueRatesWire => SmIssueRates {
    imla0,
    fmla16,
    dp,
    fmla32,
    ffma,
    imla1,
    imla2,
    imla3,
    imla4,
});

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct SmIssueRateModifierV1A_1F {
    gr_route_info: GrRouteInfoWire,
    rates: SmIssueRatesWire,
    _pad: [u8; 7],
}

const _: () = assert!(size_of::<SmIssueRateModifierV1A_1F>() == 32);

impl WireRecord for SmIssueRateModifierV1A_1F {
    type Params = SmIssueRateModifierParams;

    fn copy_to(&self, p: &mut SmIssueRateModifierParams) {
        self.gr_route_info.load(&mut p.gr_route_info);
        self.rates.load(&mut p.rates);
    }

    fn copy_from(&mut self, p: &SmIssueRateModifierParams) {
        self.gr_route_info.store(&p.gr_route_info);
        self.rates.store(&p.rates);
    }
}

impl LogicalRecord for SmIssueRateModifierParams {
    const KIND: RecordKind = RecordKind::SmIssueRateModifier;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V1A_1F, SmIssueRateModifierV1A_1F)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct SmIssueRateModifierEntryWire {
    index: U32,
    data: U32,
}

wire_fields!(SmIssueRateModifierEntryWire => SmIssueRateModifierEntry { index, data });

/// A modifier list. Only the first `list_size` entries are meaningful,
/// and a valid list never fills the whole array.
#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct SmIssueRateModifierListWire {
    list_size: U32,
    list: [SmIssueRateModifierEntryWire; SM_ISSUE_RATE_MODIFIER_V2_MAX_LIST_SIZE],
}

const _: () = assert!(size_of::<SmIssueRateModifierListWire>() == 4 + 0xFF * 8);

impl SmIssueRateModifierListWire {
    fn check(&self) -> Result<(), RpcError> {
        check_count(self.list_size.get(), SM_ISSUE_RATE_LIST_LIMIT).map(|_| ())
    }
}

fn check_modifier_list(list: &SmIssueRateModifierList) -> Result<(), RpcError> {
    check_count(list.list_size, SM_ISSUE_RATE_LIST_LIMIT).map(|_| ())
}

// Callers check the list size first.
impl WireField<SmIssueRateModifierList> for SmIssueRateModifierListWire {
    fn load(&self, dst: &mut SmIssueRateModifierList) {
        let count = self.list_size.get() as usize;
        self.list_size.load(&mut dst.list_size);
        load_prefix(&self.list, &mut dst.list, count);
    }

    fn store(&mut self, src: &SmIssueRateModifierList) {
        let count = src.list_size as usize;
        self.list_size.store(&src.list_size);
        store_prefix(&mut self.list, &src.list, count);
    }
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct SmIssueRateModifierV2V2B_09 {
    modifiers: SmIssueRateModifierListWire,
}

impl WireRecord for SmIssueRateModifierV2V2B_09 {
    type Params = SmIssueRateModifierV2Params;

    fn validate(&self) -> Result<(), RpcError> {
        self.modifiers.check()
    }

    fn copy_to(&self, p: &mut SmIssueRateModifierV2Params) {
        self.modifiers.load(&mut p.modifiers);
    }

    fn validate_params(p: &SmIssueRateModifierV2Params) -> Result<(), RpcError> {
        check_modifier_list(&p.modifiers)
    }

    fn copy_from(&mut self, p: &SmIssueRateModifierV2Params) {
        self.modifiers.store(&p.modifiers);
    }
}

impl LogicalRecord for SmIssueRateModifierV2Params {
    const KIND: RecordKind = RecordKind::SmIssueRateModifierV2;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V2B_09, SmIssueRateModifierV2V2B_09)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct GrInfoWire {
    index: U32,
    data: U32,
}

wire_fields!(GrInfoWire => GrInfo { index, data });

// The GR info list grew between revisions; older hosts leave the tail of
// each engine's list untouched.
macro_rules! static_gr_info_layouts {
    ($($name:ident = $len:literal),+ $(,)?) => {
        $(
            #[repr(C, packed)]
            #[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
            pub struct $name {
                engine_info: [[GrInfoWire; $len]; GR_MAX_ENGINES],
            }

            const _: () = assert!($len <= GR_INFO_MAX_SIZE);

            impl WireRecord for $name {
                type Params = StaticGrInfoParams;

                fn copy_to(&self, p: &mut StaticGrInfoParams) {
                    for (wire, engine) in self.engine_info.iter().zip(p.engine_info.iter_mut()) {
                        wire.load(&mut engine.info_list);
                    }
                }

                fn copy_from(&mut self, p: &StaticGrInfoParams) {
                    for (wire, engine) in self.engine_info.iter_mut().zip(p.engine_info.iter()) {
                        wire.store(&engine.info_list);
                    }
                }
            }
        )+
    };
}

static_gr_info_layouts!(StaticGrInfoV24_07 = 0x37, StaticGrInfoV29_00 = 0x3C);

impl LogicalRecord for StaticGrInfoParams {
    const KIND: RecordKind = RecordKind::StaticGrInfo;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        copy_entry!(V24_07, StaticGrInfoV24_07),
        copy_entry!(V29_00, StaticGrInfoV29_00),
    ];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct GlobalSmIdV1F_01 {
    gpc_id: U16,
    local_tpc_id: U16,
    local_sm_id: U16,
    global_tpc_id: U16,
    virtual_gpc_id: U16,
    migratable_tpc_id: U16,
}

wire_fields!(GlobalSmIdV1F_01 => GlobalSmId {
    gpc_id,
    local_tpc_id,
    local_sm_id,
    global_tpc_id,
    virtual_gpc_id,
    migratable_tpc_id,
});

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct GlobalSmIdV2A_02 {
    gpc_id: U16,
    local_tpc_id: U16,
    local_sm_id: U16,
    global_tpc_id: U16,
    virtual_gpc_id: U16,
    migratable_tpc_id: U16,
    ugpu_id: U16,
}

wire_fields!(GlobalSmIdV2A_02 => GlobalSmId {
    gpc_id,
    local_tpc_id,
    local_sm_id,
    global_tpc_id,
    virtual_gpc_id,
    migratable_tpc_id,
    ugpu_id,
});

macro_rules! global_sm_order_layouts {
    ($($name:ident, $order:ident = $id:ty),+ $(,)?) => {
        $(
            #[repr(C, packed)]
            #[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
            pub struct $order {
                global_sm_id: [$id; GR_MAX_SM_V1E_03],
                num_sm: U16,
                num_tpc: U16,
            }

            wire_fields!($order => GlobalSmOrder { global_sm_id, num_sm, num_tpc });

            #[repr(C, packed)]
            #[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
            pub struct $name {
                global_sm_order: [$order; GR_MAX_ENGINES],
            }

            impl WireRecord for $name {
                type Params = GlobalSmOrderParams;

                fn copy_to(&self, p: &mut GlobalSmOrderParams) {
                    self.global_sm_order.load(&mut p.global_sm_order);
                }

                fn copy_from(&mut self, p: &GlobalSmOrderParams) {
                    self.global_sm_order.store(&p.global_sm_order);
                }
            }
        )+
    };
}

global_sm_order_layouts!(
    GlobalSmOrderV1F_01, GlobalSmOrderEngineV1F_01 = GlobalSmIdV1F_01,
    GlobalSmOrderV2A_02, GlobalSmOrderEngineV2A_02 = GlobalSmIdV2A_02,
);

const _: () = assert!(size_of::<GlobalSmOrderV1F_01>() == 8 * (240 * 12 + 4));
const _: () = assert!(size_of::<GlobalSmOrderV2A_02>() == 8 * (240 * 14 + 4));

impl LogicalRecord for GlobalSmOrderParams {
    const KIND: RecordKind = RecordKind::GlobalSmOrder;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        copy_entry!(V1F_01, GlobalSmOrderV1F_01),
        copy_entry!(V2A_02, GlobalSmOrderV2A_02),
    ];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct RopInfoWire {
    rop_unit_count: U32,
    rop_operations_factor: U32,
    rop_operations_count: U32,
}

wire_fields!(RopInfoWire => RopInfo {
    rop_unit_count,
    rop_operations_factor,
    rop_operations_count,
});

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct RopInfoV1B_05 {
    engine_rop_info: [RopInfoWire; GR_MAX_ENGINES],
}

impl WireRecord for RopInfoV1B_05 {
    type Params = RopInfoParams;

    fn copy_to(&self, p: &mut RopInfoParams) {
        self.engine_rop_info.load(&mut p.engine_rop_info);
    }

    fn copy_from(&mut self, p: &RopInfoParams) {
        self.engine_rop_info.store(&p.engine_rop_info);
    }
}

impl LogicalRecord for RopInfoParams {
    const KIND: RecordKind = RecordKind::RopInfo;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V1B_05, RopInfoV1B_05)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PpcMaskWire {
    mask: [U32; GR_MAX_GPC],
}

wire_fields!(PpcMaskWire => PpcMask { mask });

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PpcMasksV1C_06 {
    engine_ppc_masks: [PpcMaskWire; GR_MAX_ENGINES],
}

impl WireRecord for PpcMasksV1C_06 {
    type Params = PpcMasksParams;

    fn copy_to(&self, p: &mut PpcMasksParams) {
        self.engine_ppc_masks.load(&mut p.engine_ppc_masks);
    }

    fn copy_from(&mut self, p: &PpcMasksParams) {
        self.engine_ppc_masks.store(&p.engine_ppc_masks);
    }
}

impl LogicalRecord for PpcMasksParams {
    const KIND: RecordKind = RecordKind::PpcMasks;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V1C_06, PpcMasksV1C_06)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ContextBufferInfoWire {
    size: U32,
    alignment: U32,
}

wire_fields!(ContextBufferInfoWire => ContextBufferInfo { size, alignment });

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct EngineContextBuffersInfoWire {
    engine: [ContextBufferInfoWire; CONTEXT_ENGINE_ID_COUNT],
}

wire_fields!(EngineContextBuffersInfoWire => EngineContextBuffersInfo { engine });

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ContextBuffersInfoV25_07 {
    engine_context_buffers_info: [EngineContextBuffersInfoWire; GR_MAX_ENGINES],
}

impl WireRecord for ContextBuffersInfoV25_07 {
    type Params = ContextBuffersInfoParams;

    fn copy_to(&self, p: &mut ContextBuffersInfoParams) {
        self.engine_context_buffers_info
            .load(&mut p.engine_context_buffers_info);
    }

    fn copy_from(&mut self, p: &ContextBuffersInfoParams) {
        self.engine_context_buffers_info
            .store(&p.engine_context_buffers_info);
    }
}

impl LogicalRecord for ContextBuffersInfoParams {
    const KIND: RecordKind = RecordKind::ContextBuffersInfo;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V25_07, ContextBuffersInfoV25_07)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct FloorsweepingMasksWire {
    gpc_mask: U32,
    tpc_mask: [U32; GR_MAX_GPC],
    tpc_count: [U32; GR_MAX_GPC],
    phys_gpc_mask: U32,
    mmu_per_gpc: [U32; GR_MAX_GPC],
    tpc_to_pes_map: [U32; GR_MAX_TPC_PER_GPC],
    num_pes_per_gpc: [U32; GR_MAX_GPC],
    zcull_mask: [U32; GR_MAX_GPC],
}

wire_fields!(FloorsweepingMasksWire => FloorsweepingMasks {
    gpc_mask,
    tpc_mask,
    tpc_count,
    phys_gpc_mask,
    mmu_per_gpc,
    tpc_to_pes_map,
    num_pes_per_gpc,
    zcull_mask,
});

const _: () = assert!(size_of::<FloorsweepingMasksWire>() == 4 * (2 + 5 * GR_MAX_GPC + GR_MAX_TPC_PER_GPC));

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct FloorsweepingMasksV1D_03 {
    floorsweeping_masks: [FloorsweepingMasksWire; GR_MAX_ENGINES],
}

impl WireRecord for FloorsweepingMasksV1D_03 {
    type Params = FloorsweepingMasksParams;

    fn copy_to(&self, p: &mut FloorsweepingMasksParams) {
        self.floorsweeping_masks.load(&mut p.floorsweeping_masks);
    }

    fn copy_from(&mut self, p: &FloorsweepingMasksParams) {
        self.floorsweeping_masks.store(&p.floorsweeping_masks);
    }
}

impl LogicalRecord for FloorsweepingMasksParams {
    const KIND: RecordKind = RecordKind::FloorsweepingMasks;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V1D_03, FloorsweepingMasksV1D_03)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct StaticZcullInfoV1B_05 {
    engine_zcull_info: [GrZcullInfoV12_01; GR_MAX_ENGINES],
}

impl WireRecord for StaticZcullInfoV1B_05 {
    type Params = StaticZcullInfoParams;

    fn copy_to(&self, p: &mut StaticZcullInfoParams) {
        self.engine_zcull_info.load(&mut p.engine_zcull_info);
    }

    fn copy_from(&mut self, p: &StaticZcullInfoParams) {
        self.engine_zcull_info.store(&p.engine_zcull_info);
    }
}

impl LogicalRecord for StaticZcullInfoParams {
    const KIND: RecordKind = RecordKind::StaticZcullInfo;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V1B_05, StaticZcullInfoV1B_05)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct FecsRecordSizeV1B_05 {
    fecs_record_size: [U16; GR_MAX_ENGINES],
}

impl WireRecord for FecsRecordSizeV1B_05 {
    type Params = FecsRecordSizeParams;

    fn copy_to(&self, p: &mut FecsRecordSizeParams) {
        self.fecs_record_size.load(&mut p.fecs_record_size);
    }

    fn copy_from(&mut self, p: &FecsRecordSizeParams) {
        self.fecs_record_size.store(&p.fecs_record_size);
    }
}

impl LogicalRecord for FecsRecordSizeParams {
    const KIND: RecordKind = RecordKind::FecsRecordSize;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V1B_05, FecsRecordSizeV1B_05)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct FecsTraceDefinesWire {
    fecs_record_size: U32,
    timestamp_hi_tag_mask: U32,
    timestamp_hi_tag_shift: u8,
    _pad: [u8; 7],
    timestamp_v_mask: U64,
    num_lower_bits_zero_shift: u8,
    _pad1: [u8; 7],
}

wire_fields!(FecsTraceDefinesWire => FecsTraceDefines {
    fecs_record_size,
    timestamp_hi_tag_mask,
    timestamp_hi_tag_shift,
    timestamp_v_mask,
    num_lower_bits_zero_shift,
});

const _: () = assert!(size_of::<FecsTraceDefinesWire>() == 32);

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct FecsTraceDefinesV1D_04 {
    fecs_trace_defines: [FecsTraceDefinesWire; GR_MAX_ENGINES],
}

impl WireRecord for FecsTraceDefinesV1D_04 {
    type Params = FecsTraceDefinesParams;

    fn copy_to(&self, p: &mut FecsTraceDefinesParams) {
        self.fecs_trace_defines.load(&mut p.fecs_trace_defines);
    }

    fn copy_from(&mut self, p: &FecsTraceDefinesParams) {
        self.fecs_trace_defines.store(&p.fecs_trace_defines);
    }
}

impl LogicalRecord for FecsTraceDefinesParams {
    const KIND: RecordKind = RecordKind::FecsTraceDefines;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V1D_04, FecsTraceDefinesV1D_04)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PdbPropertiesWire {
    per_sub_ctxheader_supported: u8,
}

wire_fields!(PdbPropertiesWire => PdbProperties { per_sub_ctxheader_supported });

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PdbPropertiesV1E_02 {
    pdb_table: [PdbPropertiesWire; GR_MAX_ENGINES],
}

impl WireRecord for PdbPropertiesV1E_02 {
    type Params = PdbPropertiesParams;

    fn copy_to(&self, p: &mut PdbPropertiesParams) {
        self.pdb_table.load(&mut p.pdb_table);
    }

    fn copy_from(&mut self, p: &PdbPropertiesParams) {
        self.pdb_table.store(&p.pdb_table);
    }
}

impl LogicalRecord for PdbPropertiesParams {
    const KIND: RecordKind = RecordKind::PdbProperties;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V1E_02, PdbPropertiesV1E_02)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct StaticSmIssueRateModifierV1B_05 {
    sm_issue_rate_modifier: [SmIssueRatesWire; GR_MAX_ENGINES],
}

impl WireRecord for StaticSmIssueRateModifierV1B_05 {
    type Params = StaticSmIssueRateModifierParams;

    fn copy_to(&self, p: &mut StaticSmIssueRateModifierParams) {
        self.sm_issue_rate_modifier
            .load(&mut p.sm_issue_rate_modifier);
    }

    fn copy_from(&mut self, p: &StaticSmIssueRateModifierParams) {
        self.sm_issue_rate_modifier
            .store(&p.sm_issue_rate_modifier);
    }
}

impl LogicalRecord for StaticSmIssueRateModifierParams {
    const KIND: RecordKind = RecordKind::StaticSmIssueRateModifier;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V1B_05, StaticSmIssueRateModifierV1B_05)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct StaticSmIssueRateModifierV2V2B_09 {
    sm_issue_rate_modifier_v2: [SmIssueRateModifierListWire; GR_MAX_ENGINES],
}

impl WireRecord for StaticSmIssueRateModifierV2V2B_09 {
    type Params = StaticSmIssueRateModifierV2Params;

    // Every engine's list is checked before any of them is copied.
    fn validate(&self) -> Result<(), RpcError> {
        self.sm_issue_rate_modifier_v2
            .iter()
            .try_for_each(SmIssueRateModifierListWire::check)
    }

    fn copy_to(&self, p: &mut StaticSmIssueRateModifierV2Params) {
        self.sm_issue_rate_modifier_v2
            .load(&mut p.sm_issue_rate_modifier_v2);
    }

    fn validate_params(p: &StaticSmIssueRateModifierV2Params) -> Result<(), RpcError> {
        p.sm_issue_rate_modifier_v2
            .iter()
            .try_for_each(check_modifier_list)
    }

    fn copy_from(&mut self, p: &StaticSmIssueRateModifierV2Params) {
        self.sm_issue_rate_modifier_v2
            .store(&p.sm_issue_rate_modifier_v2);
    }
}

impl LogicalRecord for StaticSmIssueRateModifierV2Params {
    const KIND: RecordKind = RecordKind::StaticSmIssueRateModifierV2;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V2B_09, StaticSmIssueRateModifierV2V2B_09)];
}
