// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use super::{load_prefix, store_prefix, wire_fields, WireField};
use crate::codec::{check_count, WireRecord};
use crate::dispatch::{copy_entry, not_supported, LogicalRecord, RecordKind, VersionEntry};
use crate::error::RpcError;
use rpcsdk::gpu::*;
use zerocopy::little_endian::{U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct EccUnitWire {
    enabled: u8,
    scrub_complete: u8,
    supported: u8,
    _pad: [u8; 5],
    dbe_count: U64,
    dbe_non_resettable_count: U64,
    sbe_count: U64,
    sbe_non_resettable_count: U64,
}

const _: () = assert!(size_of::<EccUnitWire>() == 40);

wire_fields!(EccUnitWire => EccUnitStatus {
    enabled,
    scrub_complete,
    supported,
    dbe_count,
    dbe_non_resettable_count,
    sbe_count,
    sbe_non_resettable_count,
});

// ECC status layouts only differ in the number of units.
macro_rules! ecc_status_layouts {
    ($($name:ident = $units:literal),+ $(,)?) => {
        $(
            #[repr(C, packed)]
            #[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
            pub struct $name {
                units: [EccUnitWire; $units],
                fatal_poison_error: u8,
                _pad: [u8; 7],
            }

            const _: () = assert!(size_of::<$name>() == $units * 40 + 8);
            const _: () = assert!($units <= ECC_UNIT_COUNT);

            impl WireRecord for $name {
                type Params = EccStatusParams;

                fn copy_to(&self, p: &mut EccStatusParams) {
                    self.units.load(&mut p.units);
                    self.fatal_poison_error.load(&mut p.fatal_poison_error);
                }

                fn copy_from(&mut self, p: &EccStatusParams) {
                    self.units.store(&p.units);
                    self.fatal_poison_error.store(&p.fatal_poison_error);
                }
            }
        )+
    };
}

ecc_status_layouts!(
    EccStatusV24_06 = 0x19,
    EccStatusV26_02 = 0x1B,
    EccStatusV27_04 = 0x1C,
    EccStatusV28_01 = 0x1E,
    EccStatusV28_08 = 0x1F,
);

impl LogicalRecord for EccStatusParams {
    const KIND: RecordKind = RecordKind::EccStatus;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        not_supported!(V15_01),
        not_supported!(V1A_04),
        not_supported!(V1C_09),
        not_supported!(V20_03),
        copy_entry!(V24_06, EccStatusV24_06),
        copy_entry!(V26_02, EccStatusV26_02),
        copy_entry!(V27_04, EccStatusV27_04),
        copy_entry!(V28_01, EccStatusV28_01),
        copy_entry!(V28_08, EccStatusV28_08),
    ];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PartitionSpanWire {
    lo: U64,
    hi: U64,
}

wire_fields!(PartitionSpanWire => PartitionSpan { lo, hi });

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct GpuPartitionInfoV24_05 {
    swizz_id: U32,
    gr_eng_count: U32,
    veid_count: U32,
    ce_count: U32,
    gpc_count: U32,
    virtual_gpc_count: U32,
    gfx_gpc_count: U32,
    gpcs_per_gr: [U32; 8],
    virtual_gpcs_per_gr: [U32; 8],
    gfx_gpc_per_gr: [U32; 8],
    veids_per_gr: [U32; 8],
    nv_dec_count: U32,
    nv_enc_count: U32,
    nv_jpg_count: U32,
    nv_ofa_count: U32,
    partition_flag: U32,
    sm_count: U32,
    _pad: [u8; 4],
    mem_size: U64,
    valid: u8,
    _pad1: [u8; 7],
    span: PartitionSpanWire,
    valid_cts_id_mask: U64,
}

/// Adds the mask of valid graphics compute instance slots.
#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct GpuPartitionInfoV28_02 {
    base: GpuPartitionInfoV24_05,
    valid_gfx_cts_id_mask: U64,
}

const _: () = assert!(size_of::<GpuPartitionInfoV24_05>() == 224);
const _: () = assert!(size_of::<GpuPartitionInfoV28_02>() == 232);

impl GpuPartitionInfoV24_05 {
    fn check(&self) -> Result<(), RpcError> {
        check_count(self.gr_eng_count.get(), 8).map(|_| ())
    }

    fn load(&self, p: &mut GpuPartitionInfo) {
        let count = self.gr_eng_count.get() as usize;
        self.swizz_id.load(&mut p.swizz_id);
        self.gr_eng_count.load(&mut p.gr_eng_count);
        self.veid_count.load(&mut p.veid_count);
        self.ce_count.load(&mut p.ce_count);
        self.gpc_count.load(&mut p.gpc_count);
        self.virtual_gpc_count.load(&mut p.virtual_gpc_count);
        self.gfx_gpc_count.load(&mut p.gfx_gpc_count);
        self.nv_dec_count.load(&mut p.nv_dec_count);
        self.nv_enc_count.load(&mut p.nv_enc_count);
        self.nv_jpg_count.load(&mut p.nv_jpg_count);
        self.nv_ofa_count.load(&mut p.nv_ofa_count);
        self.partition_flag.load(&mut p.partition_flag);
        self.sm_count.load(&mut p.sm_count);
        self.mem_size.load(&mut p.mem_size);
        self.valid.load(&mut p.valid);
        self.span.load(&mut p.span);
        self.valid_cts_id_mask.load(&mut p.valid_cts_id_mask);
        load_prefix(&self.gpcs_per_gr, &mut p.gpcs_per_gr, count);
        load_prefix(&self.veids_per_gr, &mut p.veids_per_gr, count);
        load_prefix(&self.virtual_gpcs_per_gr, &mut p.virtual_gpcs_per_gr, count);
        load_prefix(&self.gfx_gpc_per_gr, &mut p.gfx_gpc_per_gr, count);
    }

    fn store(&mut self, p: &GpuPartitionInfo) {
        let count = p.gr_eng_count as usize;
        self.swizz_id.store(&p.swizz_id);
        self.gr_eng_count.store(&p.gr_eng_count);
        self.veid_count.store(&p.veid_count);
        self.ce_count.store(&p.ce_count);
        self.gpc_count.store(&p.gpc_count);
        self.virtual_gpc_count.store(&p.virtual_gpc_count);
        self.gfx_gpc_count.store(&p.gfx_gpc_count);
        self.nv_dec_count.store(&p.nv_dec_count);
        self.nv_enc_count.store(&p.nv_enc_count);
        self.nv_jpg_count.store(&p.nv_jpg_count);
        self.nv_ofa_count.store(&p.nv_ofa_count);
        self.partition_flag.store(&p.partition_flag);
        self.sm_count.store(&p.sm_count);
        self.mem_size.store(&p.mem_size);
        self.valid.store(&p.valid);
        self.span.store(&p.span);
        self.valid_cts_id_mask.store(&p.valid_cts_id_mask);
        store_prefix(&mut self.gpcs_per_gr, &p.gpcs_per_gr, count);
        store_prefix(&mut self.veids_per_gr, &p.veids_per_gr, count);
        store_prefix(&mut self.virtual_gpcs_per_gr, &p.virtual_gpcs_per_gr, count);
        store_prefix(&mut self.gfx_gpc_per_gr, &p.gfx_gpc_per_gr, count);
    }
}

fn check_partition_params(p: &GpuPartitionInfo) -> Result<(), RpcError> {
    check_count(p.gr_eng_count, 8).map(|_| ())
}

impl WireRecord for GpuPartitionInfoV24_05 {
    type Params = GpuPartitionInfo;

    fn validate(&self) -> Result<(), RpcError> {
        self.check()
    }

    fn copy_to(&self, p: &mut GpuPartitionInfo) {
        self.load(p);
    }

    fn validate_params(p: &GpuPartitionInfo) -> Result<(), RpcError> {
        check_partition_params(p)
    }

    fn copy_from(&mut self, p: &GpuPartitionInfo) {
        self.store(p);
    }
}

impl WireRecord for GpuPartitionInfoV28_02 {
    type Params = GpuPartitionInfo;

    fn validate(&self) -> Result<(), RpcError> {
        self.base.check()
    }

    fn copy_to(&self, p: &mut GpuPartitionInfo) {
        self.base.load(p);
        self.valid_gfx_cts_id_mask.load(&mut p.valid_gfx_cts_id_mask);
    }

    fn validate_params(p: &GpuPartitionInfo) -> Result<(), RpcError> {
        check_partition_params(p)
    }

    fn copy_from(&mut self, p: &GpuPartitionInfo) {
        self.base.store(p);
        self.valid_gfx_cts_id_mask.store(&p.valid_gfx_cts_id_mask);
    }
}

impl LogicalRecord for GpuPartitionInfo {
    const KIND: RecordKind = RecordKind::GpuPartitionInfo;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        not_supported!(V12_01),
        not_supported!(V18_03),
        not_supported!(V20_01),
        not_supported!(V21_09),
        copy_entry!(V24_05, GpuPartitionInfoV24_05),
        copy_entry!(V28_02, GpuPartitionInfoV28_02),
    ];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ExecPartitionInfoWire {
    gpc_count: U32,
    gfx_gpc_count: U32,
    veid_count: U32,
    ce_count: U32,
    nv_enc_count: U32,
    nv_dec_count: U32,
    nv_jpg_count: U32,
    ofa_count: U32,
    shared_eng_flag: U32,
    sm_count: U32,
    span_start: U32,
    compute_size: U32,
}

wire_fields!(ExecPartitionInfoWire => ExecPartitionInfo {
    gpc_count,
    gfx_gpc_count,
    veid_count,
    ce_count,
    nv_enc_count,
    nv_dec_count,
    nv_jpg_count,
    ofa_count,
    shared_eng_flag,
    sm_count,
    span_start,
    compute_size,
});

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ExecPartitionsV24_05 {
    exec_part_count: U32,
    exec_part_id: [U32; 8],
    exec_part_info: [ExecPartitionInfoWire; 8],
}

const _: () = assert!(size_of::<ExecPartitionsV24_05>() == 4 + 32 + 8 * 48);
const _: () = assert!(8 <= MAX_EXEC_PARTITIONS);

impl WireRecord for ExecPartitionsV24_05 {
    type Params = ExecPartitionsParams;

    fn validate(&self) -> Result<(), RpcError> {
        check_count(self.exec_part_count.get(), 8).map(|_| ())
    }

    fn copy_to(&self, p: &mut ExecPartitionsParams) {
        let count = self.exec_part_count.get() as usize;
        self.exec_part_count.load(&mut p.exec_part_count);
        load_prefix(&self.exec_part_id, &mut p.exec_part_id, count);
        load_prefix(&self.exec_part_info, &mut p.exec_part_info, count);
    }

    fn validate_params(p: &ExecPartitionsParams) -> Result<(), RpcError> {
        check_count(p.exec_part_count, 8).map(|_| ())
    }

    fn copy_from(&mut self, p: &ExecPartitionsParams) {
        let count = p.exec_part_count as usize;
        self.exec_part_count.store(&p.exec_part_count);
        store_prefix(&mut self.exec_part_id, &p.exec_part_id, count);
        store_prefix(&mut self.exec_part_info, &p.exec_part_info, count);
    }
}

impl LogicalRecord for ExecPartitionsParams {
    const KIND: RecordKind = RecordKind::ExecPartitions;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        not_supported!(V18_07),
        not_supported!(V21_04),
        not_supported!(V21_09),
        copy_entry!(V24_05, ExecPartitionsV24_05),
    ];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ExecSyspipeInfoV26_01 {
    exec_part_count: U32,
    exec_part_id: [U32; 8],
    syspipe_id: [U32; 8],
}

impl WireRecord for ExecSyspipeInfoV26_01 {
    type Params = ExecSyspipeInfo;

    fn validate(&self) -> Result<(), RpcError> {
        check_count(self.exec_part_count.get(), 8).map(|_| ())
    }

    fn copy_to(&self, p: &mut ExecSyspipeInfo) {
        let count = self.exec_part_count.get() as usize;
        self.exec_part_count.load(&mut p.exec_part_count);
        load_prefix(&self.exec_part_id, &mut p.exec_part_id, count);
        load_prefix(&self.syspipe_id, &mut p.syspipe_id, count);
    }

    fn validate_params(p: &ExecSyspipeInfo) -> Result<(), RpcError> {
        check_count(p.exec_part_count, 8).map(|_| ())
    }

    fn copy_from(&mut self, p: &ExecSyspipeInfo) {
        let count = p.exec_part_count as usize;
        self.exec_part_count.store(&p.exec_part_count);
        store_prefix(&mut self.exec_part_id, &p.exec_part_id, count);
        store_prefix(&mut self.syspipe_id, &p.syspipe_id, count);
    }
}

impl LogicalRecord for ExecSyspipeInfo {
    const KIND: RecordKind = RecordKind::ExecSyspipeInfo;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V26_01, ExecSyspipeInfoV26_01)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ComputeProfileWire {
    gfx_gpc_count: U32,
    compute_size: U32,
    gpc_count: U32,
    veid_count: U32,
    sm_count: U32,
}

wire_fields!(ComputeProfileWire => ComputeProfile {
    gfx_gpc_count,
    compute_size,
    gpc_count,
    veid_count,
    sm_count,
});

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ComputeProfilesV20_04 {
    profile_count: U32,
    profiles: [ComputeProfileWire; 20],
}

impl WireRecord for ComputeProfilesV20_04 {
    type Params = ComputeProfilesParams;

    fn validate(&self) -> Result<(), RpcError> {
        check_count(self.profile_count.get(), 20).map(|_| ())
    }

    fn copy_to(&self, p: &mut ComputeProfilesParams) {
        let count = self.profile_count.get() as usize;
        self.profile_count.load(&mut p.profile_count);
        load_prefix(&self.profiles, &mut p.profiles, count);
    }

    fn validate_params(p: &ComputeProfilesParams) -> Result<(), RpcError> {
        check_count(p.profile_count, 20).map(|_| ())
    }

    fn copy_from(&mut self, p: &ComputeProfilesParams) {
        let count = p.profile_count as usize;
        self.profile_count.store(&p.profile_count);
        store_prefix(&mut self.profiles, &p.profiles, count);
    }
}

impl LogicalRecord for ComputeProfilesParams {
    const KIND: RecordKind = RecordKind::ComputeProfiles;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V20_04, ComputeProfilesV20_04)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct GidInfoV03_00 {
    index: U32,
    flags: U32,
    length: U32,
    data: [u8; 256],
}

impl WireRecord for GidInfoV03_00 {
    type Params = GidInfoParams;

    fn copy_to(&self, p: &mut GidInfoParams) {
        self.index.load(&mut p.index);
        self.flags.load(&mut p.flags);
        self.length.load(&mut p.length);
        self.data.load(&mut p.data);
    }

    fn copy_from(&mut self, p: &GidInfoParams) {
        self.index.store(&p.index);
        self.flags.store(&p.flags);
        self.length.store(&p.length);
        self.data.store(&p.data);
    }
}

impl LogicalRecord for GidInfoParams {
    const KIND: RecordKind = RecordKind::GidInfo;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V03_00, GidInfoV03_00)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct SkuInfoV25_0E {
    board_id: U32,
    sku_config_version: U32,
    chip_sku: [u8; 9],
    chip_sku_mod: [u8; 5],
    project: [u8; 5],
    project_sku: [u8; 5],
    cdp: [u8; 6],
    project_sku_mod: [u8; 2],
    business_cycle: U32,
}

const _: () = assert!(size_of::<SkuInfoV25_0E>() == 44);

impl WireRecord for SkuInfoV25_0E {
    type Params = SkuInfoParams;

    fn copy_to(&self, p: &mut SkuInfoParams) {
        self.board_id.load(&mut p.board_id);
        self.sku_config_version.load(&mut p.sku_config_version);
        self.chip_sku.load(&mut p.chip_sku);
        self.chip_sku_mod.load(&mut p.chip_sku_mod);
        self.project.load(&mut p.project);
        self.project_sku.load(&mut p.project_sku);
        self.cdp.load(&mut p.cdp);
        self.project_sku_mod.load(&mut p.project_sku_mod);
        self.business_cycle.load(&mut p.business_cycle);
    }

    fn copy_from(&mut self, p: &SkuInfoParams) {
        self.board_id.store(&p.board_id);
        self.sku_config_version.store(&p.sku_config_version);
        self.chip_sku.store(&p.chip_sku);
        self.chip_sku_mod.store(&p.chip_sku_mod);
        self.project.store(&p.project);
        self.project_sku.store(&p.project_sku);
        self.cdp.store(&p.cdp);
        self.project_sku_mod.store(&p.project_sku_mod);
        self.business_cycle.store(&p.business_cycle);
    }
}

impl LogicalRecord for SkuInfoParams {
    const KIND: RecordKind = RecordKind::SkuInfo;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        not_supported!(V03_00),
        copy_entry!(V25_0E, SkuInfoV25_0E),
    ];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ConstructedFalconWire {
    eng_desc: U32,
    ctx_attr: U32,
    ctx_buffer_size: U32,
    addr_space_list: U32,
    register_base: U32,
}

wire_fields!(ConstructedFalconWire => ConstructedFalconInfo {
    eng_desc,
    ctx_attr,
    ctx_buffer_size,
    addr_space_list,
    register_base,
});

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ConstructedFalconInfoV25_01 {
    num_constructed_falcons: U32,
    constructed_falcons_table: [ConstructedFalconWire; MAX_CONSTRUCTED_FALCONS],
}

impl WireRecord for ConstructedFalconInfoV25_01 {
    type Params = ConstructedFalconInfoParams;

    fn copy_to(&self, p: &mut ConstructedFalconInfoParams) {
        self.num_constructed_falcons
            .load(&mut p.num_constructed_falcons);
        self.constructed_falcons_table
            .load(&mut p.constructed_falcons_table);
    }

    fn copy_from(&mut self, p: &ConstructedFalconInfoParams) {
        self.num_constructed_falcons
            .store(&p.num_constructed_falcons);
        self.constructed_falcons_table
            .store(&p.constructed_falcons_table);
    }
}

impl LogicalRecord for ConstructedFalconInfoParams {
    const KIND: RecordKind = RecordKind::ConstructedFalconInfo;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V25_01, ConstructedFalconInfoV25_01)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct DeviceInfoV25_05 {
    fault_id: U32,
    instance_id: U32,
    type_enum: U32,
    reset_id: U32,
    device_pri_base: U32,
    is_engine: U32,
    rl_eng_id: U32,
    runlist_pri_base: U32,
    group_id: U32,
}

wire_fields!(DeviceInfoV25_05 => DeviceInfo {
    fault_id,
    instance_id,
    type_enum,
    reset_id,
    device_pri_base,
    is_engine,
    rl_eng_id,
    runlist_pri_base,
    group_id,
});

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct DeviceInfoV27_05 {
    fault_id: U32,
    instance_id: U32,
    type_enum: U32,
    reset_id: U32,
    device_pri_base: U32,
    is_engine: U32,
    rl_eng_id: U32,
    runlist_pri_base: U32,
    group_id: U32,
    gin_target_id: U32,
    device_broadcast_pri_base: U32,
}

wire_fields!(DeviceInfoV27_05 => DeviceInfo {
    fault_id,
    instance_id,
    type_enum,
    reset_id,
    device_pri_base,
    is_engine,
    rl_eng_id,
    runlist_pri_base,
    group_id,
    gin_target_id,
    device_broadcast_pri_base,
});

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct DeviceInfoV28_04 {
    fault_id: U32,
    instance_id: U32,
    type_enum: U32,
    reset_id: U32,
    device_pri_base: U32,
    is_engine: U32,
    rl_eng_id: U32,
    runlist_pri_base: U32,
    group_id: U32,
    gin_target_id: U32,
    device_broadcast_pri_base: U32,
    group_local_instance_id: U32,
}

wire_fields!(DeviceInfoV28_04 => DeviceInfo {
    fault_id,
    instance_id,
    type_enum,
    reset_id,
    device_pri_base,
    is_engine,
    rl_eng_id,
    runlist_pri_base,
    group_id,
    gin_target_id,
    device_broadcast_pri_base,
    group_local_instance_id,
});

// Device info tables differ in the entry layout and the table size.
// Every entry of the table is transferred, not just `num_entries`.
macro_rules! device_info_tables {
    ($($name:ident = [$entry:ty; $len:literal]),+ $(,)?) => {
        $(
            #[repr(C, packed)]
            #[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
            pub struct $name {
                num_entries: U32,
                device_info_table: [$entry; $len],
            }

            const _: () = assert!($len <= DEVICE_INFO_MAX_ENTRIES);

            impl WireRecord for $name {
                type Params = DeviceInfoTableParams;

                fn copy_to(&self, p: &mut DeviceInfoTableParams) {
                    self.num_entries.load(&mut p.num_entries);
                    self.device_info_table.load(&mut p.device_info_table);
                }

                fn copy_from(&mut self, p: &DeviceInfoTableParams) {
                    self.num_entries.store(&p.num_entries);
                    self.device_info_table.store(&p.device_info_table);
                }
            }
        )+
    };
}

device_info_tables!(
    DeviceInfoTableV25_05 = [DeviceInfoV25_05; 64],
    DeviceInfoTableV27_05 = [DeviceInfoV27_05; 64],
    DeviceInfoTableV28_04 = [DeviceInfoV28_04; 88],
);

impl LogicalRecord for DeviceInfoTableParams {
    const KIND: RecordKind = RecordKind::DeviceInfoTable;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        copy_entry!(V25_05, DeviceInfoTableV25_05),
        copy_entry!(V27_05, DeviceInfoTableV27_05),
        copy_entry!(V28_04, DeviceInfoTableV28_04),
    ];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct CcuSampleInfoV29_05 {
    ccu_sample_size: U32,
}

impl WireRecord for CcuSampleInfoV29_05 {
    type Params = CcuSampleInfoParams;

    fn copy_to(&self, p: &mut CcuSampleInfoParams) {
        self.ccu_sample_size.load(&mut p.ccu_sample_size);
    }

    fn copy_from(&mut self, p: &CcuSampleInfoParams) {
        self.ccu_sample_size.store(&p.ccu_sample_size);
    }
}

impl LogicalRecord for CcuSampleInfoParams {
    const KIND: RecordKind = RecordKind::CcuSampleInfo;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V29_05, CcuSampleInfoV29_05)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct P2pCapabilityV25_03 {
    gpu_supports_fabric_probe: u8,
    _pad: [u8; 3],
}

impl WireRecord for P2pCapabilityV25_03 {
    type Params = P2pCapabilityParams;

    fn copy_to(&self, p: &mut P2pCapabilityParams) {
        self.gpu_supports_fabric_probe
            .load(&mut p.gpu_supports_fabric_probe);
    }

    fn copy_from(&mut self, p: &P2pCapabilityParams) {
        self.gpu_supports_fabric_probe
            .store(&p.gpu_supports_fabric_probe);
    }
}

impl LogicalRecord for P2pCapabilityParams {
    const KIND: RecordKind = RecordKind::P2pCapability;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V25_03, P2pCapabilityV25_03)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ErrorContIntrMaskV25_13 {
    ecc_mask: U32,
    nvlink_mask: U32,
}

impl WireRecord for ErrorContIntrMaskV25_13 {
    type Params = ErrorContIntrMaskParams;

    fn copy_to(&self, p: &mut ErrorContIntrMaskParams) {
        self.ecc_mask.load(&mut p.ecc_mask);
        self.nvlink_mask.load(&mut p.nvlink_mask);
    }

    fn copy_from(&mut self, p: &ErrorContIntrMaskParams) {
        self.ecc_mask.store(&p.ecc_mask);
        self.nvlink_mask.store(&p.nvlink_mask);
    }
}

impl LogicalRecord for ErrorContIntrMaskParams {
    const KIND: RecordKind = RecordKind::ErrorContIntrMask;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        not_supported!(V18_0B),
        copy_entry!(V25_13, ErrorContIntrMaskV25_13),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use crate::cursor::CursorError;
    use crate::dispatch::decode_record;
    use crate::version::ProtocolVersion;
    use alloc::vec;
    use zerocopy::FromZeros;

    fn fill_units(units: &mut [EccUnitWire]) {
        for (i, unit) in units.iter_mut().enumerate() {
            let i = i as u64;
            unit.enabled = 1;
            unit.scrub_complete = (i % 2) as u8;
            unit.supported = 1;
            unit.dbe_count = U64::new(i);
            unit.dbe_non_resettable_count = U64::new(i + 100);
            unit.sbe_count = U64::new(i + 200);
            unit.sbe_non_resettable_count = U64::new(i + 300);
        }
    }

    fn ecc_v24_06() -> EccStatusV24_06 {
        let mut wire = EccStatusV24_06::new_zeroed();
        fill_units(&mut wire.units);
        wire.fatal_poison_error = 1;
        wire
    }

    #[test]
    fn ecc_v24_06_exact_buffer() {
        let wire = ecc_v24_06();
        let buf = wire.as_bytes();
        let size = size_of::<EccStatusV24_06>() as u32;
        assert_eq!(buf.len() as u32, size);

        let mut dst = EccStatusParams::default();
        let mut offset = 0;
        decode_record(
            ProtocolVersion::V24_06,
            Some(&mut dst),
            Some(buf),
            size,
            Some(&mut offset),
        )
        .unwrap();

        assert_eq!(offset, size);
        assert!(dst.fatal_poison_error);
        for (i, unit) in dst.units.iter().enumerate() {
            if i < 0x19 {
                let i = i as u64;
                assert!(unit.enabled);
                assert_eq!(unit.scrub_complete, i % 2 == 1);
                assert!(unit.supported);
                assert_eq!(unit.dbe_count, i);
                assert_eq!(unit.dbe_non_resettable_count, i + 100);
                assert_eq!(unit.sbe_count, i + 200);
                assert_eq!(unit.sbe_non_resettable_count, i + 300);
            } else {
                assert_eq!(*unit, EccUnitStatus::default());
            }
        }
    }

    #[test]
    fn ecc_v24_06_short_buffer() {
        let wire = ecc_v24_06();
        let buf = wire.as_bytes();
        let size = size_of::<EccStatusV24_06>() as u32;

        let mut dst = EccStatusParams::default();
        let mut offset = 0;
        let err = decode::<EccStatusV24_06>(Some(&mut dst), Some(buf), size - 1, Some(&mut offset));
        assert_eq!(err, Err(RpcError::Cursor(CursorError::OutOfBounds)));
        assert_eq!(offset, size);
        assert_eq!(dst, EccStatusParams::default());
    }

    #[test]
    fn ecc_newest_revision() {
        let mut wire = EccStatusV28_08::new_zeroed();
        fill_units(&mut wire.units);
        let mut dst = EccStatusParams::default();
        let mut offset = 0;
        decode::<EccStatusV28_08>(
            Some(&mut dst),
            Some(wire.as_bytes()),
            EccStatusV28_08::WIRE_SIZE,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(dst.units[0x1E].sbe_count, 0x1E + 200);
    }

    #[test]
    fn partition_count_out_of_range() {
        let mut wire = GpuPartitionInfoV28_02::new_zeroed();
        wire.base.gr_eng_count = U32::new(9);
        wire.base.swizz_id = U32::new(3);
        wire.base.gpcs_per_gr = [U32::new(1); 8];

        let mut dst = GpuPartitionInfo::default();
        let mut offset = 0;
        let err = decode::<GpuPartitionInfoV28_02>(
            Some(&mut dst),
            Some(wire.as_bytes()),
            GpuPartitionInfoV28_02::WIRE_SIZE,
            Some(&mut offset),
        );
        assert_eq!(err, Err(RpcError::OutOfRange));
        assert_eq!(dst, GpuPartitionInfo::default());
        assert_eq!(offset, 232);
    }

    #[test]
    fn partition_round_trip() {
        let mut src = GpuPartitionInfo {
            swizz_id: 1,
            gr_eng_count: 2,
            mem_size: 0x1_0000_0000,
            valid: true,
            span: PartitionSpan { lo: 4, hi: 7 },
            valid_cts_id_mask: 0xf0,
            valid_gfx_cts_id_mask: 0x0f,
            ..Default::default()
        };
        src.gpcs_per_gr[..2].copy_from_slice(&[3, 4]);
        src.veids_per_gr[..2].copy_from_slice(&[8, 8]);

        let mut buf = vec![0u8; 232];
        let mut offset = 0;
        encode::<GpuPartitionInfoV28_02>(Some(&src), Some(&mut buf), 232, Some(&mut offset))
            .unwrap();

        let mut dst = GpuPartitionInfo::default();
        let mut offset = 0;
        decode::<GpuPartitionInfoV28_02>(Some(&mut dst), Some(&buf), 232, Some(&mut offset))
            .unwrap();
        assert_eq!(dst, src);

        // The older layout has no graphics mask.
        let mut dst = GpuPartitionInfo::default();
        let mut offset = 0;
        decode::<GpuPartitionInfoV24_05>(Some(&mut dst), Some(&buf), 232, Some(&mut offset))
            .unwrap();
        assert_eq!(offset, 224);
        assert_eq!(dst.valid_gfx_cts_id_mask, 0);
        assert_eq!(dst.span, src.span);
    }

    #[test]
    fn exec_partitions_copy_only_count() {
        let mut wire = ExecPartitionsV24_05::new_zeroed();
        wire.exec_part_count = U32::new(1);
        wire.exec_part_id = [U32::new(5); 8];

        let mut dst = ExecPartitionsParams::default();
        let mut offset = 0;
        decode::<ExecPartitionsV24_05>(
            Some(&mut dst),
            Some(wire.as_bytes()),
            ExecPartitionsV24_05::WIRE_SIZE,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(dst.exec_part_count, 1);
        assert_eq!(dst.exec_part_id, [5, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn device_info_older_layout_keeps_new_fields() {
        let mut wire = DeviceInfoTableV25_05::new_zeroed();
        wire.num_entries = U32::new(64);
        wire.device_info_table[63].group_id = U32::new(0x77);

        let mut dst = DeviceInfoTableParams::default();
        dst.device_info_table[63].gin_target_id = 0x55;
        dst.device_info_table[70].group_id = 0x66;
        let mut offset = 0;
        decode_record(
            ProtocolVersion::V26_01,
            Some(&mut dst),
            Some(wire.as_bytes()),
            DeviceInfoTableV25_05::WIRE_SIZE,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(dst.num_entries, 64);
        assert_eq!(dst.device_info_table[63].group_id, 0x77);
        assert_eq!(dst.device_info_table[63].gin_target_id, 0x55);
        assert_eq!(dst.device_info_table[70].group_id, 0x66);
    }

    #[test]
    fn device_info_newest_layout() {
        let mut wire = DeviceInfoTableV28_04::new_zeroed();
        wire.device_info_table[87].group_local_instance_id = U32::new(2);
        let mut dst = DeviceInfoTableParams::default();
        let mut offset = 0;
        decode_record(
            ProtocolVersion::LATEST,
            Some(&mut dst),
            Some(wire.as_bytes()),
            DeviceInfoTableV28_04::WIRE_SIZE,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(dst.device_info_table[87].group_local_instance_id, 2);
        assert_eq!(offset, 4 + 88 * 48);
    }

    #[test]
    fn sku_strings() {
        let mut wire = SkuInfoV25_0E::new_zeroed();
        wire.chip_sku = *b"G100-300\0";
        wire.business_cycle = U32::new(3);
        let mut dst = SkuInfoParams::default();
        let mut offset = 0;
        decode::<SkuInfoV25_0E>(
            Some(&mut dst),
            Some(wire.as_bytes()),
            44,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(&dst.chip_sku, b"G100-300\0");
        assert_eq!(dst.business_cycle, 3);
    }
}
