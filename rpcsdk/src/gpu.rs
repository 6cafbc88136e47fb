// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use zerocopy::FromZeros;

/// Number of ECC units tracked by the newest protocol revision.
pub const ECC_UNIT_COUNT: usize = 0x1F;

/// Maximum number of GR engines in one GPU partition.
pub const MAX_GR_PER_PARTITION: usize = 8;

/// Maximum number of execution partitions (compute instances).
pub const MAX_EXEC_PARTITIONS: usize = 8;

/// Maximum number of compute instance profiles.
pub const MAX_COMPUTE_PROFILES: usize = 20;

/// Size of the GID buffer.
pub const GID_MAX_LENGTH: usize = 0x100;

pub const SKU_CHIP_SKU_SIZE: usize = 9;
pub const SKU_CHIP_SKU_MOD_SIZE: usize = 5;
pub const SKU_PROJECT_SIZE: usize = 5;
pub const SKU_PROJECT_SKU_SIZE: usize = 5;
pub const SKU_CDP_SIZE: usize = 6;
pub const SKU_PROJECT_SKU_MOD_SIZE: usize = 2;

/// Maximum number of constructed falcons reported by the host.
pub const MAX_CONSTRUCTED_FALCONS: usize = 0x40;

/// Maximum number of device info table entries.
pub const DEVICE_INFO_MAX_ENTRIES: usize = 88;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct EccUnitStatus {
    pub enabled: bool,
    pub scrub_complete: bool,
    pub supported: bool,
    pub dbe_count: u64,
    pub dbe_non_resettable_count: u64,
    pub sbe_count: u64,
    pub sbe_non_resettable_count: u64,
}

/// ECC state of every unit of the GPU. Units not described by the
/// negotiated protocol revision keep their previous value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct EccStatusParams {
    pub units: [EccUnitStatus; ECC_UNIT_COUNT],
    pub fatal_poison_error: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct PartitionSpan {
    pub lo: u64,
    pub hi: u64,
}

/// Description of the GPU partition a vGPU is running on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct GpuPartitionInfo {
    pub swizz_id: u32,
    pub gr_eng_count: u32,
    pub veid_count: u32,
    pub ce_count: u32,
    pub gpc_count: u32,
    pub virtual_gpc_count: u32,
    pub gfx_gpc_count: u32,
    pub gpcs_per_gr: [u32; MAX_GR_PER_PARTITION],
    pub virtual_gpcs_per_gr: [u32; MAX_GR_PER_PARTITION],
    pub gfx_gpc_per_gr: [u32; MAX_GR_PER_PARTITION],
    pub veids_per_gr: [u32; MAX_GR_PER_PARTITION],
    pub nv_dec_count: u32,
    pub nv_enc_count: u32,
    pub nv_jpg_count: u32,
    pub nv_ofa_count: u32,
    pub partition_flag: u32,
    pub sm_count: u32,
    pub mem_size: u64,
    pub valid: bool,
    pub span: PartitionSpan,
    pub valid_cts_id_mask: u64,
    pub valid_gfx_cts_id_mask: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct ExecPartitionInfo {
    pub gpc_count: u32,
    pub gfx_gpc_count: u32,
    pub veid_count: u32,
    pub ce_count: u32,
    pub nv_enc_count: u32,
    pub nv_dec_count: u32,
    pub nv_jpg_count: u32,
    pub ofa_count: u32,
    pub shared_eng_flag: u32,
    pub sm_count: u32,
    pub span_start: u32,
    pub compute_size: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct ExecPartitionsParams {
    pub exec_part_count: u32,
    pub exec_part_id: [u32; MAX_EXEC_PARTITIONS],
    pub exec_part_info: [ExecPartitionInfo; MAX_EXEC_PARTITIONS],
}

/// Mapping of execution partitions to their system pipes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct ExecSyspipeInfo {
    pub exec_part_count: u32,
    pub exec_part_id: [u32; MAX_EXEC_PARTITIONS],
    pub syspipe_id: [u32; MAX_EXEC_PARTITIONS],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct ComputeProfile {
    pub gfx_gpc_count: u32,
    pub compute_size: u32,
    pub gpc_count: u32,
    pub veid_count: u32,
    pub sm_count: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct ComputeProfilesParams {
    pub profile_count: u32,
    pub profiles: [ComputeProfile; MAX_COMPUTE_PROFILES],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeros)]
pub struct GidInfoParams {
    pub index: u32,
    pub flags: u32,
    pub length: u32,
    pub data: [u8; GID_MAX_LENGTH],
}

/// VBIOS SKU strings. The byte arrays are NUL-padded ASCII.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct SkuInfoParams {
    pub board_id: u32,
    pub sku_config_version: u32,
    pub chip_sku: [u8; SKU_CHIP_SKU_SIZE],
    pub chip_sku_mod: [u8; SKU_CHIP_SKU_MOD_SIZE],
    pub project: [u8; SKU_PROJECT_SIZE],
    pub project_sku: [u8; SKU_PROJECT_SKU_SIZE],
    pub cdp: [u8; SKU_CDP_SIZE],
    pub project_sku_mod: [u8; SKU_PROJECT_SKU_MOD_SIZE],
    pub business_cycle: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct ConstructedFalconInfo {
    pub eng_desc: u32,
    pub ctx_attr: u32,
    pub ctx_buffer_size: u32,
    pub addr_space_list: u32,
    pub register_base: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeros)]
pub struct ConstructedFalconInfoParams {
    pub num_constructed_falcons: u32,
    pub constructed_falcons_table: [ConstructedFalconInfo; MAX_CONSTRUCTED_FALCONS],
}

/// One entry of the device info table. `gin_target_id`,
/// `device_broadcast_pri_base` and `group_local_instance_id` are only
/// provided by newer protocol revisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct DeviceInfo {
    pub fault_id: u32,
    pub instance_id: u32,
    pub type_enum: u32,
    pub reset_id: u32,
    pub device_pri_base: u32,
    pub is_engine: u32,
    pub rl_eng_id: u32,
    pub runlist_pri_base: u32,
    pub group_id: u32,
    pub gin_target_id: u32,
    pub device_broadcast_pri_base: u32,
    pub group_local_instance_id: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeros)]
pub struct DeviceInfoTableParams {
    pub num_entries: u32,
    pub device_info_table: [DeviceInfo; DEVICE_INFO_MAX_ENTRIES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct CcuSampleInfoParams {
    pub ccu_sample_size: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct P2pCapabilityParams {
    pub gpu_supports_fabric_probe: bool,
}

/// Error containment interrupt masks of a virtual function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct ErrorContIntrMaskParams {
    pub ecc_mask: u32,
    pub nvlink_mask: u32,
}

impl_zeroed_default!(
    GidInfoParams,
    ConstructedFalconInfoParams,
    DeviceInfoTableParams
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_default() {
        let gid = GidInfoParams::default();
        assert_eq!(gid.length, 0);
        assert!(gid.data.iter().all(|&b| b == 0));

        let table = DeviceInfoTableParams::default();
        assert_eq!(table.device_info_table.len(), DEVICE_INFO_MAX_ENTRIES);
        assert_eq!(table.device_info_table[0], DeviceInfo::default());
    }
}
