// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

//! Host provided configuration of a virtual GPU.

use zerocopy::FromZeros;

pub const ADAPTER_NAME_LEN: usize = 64;
pub const SHORT_GPU_NAME_LEN: usize = 64;
/// Number of 64-bit words in the engine list of newer protocol revisions.
pub const ENGINE_LIST_WORDS: usize = 3;
pub const GR_CAPS_TBL_SIZE: usize = 23;
pub const NVJPG_CAPS_TBL_SIZE: usize = 9;
pub const VGX_SYSTEM_INFO_STRING_LEN: usize = 256;

/// Static description of the vGPU, reported once at boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeros)]
pub struct VgpuStaticData {
    pub fb_tax_length: u64,
    pub fb_length: u64,
    pub fb_bus_width: u32,
    pub fbio_mask: u32,
    pub fbp_mask: u32,
    pub ltc_mask: u32,
    pub lts_count: u32,
    pub sub_process_isolation: u32,
    pub size_l2_cache: u32,
    pub poison_fuse_enabled: bool,
    pub guest_managed_hw_alloc: bool,
    pub adapter_name: [u8; ADAPTER_NAME_LEN],
    pub adapter_name_unicode: [u16; ADAPTER_NAME_LEN],
    pub short_gpu_name_string: [u8; SHORT_GPU_NAME_LEN],
    pub split_vas_between_server_client_rm: bool,
    pub max_supported_page_size: u32,
    pub fla: bool,
    pub per_runlist_channel_ram: bool,
    pub ats: bool,
    pub per_sub_ctxheader: bool,
    pub c2c_link_up: bool,
    pub local_egm_enabled: bool,
    pub local_egm_peer_id: u32,
    pub self_hosted_mode: bool,
    pub ce_fault_method_buffer_depth: u32,
    pub pcie_gpu_link_caps: u32,
    /// Engine presence bitmap. Older protocol revisions only fill the
    /// first word.
    pub engine_list: [u64; ENGINE_LIST_WORDS],
    pub gr_caps_bits: [u8; GR_CAPS_TBL_SIZE],
    pub jpeg_caps: [u8; NVJPG_CAPS_TBL_SIZE],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct VgpuStaticProperties {
    pub enc_session_stats_reporting_state: u32,
    pub profiling_tracing_enabled: bool,
    pub debugging_enabled: bool,
    pub channel_count: u32,
    pub pbl_obj_not_present: bool,
    pub vmmu_segment_size: u64,
    pub first_async_ce_idx: u32,
}

/// Host system identification strings. Each string is NUL-padded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeros)]
pub struct VgxSystemInfo {
    pub host_driver_version_buffer: [u8; VGX_SYSTEM_INFO_STRING_LEN],
    pub host_version_buffer: [u8; VGX_SYSTEM_INFO_STRING_LEN],
    pub host_title_buffer: [u8; VGX_SYSTEM_INFO_STRING_LEN],
    pub plugin_title_buffer: [u8; VGX_SYSTEM_INFO_STRING_LEN],
    pub host_uname_buffer: [u8; VGX_SYSTEM_INFO_STRING_LEN],
    pub host_changelist_number: u32,
    pub plugin_changelist_number: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct VgpuConfig {
    pub frame_rate_limiter: u32,
    pub sw_vsync_enabled: u32,
    pub cuda_enabled: u32,
    pub plugin_pte_blit_enabled: u32,
    pub disable_wddm1x_preemption: u32,
    pub debug_buffer_size: u32,
    pub debug_buffer: u64,
    pub guest_fb_offset: u64,
    pub mappable_cpu_host_aperture: u64,
    pub linux_interrupt_optimization: u32,
    pub vgpu_device_caps_bits: u32,
    pub max_pixels: u32,
    pub uvm_enabled_features: u32,
    pub enable_kmd_sysmem_scratch: bool,
}

impl_zeroed_default!(VgpuStaticData, VgxSystemInfo);

/// Monolithic static info blob of protocol revisions that predate the
/// per-record static stream. No field of it is consumed anymore.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct LegacyStaticInfo;

/// Second half of the pre-stream static info blob.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct LegacyStaticInfo2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_data_default_is_zero() {
        let data = VgpuStaticData::default();
        assert_eq!(data.engine_list, [0; ENGINE_LIST_WORDS]);
        assert!(data.adapter_name_unicode.iter().all(|&c| c == 0));
        assert!(!data.fla);
    }
}
