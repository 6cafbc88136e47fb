// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

//! Records describing the virtual GPU itself rather than the physical
//! engines behind it.

use super::{wire_fields, WireField};
use crate::codec::WireRecord;
use crate::dispatch::{
    copy_entry, empty_entry, not_supported, LogicalRecord, RecordKind, VersionEntry,
};
use rpcsdk::vgpu::*;
use zerocopy::little_endian::{U16, U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

// The host still sends the graphics context buffer sizes, but the guest
// computes them itself. They are never copied.
macro_rules! vgpu_static_data_layouts {
    ($($name:ident { engine_words: $words:expr, ctx_buffers: $bufs:expr }),+ $(,)?) => {
        $(
            #[repr(C, packed)]
            #[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
            pub struct $name {
                fb_tax_length: U64,
                fb_length: U64,
                fb_bus_width: U32,
                fbio_mask: U32,
                fbp_mask: U32,
                ltc_mask: U32,
                lts_count: U32,
                sub_process_isolation: U32,
                engine_list: [U64; $words],
                size_l2_cache: U32,
                poison_fuse_enabled: u8,
                guest_managed_hw_alloc: u8,
                _pad0: [u8; 2],
                adapter_name: [u8; ADAPTER_NAME_LEN],
                adapter_name_unicode: [U16; ADAPTER_NAME_LEN],
                short_gpu_name_string: [u8; SHORT_GPU_NAME_LEN],
                split_vas_between_server_client_rm: u8,
                _pad1: [u8; 3],
                max_supported_page_size: U32,
                fla: u8,
                per_runlist_channel_ram: u8,
                ats: u8,
                per_sub_ctxheader: u8,
                c2c_link_up: u8,
                local_egm_enabled: u8,
                _pad2: [u8; 2],
                local_egm_peer_id: U32,
                self_hosted_mode: u8,
                _pad3: [u8; 3],
                ce_fault_method_buffer_depth: U32,
                pcie_gpu_link_caps: U32,
                gr_caps_bits: [u8; GR_CAPS_TBL_SIZE],
                _pad4: u8,
                gr_buffer_size: [U32; $bufs],
                gfxp_buffer_size: [U32; $bufs],
                gfxp_buffer_alignment: [U32; $bufs],
                jpeg_caps: [u8; NVJPG_CAPS_TBL_SIZE],
                _pad5: [u8; 3],
            }

            wire_fields!($name => VgpuStaticData {
                fb_tax_length,
                fb_length,
                fb_bus_width,
                fbio_mask,
                fbp_mask,
                ltc_mask,
                lts_count,
                sub_process_isolation,
                engine_list,
                size_l2_cache,
                poison_fuse_enabled,
                guest_managed_hw_alloc,
                adapter_name,
                adapter_name_unicode,
                short_gpu_name_string,
                split_vas_between_server_client_rm,
                max_supported_page_size,
                fla,
                per_runlist_channel_ram,
                ats,
                per_sub_ctxheader,
                c2c_link_up,
                local_egm_enabled,
                local_egm_peer_id,
                self_hosted_mode,
                ce_fault_method_buffer_depth,
                pcie_gpu_link_caps,
                gr_caps_bits,
                jpeg_caps,
            });

            impl WireRecord for $name {
                type Params = VgpuStaticData;

                fn copy_to(&self, p: &mut VgpuStaticData) {
                    self.load(p);
                }

                fn copy_from(&mut self, p: &VgpuStaticData) {
                    self.store(p);
                }
            }
        )+
    };
}

// Before v27_01 the engine list is a single word and only fills the
// first word of the normalized bitmap.
vgpu_static_data_layouts!(
    VgpuStaticDataV25_0E { engine_words: 1, ctx_buffers: 10 },
    VgpuStaticDataV27_00 { engine_words: 1, ctx_buffers: 11 },
    VgpuStaticDataV27_01 { engine_words: ENGINE_LIST_WORDS, ctx_buffers: 11 },
    VgpuStaticDataV2A_07 { engine_words: ENGINE_LIST_WORDS, ctx_buffers: 12 },
);

impl LogicalRecord for VgpuStaticData {
    const KIND: RecordKind = RecordKind::VgpuStaticData;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        copy_entry!(V25_0E, VgpuStaticDataV25_0E),
        copy_entry!(V27_00, VgpuStaticDataV27_00),
        copy_entry!(V27_01, VgpuStaticDataV27_01),
        copy_entry!(V2A_07, VgpuStaticDataV2A_07),
    ];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct VgpuStaticPropertiesV1B_01 {
    enc_session_stats_reporting_state: U32,
    profiling_tracing_enabled: u8,
    debugging_enabled: u8,
    _pad0: [u8; 2],
    channel_count: U32,
    pbl_obj_not_present: u8,
    _pad1: [u8; 3],
}

const _: () = assert!(size_of::<VgpuStaticPropertiesV1B_01>() == 16);

wire_fields!(VgpuStaticPropertiesV1B_01 => VgpuStaticProperties {
    enc_session_stats_reporting_state,
    profiling_tracing_enabled,
    debugging_enabled,
    channel_count,
    pbl_obj_not_present,
});

impl WireRecord for VgpuStaticPropertiesV1B_01 {
    type Params = VgpuStaticProperties;

    fn copy_to(&self, p: &mut VgpuStaticProperties) {
        self.load(p);
    }

    fn copy_from(&mut self, p: &VgpuStaticProperties) {
        self.store(p);
    }
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct VgpuStaticPropertiesV26_03 {
    base: VgpuStaticPropertiesV1B_01,
    vmmu_segment_size: U64,
}

impl WireRecord for VgpuStaticPropertiesV26_03 {
    type Params = VgpuStaticProperties;

    fn copy_to(&self, p: &mut VgpuStaticProperties) {
        self.base.load(p);
        self.vmmu_segment_size.load(&mut p.vmmu_segment_size);
    }

    fn copy_from(&mut self, p: &VgpuStaticProperties) {
        self.base.store(p);
        self.vmmu_segment_size.store(&p.vmmu_segment_size);
    }
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct VgpuStaticPropertiesV29_03 {
    base: VgpuStaticPropertiesV26_03,
    first_async_ce_idx: U32,
    _pad: [u8; 4],
}

const _: () = assert!(size_of::<VgpuStaticPropertiesV29_03>() == 32);

impl WireRecord for VgpuStaticPropertiesV29_03 {
    type Params = VgpuStaticProperties;

    fn copy_to(&self, p: &mut VgpuStaticProperties) {
        self.base.copy_to(p);
        self.first_async_ce_idx.load(&mut p.first_async_ce_idx);
    }

    fn copy_from(&mut self, p: &VgpuStaticProperties) {
        self.base.copy_from(p);
        self.first_async_ce_idx.store(&p.first_async_ce_idx);
    }
}

impl LogicalRecord for VgpuStaticProperties {
    const KIND: RecordKind = RecordKind::VgpuStaticProperties;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        copy_entry!(V1B_01, VgpuStaticPropertiesV1B_01),
        copy_entry!(V26_03, VgpuStaticPropertiesV26_03),
        copy_entry!(V29_03, VgpuStaticPropertiesV29_03),
    ];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct VgxSystemInfoV03_00 {
    host_driver_version_buffer: [u8; VGX_SYSTEM_INFO_STRING_LEN],
    host_version_buffer: [u8; VGX_SYSTEM_INFO_STRING_LEN],
    host_title_buffer: [u8; VGX_SYSTEM_INFO_STRING_LEN],
    plugin_title_buffer: [u8; VGX_SYSTEM_INFO_STRING_LEN],
    host_uname_buffer: [u8; VGX_SYSTEM_INFO_STRING_LEN],
    host_changelist_number: U32,
    plugin_changelist_number: U32,
}

const _: () = assert!(size_of::<VgxSystemInfoV03_00>() == 5 * 256 + 8);

wire_fields!(VgxSystemInfoV03_00 => VgxSystemInfo {
    host_driver_version_buffer,
    host_version_buffer,
    host_title_buffer,
    plugin_title_buffer,
    host_uname_buffer,
    host_changelist_number,
    plugin_changelist_number,
});

impl WireRecord for VgxSystemInfoV03_00 {
    type Params = VgxSystemInfo;

    fn copy_to(&self, p: &mut VgxSystemInfo) {
        self.load(p);
    }

    fn copy_from(&mut self, p: &VgxSystemInfo) {
        self.store(p);
    }
}

impl LogicalRecord for VgxSystemInfo {
    const KIND: RecordKind = RecordKind::VgxSystemInfo;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V03_00, VgxSystemInfoV03_00)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct VgpuConfigV21_0C {
    frame_rate_limiter: U32,
    sw_vsync_enabled: U32,
    cuda_enabled: U32,
    plugin_pte_blit_enabled: U32,
    disable_wddm1x_preemption: U32,
    debug_buffer_size: U32,
    debug_buffer: U64,
    guest_fb_offset: U64,
    mappable_cpu_host_aperture: U64,
    linux_interrupt_optimization: U32,
    vgpu_device_caps_bits: U32,
    max_pixels: U32,
    uvm_enabled_features: U32,
    enable_kmd_sysmem_scratch: u8,
    _pad: [u8; 7],
}

const _: () = assert!(size_of::<VgpuConfigV21_0C>() == 72);

wire_fields!(VgpuConfigV21_0C => VgpuConfig {
    frame_rate_limiter,
    sw_vsync_enabled,
    cuda_enabled,
    plugin_pte_blit_enabled,
    disable_wddm1x_preemption,
    debug_buffer_size,
    debug_buffer,
    guest_fb_offset,
    mappable_cpu_host_aperture,
    linux_interrupt_optimization,
    vgpu_device_caps_bits,
    max_pixels,
    uvm_enabled_features,
    enable_kmd_sysmem_scratch,
});

impl WireRecord for VgpuConfigV21_0C {
    type Params = VgpuConfig;

    fn copy_to(&self, p: &mut VgpuConfig) {
        self.load(p);
    }

    fn copy_from(&mut self, p: &VgpuConfig) {
        self.store(p);
    }
}

impl LogicalRecord for VgpuConfig {
    const KIND: RecordKind = RecordKind::VgpuConfig;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V21_0C, VgpuConfigV21_0C)];
}

// Both halves of the old static info blob are gone. The first half is
// refused at every revision that knew it.
impl LogicalRecord for LegacyStaticInfo {
    const KIND: RecordKind = RecordKind::LegacyStaticInfo;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        not_supported!(V07_00),
        not_supported!(V09_04),
        not_supported!(V12_00),
        not_supported!(V12_01),
        not_supported!(V12_06),
        not_supported!(V12_0A),
        not_supported!(V13_06),
        not_supported!(V16_02),
        not_supported!(V16_05),
        not_supported!(V16_07),
        not_supported!(V17_00),
        not_supported!(V17_01),
        not_supported!(V17_05),
        not_supported!(V18_03),
        not_supported!(V18_04),
        not_supported!(V18_0E),
        not_supported!(V18_10),
        not_supported!(V18_11),
        not_supported!(V18_13),
        not_supported!(V18_16),
        not_supported!(V19_00),
        not_supported!(V1A_00),
        not_supported!(V1A_05),
        not_supported!(V1B_03),
        not_supported!(V1D_01),
        not_supported!(V1F_02),
        not_supported!(V1F_09),
        not_supported!(V20_01),
        not_supported!(V20_04),
        not_supported!(V21_09),
        not_supported!(V23_01),
        not_supported!(V24_05),
    ];
}

// The second half is refused up to v1A_04 and accepted as empty from
// v1A_07 on, without consuming any bytes.
impl LogicalRecord for LegacyStaticInfo2 {
    const KIND: RecordKind = RecordKind::LegacyStaticInfo2;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        not_supported!(V18_07),
        not_supported!(V18_0C),
        not_supported!(V18_0F),
        not_supported!(V1A_02),
        not_supported!(V1A_04),
        empty_entry!(V1A_07),
        empty_entry!(V1C_09),
        empty_entry!(V20_03),
        empty_entry!(V21_04),
        empty_entry!(V21_09),
        empty_entry!(V24_05),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use crate::dispatch::{decode_record, encode_record, wire_size};
    use crate::version::ProtocolVersion;
    use alloc::vec;
    use zerocopy::FromZeros;

    #[test]
    fn single_word_engine_list() {
        let mut wire = VgpuStaticDataV27_00::new_zeroed();
        wire.engine_list = [U64::new(0xf0f0)];
        wire.fb_length = U64::new(16 << 30);
        wire.gr_buffer_size = [U32::new(0x1000); 11];
        wire.adapter_name[..4].copy_from_slice(b"GRID");
        wire.adapter_name_unicode[0] = U16::new(u16::from(b'G'));

        let mut dst = VgpuStaticData::default();
        dst.engine_list = [1, 2, 3];
        let mut offset = 0;
        decode_record(
            ProtocolVersion::V27_00,
            Some(&mut dst),
            Some(wire.as_bytes()),
            VgpuStaticDataV27_00::WIRE_SIZE,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(dst.engine_list, [0xf0f0, 2, 3]);
        assert_eq!(dst.fb_length, 16 << 30);
        assert_eq!(&dst.adapter_name[..5], b"GRID\0");
        assert_eq!(dst.adapter_name_unicode[0], 0x47);
    }

    #[test]
    fn full_engine_list() {
        let mut src = VgpuStaticData::default();
        src.engine_list = [u64::MAX, 0x1, 0x8000_0000_0000_0000];
        src.c2c_link_up = true;
        src.local_egm_peer_id = 7;
        src.jpeg_caps[8] = 0x55;

        let size = wire_size::<VgpuStaticData>(ProtocolVersion::LATEST).unwrap();
        assert_eq!(size, VgpuStaticDataV2A_07::WIRE_SIZE);
        let mut buf = vec![0u8; size as usize];
        let mut offset = 0;
        encode::<VgpuStaticDataV2A_07>(Some(&src), Some(&mut buf), size, Some(&mut offset))
            .unwrap();

        let wire = VgpuStaticDataV2A_07::ref_from_bytes(&buf).unwrap();
        assert_eq!(wire.gr_buffer_size, [U32::ZERO; 12]);

        let mut dst = VgpuStaticData::default();
        let mut offset = 0;
        decode::<VgpuStaticDataV2A_07>(Some(&mut dst), Some(&buf), size, Some(&mut offset))
            .unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn static_data_layout_growth() {
        let v25 = VgpuStaticDataV25_0E::WIRE_SIZE;
        assert_eq!(VgpuStaticDataV27_00::WIRE_SIZE, v25 + 12);
        assert_eq!(VgpuStaticDataV27_01::WIRE_SIZE, v25 + 12 + 16);
        assert_eq!(VgpuStaticDataV2A_07::WIRE_SIZE, v25 + 24 + 16);
    }

    #[test]
    fn properties_without_segment_size() {
        let mut buf = [0u8; 16];
        buf[0..4].copy_from_slice(&2u32.to_le_bytes());
        buf[4] = 1;
        buf[8..12].copy_from_slice(&512u32.to_le_bytes());
        buf[12] = 1;

        let mut dst = VgpuStaticProperties {
            vmmu_segment_size: 0x200000,
            ..Default::default()
        };
        let mut offset = 0;
        decode_record(
            ProtocolVersion::V25_0E,
            Some(&mut dst),
            Some(&buf),
            16,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(
            dst,
            VgpuStaticProperties {
                enc_session_stats_reporting_state: 2,
                profiling_tracing_enabled: true,
                debugging_enabled: false,
                channel_count: 512,
                pbl_obj_not_present: true,
                vmmu_segment_size: 0x200000,
                first_async_ce_idx: 0,
            }
        );
    }

    #[test]
    fn properties_newest() {
        let src = VgpuStaticProperties {
            channel_count: 2048,
            vmmu_segment_size: 0x20_0000,
            first_async_ce_idx: 2,
            ..Default::default()
        };
        let mut buf = [0u8; 32];
        let mut offset = 0;
        encode::<VgpuStaticPropertiesV29_03>(Some(&src), Some(&mut buf), 32, Some(&mut offset))
            .unwrap();
        assert_eq!(&buf[16..24], &0x20_0000u64.to_le_bytes());
        assert_eq!(&buf[24..28], &2u32.to_le_bytes());

        let mut dst = VgpuStaticProperties::default();
        let mut offset = 0;
        decode::<VgpuStaticPropertiesV29_03>(Some(&mut dst), Some(&buf), 32, Some(&mut offset))
            .unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn vgx_strings() {
        let mut wire = VgxSystemInfoV03_00::new_zeroed();
        wire.host_driver_version_buffer[..7].copy_from_slice(b"570.124");
        wire.host_uname_buffer[..5].copy_from_slice(b"Linux");
        wire.plugin_changelist_number = U32::new(35_000_000);

        let mut dst = VgxSystemInfo::default();
        let mut offset = 0;
        decode::<VgxSystemInfoV03_00>(
            Some(&mut dst),
            Some(wire.as_bytes()),
            VgxSystemInfoV03_00::WIRE_SIZE,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(&dst.host_driver_version_buffer[..8], b"570.124\0");
        assert_eq!(&dst.host_uname_buffer[..5], b"Linux");
        assert_eq!(dst.plugin_changelist_number, 35_000_000);
    }

    #[test]
    fn config_round_trip() {
        let src = VgpuConfig {
            frame_rate_limiter: 60,
            cuda_enabled: 1,
            debug_buffer: 0xdead_0000,
            guest_fb_offset: 0x1_0000_0000,
            max_pixels: 3840 * 2160,
            enable_kmd_sysmem_scratch: true,
            ..Default::default()
        };
        let mut buf = [0u8; 72];
        let mut offset = 0;
        encode::<VgpuConfigV21_0C>(Some(&src), Some(&mut buf), 72, Some(&mut offset)).unwrap();
        assert_eq!(buf[64], 1);

        let mut dst = VgpuConfig::default();
        let mut offset = 0;
        decode::<VgpuConfigV21_0C>(Some(&mut dst), Some(&buf), 72, Some(&mut offset)).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn legacy_static_info_is_refused() {
        let buf = [0u8; 16];
        for version in [
            ProtocolVersion::V07_00,
            ProtocolVersion::V1A_05,
            ProtocolVersion::V24_05,
            ProtocolVersion::LATEST,
        ] {
            let mut offset = 8;
            let res = decode_record(
                version,
                Some(&mut LegacyStaticInfo),
                Some(&buf),
                16,
                Some(&mut offset),
            );
            assert_eq!(res, Err(crate::error::RpcError::NotSupported));
            assert_eq!(offset, 8);
        }
        assert_eq!(
            wire_size::<LegacyStaticInfo>(ProtocolVersion::V03_00),
            Err(crate::error::RpcError::NotSupported)
        );
    }

    #[test]
    fn legacy_static_info2_accepted_without_payload() {
        let buf = [0u8; 16];
        for version in [ProtocolVersion::V18_07, ProtocolVersion::V1A_04] {
            let mut offset = 8;
            let res = decode_record(
                version,
                Some(&mut LegacyStaticInfo2),
                Some(&buf),
                16,
                Some(&mut offset),
            );
            assert_eq!(res, Err(crate::error::RpcError::NotSupported));
            assert_eq!(offset, 8);
        }

        for version in [
            ProtocolVersion::V1A_07,
            ProtocolVersion::V21_04,
            ProtocolVersion::V24_05,
            ProtocolVersion::LATEST,
        ] {
            let mut offset = 8;
            decode_record(
                version,
                Some(&mut LegacyStaticInfo2),
                Some(&buf),
                16,
                Some(&mut offset),
            )
            .unwrap();
            assert_eq!(offset, 8);
            assert_eq!(wire_size::<LegacyStaticInfo2>(version), Ok(0));
        }

        let mut offset = 4;
        encode_record(
            ProtocolVersion::V1C_09,
            Some(&LegacyStaticInfo2),
            None,
            0,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(offset, 4);
    }
}
