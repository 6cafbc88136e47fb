// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

//! The static information stream.
//!
//! At boot the host sends everything the guest needs to know about the GPU
//! in one buffer: a fixed sequence of records, each laid out according to
//! the negotiated protocol version. Records that did not exist yet at that
//! version are simply absent. When alignment is requested every record
//! starts on an 8 byte boundary.

use crate::cursor::{CursorError, WireCursor};
use crate::dispatch::{select, Decoder, LogicalRecord, RecordKind};
use crate::error::RpcError;
use crate::version::ProtocolVersion;
use alloc::boxed::Box;
use rpcsdk::{bus, ce, fb, fifo, gpu, gr, mc, vgpu};
use zerocopy::FromZeros;

/// Alignment of records in the stream when alignment is enabled.
pub const RECORD_ALIGN: u32 = 8;

fn decoder_at<P: LogicalRecord>(version: ProtocolVersion) -> Option<Decoder<P>> {
    match select::<P>(version) {
        None | Some(Decoder::NotSupported) => None,
        Some(decoder) => Some(decoder),
    }
}

fn report<P: LogicalRecord>(res: Result<(), RpcError>) -> Result<(), RpcError> {
    res.map_err(|err| {
        log::error!("static info: {:?} record failed: {}", P::KIND, err);
        err
    })
}

fn decode_step<P: LogicalRecord>(
    dst: Option<&mut P>,
    version: ProtocolVersion,
    cursor: &mut WireCursor<&[u8]>,
    align: bool,
) -> Result<(), RpcError> {
    let Some(decoder) = decoder_at::<P>(version) else {
        return Ok(());
    };
    if align {
        cursor.align(RECORD_ALIGN);
    }
    report::<P>(cursor.decode(|buf, size, off| decoder.decode(dst, buf, size, off)))
}

fn encode_step<P: LogicalRecord>(
    src: Option<&P>,
    version: ProtocolVersion,
    cursor: &mut WireCursor<&mut [u8]>,
    align: bool,
) -> Result<(), RpcError> {
    let Some(decoder) = decoder_at::<P>(version) else {
        return Ok(());
    };
    if align {
        cursor.align(RECORD_ALIGN);
    }
    report::<P>(cursor.encode(|buf, size, off| decoder.encode(src, buf, size, off)))
}

macro_rules! static_stream {
    ($($field:ident: $params:ty),+ $(,)?) => {
        /// Everything the host reports in the static information stream,
        /// normalized to the newest structure layouts.
        #[derive(Debug, FromZeros)]
        pub struct StaticInfo {
            $(pub $field: $params,)+
        }

        /// Record kinds of the stream in wire order.
        pub const STREAM_ORDER: &[RecordKind] = &[$(<$params as LogicalRecord>::KIND,)+];

        fn walk_decode(
            mut dst: Option<&mut StaticInfo>,
            version: ProtocolVersion,
            cursor: &mut WireCursor<&[u8]>,
            align: bool,
        ) -> Result<(), RpcError> {
            $(decode_step::<$params>(dst.as_mut().map(|d| &mut d.$field), version, cursor, align)?;)+
            Ok(())
        }

        fn walk_encode(
            src: Option<&StaticInfo>,
            version: ProtocolVersion,
            cursor: &mut WireCursor<&mut [u8]>,
            align: bool,
        ) -> Result<(), RpcError> {
            $(encode_step::<$params>(src.map(|s| &s.$field), version, cursor, align)?;)+
            Ok(())
        }
    };
}

static_stream!(
    exec_partitions: gpu::ExecPartitionsParams,
    vgpu_static_data: vgpu::VgpuStaticData,
    ecc_status: gpu::EccStatusParams,
    vgx_system_info: vgpu::VgxSystemInfo,
    gid_info: gpu::GidInfoParams,
    sku_info: gpu::SkuInfoParams,
    fb_region_info: fb::FbRegionInfoParams,
    compute_profiles: gpu::ComputeProfilesParams,
    zbc_table_sizes: fb::ZbcTableSizes,
    fb_ltc_info_for_fbp: fb::LtcInfoForFbp,
    engine_notification_intr_vectors: mc::EngineNotificationIntrVectorsParams,
    gr_zcull_info: gr::GrZcullInfo,
    static_properties: vgpu::VgpuStaticProperties,
    fifo_device_info_table: fifo::FifoDeviceInfoTable,
    blacklisted_pages: fb::DynamicBlacklistedPages,
    bsp_caps: ce::BspCapsTable,
    latency_buffer_size: fifo::LatencyBufferSizes,
    ce_caps_v2: ce::CeCapsV2Table,
    nvlink_caps: bus::NvlinkCapsParams,
    vgpu_ltc_info_for_fbp: fb::VgpuLtcInfoForFbp,
    bus_info_v2: bus::BusInfoV2Params,
    fla_range: fb::FlaRangeParams,
    vgpu_config: vgpu::VgpuConfig,
    sm_issue_rate_modifier: gr::SmIssueRateModifierParams,
    static_intr_table: mc::StaticIntrTableParams,
    pcie_supported_gpu_atomics: bus::PcieSupportedGpuAtomicsParams,
    ce_all_caps: ce::CeAllCapsParams,
    c2c_info: bus::C2cInfoParams,
    msenc_caps: ce::MsencCapsParams,
    constructed_falcon_info: gpu::ConstructedFalconInfoParams,
    p2p_capability: gpu::P2pCapabilityParams,
    device_info_table: gpu::DeviceInfoTableParams,
    memsys_static_config: fb::MemsysStaticConfig,
    pcie_req_atomics_caps: bus::PcieReqAtomicsCapsParams,
    gpu_partition_info: gpu::GpuPartitionInfo,
    error_cont_intr_mask: gpu::ErrorContIntrMaskParams,
    exec_syspipe_info: gpu::ExecSyspipeInfo,
    // Internal GR state, consumed by the guest GR engine at init.
    gr_info: gr::StaticGrInfoParams,
    global_sm_order: gr::GlobalSmOrderParams,
    rop_info: gr::RopInfoParams,
    ppc_masks: gr::PpcMasksParams,
    context_buffers_info: gr::ContextBuffersInfoParams,
    static_sm_issue_rate_modifier: gr::StaticSmIssueRateModifierParams,
    floorsweeping_masks: gr::FloorsweepingMasksParams,
    static_zcull_info: gr::StaticZcullInfoParams,
    fecs_record_size: gr::FecsRecordSizeParams,
    fecs_trace_defines: gr::FecsTraceDefinesParams,
    pdb_properties: gr::PdbPropertiesParams,
);

impl StaticInfo {
    /// Allocates a zeroed aggregate on the heap. It is far too large for
    /// the stack.
    pub fn new_boxed() -> Result<Box<Self>, RpcError> {
        Self::new_box_zeroed().map_err(|_| RpcError::NoMemory)
    }
}

/// Walks the static stream at `offset`, filling `dst`.
///
/// Without a destination or buffer only the offset moves. On failure the
/// walk stops and `offset` points past the record that failed.
pub fn copy_static_info(
    dst: Option<&mut StaticInfo>,
    version: ProtocolVersion,
    buffer: Option<&[u8]>,
    buffer_size: u32,
    offset: Option<&mut u32>,
    align: bool,
) -> Result<(), RpcError> {
    let offset = offset.ok_or(CursorError::NullCursor)?;
    let mut cursor = WireCursor::with_offset(buffer, buffer_size, *offset);
    let res = walk_decode(dst, version, &mut cursor, align);
    *offset = cursor.offset();
    res
}

/// Writes `src` as a static stream at `offset`. The mirror of
/// [`copy_static_info`].
pub fn encode_static_info(
    src: Option<&StaticInfo>,
    version: ProtocolVersion,
    buffer: Option<&mut [u8]>,
    buffer_size: u32,
    offset: Option<&mut u32>,
    align: bool,
) -> Result<(), RpcError> {
    let offset = offset.ok_or(CursorError::NullCursor)?;
    let mut cursor = WireCursor::with_offset(buffer, buffer_size, *offset);
    let res = walk_encode(src, version, &mut cursor, align);
    *offset = cursor.offset();
    res
}

/// Size in bytes of the static stream at `version`.
pub fn static_info_size(version: ProtocolVersion, align: bool) -> Result<u32, RpcError> {
    let mut size = 0;
    copy_static_info(None, version, None, 0, Some(&mut size), align)?;
    Ok(size)
}
