// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

#![no_main]

use arbitrary::Arbitrary;
use core::hint::black_box;
use libfuzzer_sys::{fuzz_target, Corpus};
use rpccopy::dispatch::{decode_record, wire_size, LogicalRecord};
use rpccopy::ProtocolVersion;
use rpcsdk::{bus, ce, fb, fifo, gpu, gr, mc, vgpu};
use zerocopy::FromZeros;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    record: u8,
    major: u8,
    minor: u8,
    offset: u16,
    data: &'a [u8],
}

type Target = fn(ProtocolVersion, &[u8], u32);

fn decode_one<P: LogicalRecord + FromZeros>(version: ProtocolVersion, data: &[u8], start: u32) {
    let Ok(mut dst) = P::new_box_zeroed() else {
        return;
    };
    let buffer_size = u32::try_from(data.len()).unwrap_or(u32::MAX);
    let mut offset = start;
    let res = decode_record(version, Some(&mut *dst), Some(data), buffer_size, Some(&mut offset));
    match wire_size::<P>(version) {
        Ok(size) => assert_eq!(offset, start.saturating_add(size)),
        Err(_) => assert!(res.is_err() && offset == start),
    }
    black_box(dst);
}

macro_rules! targets {
    ($($params:ty),+ $(,)?) => {
        &[$(decode_one::<$params> as Target,)+]
    };
}

const TARGETS: &[Target] = targets!(
    gpu::EccStatusParams,
    gpu::GpuPartitionInfo,
    gpu::ExecPartitionsParams,
    gpu::ExecSyspipeInfo,
    gpu::ComputeProfilesParams,
    gpu::GidInfoParams,
    gpu::SkuInfoParams,
    gpu::ConstructedFalconInfoParams,
    gpu::DeviceInfoTableParams,
    gpu::CcuSampleInfoParams,
    gpu::P2pCapabilityParams,
    gpu::ErrorContIntrMaskParams,
    gr::GrZcullInfo,
    gr::SmIssueRateModifierParams,
    gr::SmIssueRateModifierV2Params,
    gr::StaticGrInfoParams,
    gr::GlobalSmOrderParams,
    gr::RopInfoParams,
    gr::PpcMasksParams,
    gr::ContextBuffersInfoParams,
    gr::FloorsweepingMasksParams,
    gr::StaticZcullInfoParams,
    gr::FecsRecordSizeParams,
    gr::FecsTraceDefinesParams,
    gr::PdbPropertiesParams,
    gr::StaticSmIssueRateModifierParams,
    gr::StaticSmIssueRateModifierV2Params,
    bus::BusInfoV2Params,
    bus::PcieSupportedGpuAtomicsParams,
    bus::PcieReqAtomicsCapsParams,
    bus::C2cInfoParams,
    bus::NvlinkCapsParams,
    fb::FbRegionInfoParams,
    fb::DynamicBlacklistedPages,
    fb::LtcInfoForFbp,
    fb::VgpuLtcInfoForFbp,
    fb::ZbcTableSizes,
    fb::MemsysStaticConfig,
    fb::FlaRangeParams,
    mc::EngineNotificationIntrVectorsParams,
    mc::StaticIntrTableParams,
    ce::CeCapsV2Table,
    ce::CeAllCapsParams,
    ce::BspCapsTable,
    ce::MsencCapsParams,
    fifo::FifoDeviceInfoTable,
    fifo::LatencyBufferSizes,
    vgpu::VgpuStaticData,
    vgpu::VgpuStaticProperties,
    vgpu::VgxSystemInfo,
    vgpu::VgpuConfig,
    vgpu::LegacyStaticInfo,
    vgpu::LegacyStaticInfo2,
);

fuzz_target!(|input: Input<'_>| -> Corpus {
    let Some(target) = TARGETS.get(usize::from(input.record)) else {
        return Corpus::Reject;
    };
    let version = ProtocolVersion::new(input.major, input.minor);
    target(version, input.data, u32::from(input.offset));
    Corpus::Keep
});
