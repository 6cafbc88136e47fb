// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use super::{load_prefix, store_prefix, wire_fields, WireField};
use crate::codec::{check_count, WireRecord};
use crate::dispatch::{copy_entry, LogicalRecord, RecordKind, VersionEntry};
use crate::error::RpcError;
use rpcsdk::bus::*;
use zerocopy::little_endian::{U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Bus info list capacity of the v1C_09 layout. The list grew by one
/// entry later; the normalized structure has room for the larger list.
const BUS_INFO_LIST_SIZE_V1C_09: usize = 0x33;

const _: () = assert!(BUS_INFO_LIST_SIZE_V1C_09 <= BUS_INFO_MAX_LIST_SIZE);

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct BusInfoWire {
    index: U32,
    data: U32,
}

wire_fields!(BusInfoWire => BusInfo { index, data });

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct BusInfoV2V1C_09 {
    bus_info_list_size: U32,
    bus_info_list: [BusInfoWire; BUS_INFO_LIST_SIZE_V1C_09],
}

const _: () = assert!(size_of::<BusInfoV2V1C_09>() == 4 + 0x33 * 8);

impl WireRecord for BusInfoV2V1C_09 {
    type Params = BusInfoV2Params;

    fn validate(&self) -> Result<(), RpcError> {
        check_count(self.bus_info_list_size.get(), BUS_INFO_LIST_SIZE_V1C_09).map(|_| ())
    }

    fn copy_to(&self, p: &mut BusInfoV2Params) {
        let count = self.bus_info_list_size.get() as usize;
        self.bus_info_list_size.load(&mut p.bus_info_list_size);
        load_prefix(&self.bus_info_list, &mut p.bus_info_list, count);
    }

    fn validate_params(p: &BusInfoV2Params) -> Result<(), RpcError> {
        check_count(p.bus_info_list_size, BUS_INFO_LIST_SIZE_V1C_09).map(|_| ())
    }

    fn copy_from(&mut self, p: &BusInfoV2Params) {
        let count = p.bus_info_list_size as usize;
        self.bus_info_list_size.store(&p.bus_info_list_size);
        store_prefix(&mut self.bus_info_list, &p.bus_info_list, count);
    }
}

impl LogicalRecord for BusInfoV2Params {
    const KIND: RecordKind = RecordKind::BusInfoV2;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V1C_09, BusInfoV2V1C_09)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PcieAtomicOpWire {
    supported: u8,
    _pad: [u8; 3],
    attributes: U32,
}

wire_fields!(PcieAtomicOpWire => PcieAtomicOp { supported, attributes });

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PcieSupportedGpuAtomicsV1F_08 {
    atomic_op: [PcieAtomicOpWire; PCIE_ATOMICS_OP_TYPE_COUNT],
}

impl WireRecord for PcieSupportedGpuAtomicsV1F_08 {
    type Params = PcieSupportedGpuAtomicsParams;

    fn copy_to(&self, p: &mut PcieSupportedGpuAtomicsParams) {
        self.atomic_op.load(&mut p.atomic_op);
    }

    fn copy_from(&mut self, p: &PcieSupportedGpuAtomicsParams) {
        self.atomic_op.store(&p.atomic_op);
    }
}

impl LogicalRecord for PcieSupportedGpuAtomicsParams {
    const KIND: RecordKind = RecordKind::PcieSupportedGpuAtomics;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V1F_08, PcieSupportedGpuAtomicsV1F_08)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PcieReqAtomicsCapsV25_0B {
    atomics_caps: U32,
}

impl WireRecord for PcieReqAtomicsCapsV25_0B {
    type Params = PcieReqAtomicsCapsParams;

    fn copy_to(&self, p: &mut PcieReqAtomicsCapsParams) {
        self.atomics_caps.load(&mut p.atomics_caps);
    }

    fn copy_from(&mut self, p: &PcieReqAtomicsCapsParams) {
        self.atomics_caps.store(&p.atomics_caps);
    }
}

impl LogicalRecord for PcieReqAtomicsCapsParams {
    const KIND: RecordKind = RecordKind::PcieReqAtomicsCaps;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V25_0B, PcieReqAtomicsCapsV25_0B)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct C2cInfoV22_01 {
    is_link_up: u8,
    _pad: [u8; 3],
    nr_links: U32,
    link_mask: U32,
    per_link_bw_mbps: U32,
    remote_type: U32,
}

wire_fields!(C2cInfoV22_01 => C2cInfoParams {
    is_link_up,
    nr_links,
    link_mask,
    per_link_bw_mbps,
    remote_type,
});

impl WireRecord for C2cInfoV22_01 {
    type Params = C2cInfoParams;

    fn copy_to(&self, p: &mut C2cInfoParams) {
        self.load(p);
    }

    fn copy_from(&mut self, p: &C2cInfoParams) {
        self.store(p);
    }
}

impl LogicalRecord for C2cInfoParams {
    const KIND: RecordKind = RecordKind::C2cInfo;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V22_01, C2cInfoV22_01)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct NvlinkCapsV15_02 {
    caps_tbl: U64,
    lowest_nvlink_version: u8,
    highest_nvlink_version: u8,
    lowest_nci_version: u8,
    highest_nci_version: u8,
    discovered_link_mask: U32,
    enabled_link_mask: U32,
    _pad: [u8; 4],
}

const _: () = assert!(size_of::<NvlinkCapsV15_02>() == 24);

wire_fields!(NvlinkCapsV15_02 => NvlinkCapsParams {
    caps_tbl,
    lowest_nvlink_version,
    highest_nvlink_version,
    lowest_nci_version,
    highest_nci_version,
    discovered_link_mask,
    enabled_link_mask,
});

impl WireRecord for NvlinkCapsV15_02 {
    type Params = NvlinkCapsParams;

    fn copy_to(&self, p: &mut NvlinkCapsParams) {
        self.load(p);
    }

    fn copy_from(&mut self, p: &NvlinkCapsParams) {
        self.store(p);
    }
}

impl LogicalRecord for NvlinkCapsParams {
    const KIND: RecordKind = RecordKind::NvlinkCaps;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V15_02, NvlinkCapsV15_02)];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use crate::dispatch::decode_record;
    use crate::version::ProtocolVersion;
    use zerocopy::FromZeros;

    fn bus_info(count: u32) -> BusInfoV2V1C_09 {
        let mut wire = BusInfoV2V1C_09::new_zeroed();
        wire.bus_info_list_size = U32::new(count);
        for (i, entry) in wire.bus_info_list.iter_mut().enumerate() {
            entry.index = U32::new(i as u32);
            entry.data = U32::new(!(i as u32));
        }
        wire
    }

    #[test]
    fn bus_info_list_too_long() {
        let wire = bus_info(0x34);
        let mut dst = BusInfoV2Params::default();
        let mut offset = 8;
        let mut buf = [0u8; 8 + 4 + 0x33 * 8];
        buf[8..].copy_from_slice(wire.as_bytes());
        let err = decode::<BusInfoV2V1C_09>(
            Some(&mut dst),
            Some(&buf),
            buf.len() as u32,
            Some(&mut offset),
        );
        assert_eq!(err, Err(RpcError::OutOfRange));
        assert_eq!(offset, 8 + BusInfoV2V1C_09::WIRE_SIZE);
        assert_eq!(dst, BusInfoV2Params::default());
    }

    #[test]
    fn bus_info_full_list() {
        let wire = bus_info(0x33);
        let mut dst = BusInfoV2Params::default();
        let mut offset = 0;
        decode_record(
            ProtocolVersion::LATEST,
            Some(&mut dst),
            Some(wire.as_bytes()),
            BusInfoV2V1C_09::WIRE_SIZE,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(dst.bus_info_list_size, 0x33);
        assert_eq!(dst.bus_info_list[0x32], BusInfo { index: 0x32, data: !0x32 });
        assert_eq!(dst.bus_info_list[0x33], BusInfo::default());
    }

    #[test]
    fn bus_info_encode_rejects_full_normalized_list() {
        let mut src = BusInfoV2Params::default();
        src.bus_info_list_size = 0x34;
        let mut buf = [0u8; 4 + 0x33 * 8];
        let size = buf.len() as u32;
        let mut offset = 0;
        let err = encode::<BusInfoV2V1C_09>(
            Some(&src),
            Some(&mut buf),
            size,
            Some(&mut offset),
        );
        assert_eq!(err, Err(RpcError::OutOfRange));
    }

    #[test]
    fn nvlink_caps() {
        let mut buf = [0u8; 24];
        buf[0..8].copy_from_slice(&0x8000_0000_0000_0001u64.to_le_bytes());
        buf[8..12].copy_from_slice(&[2, 4, 1, 3]);
        buf[12..16].copy_from_slice(&0xfu32.to_le_bytes());
        buf[16..20].copy_from_slice(&0x3u32.to_le_bytes());

        let mut dst = NvlinkCapsParams::default();
        let mut offset = 0;
        decode::<NvlinkCapsV15_02>(Some(&mut dst), Some(&buf), 24, Some(&mut offset)).unwrap();
        assert_eq!(
            dst,
            NvlinkCapsParams {
                caps_tbl: 0x8000_0000_0000_0001,
                lowest_nvlink_version: 2,
                highest_nvlink_version: 4,
                lowest_nci_version: 1,
                highest_nci_version: 3,
                discovered_link_mask: 0xf,
                enabled_link_mask: 0x3,
            }
        );
    }

    #[test]
    fn c2c_link_state() {
        let src = C2cInfoParams {
            is_link_up: true,
            nr_links: 10,
            link_mask: 0x3ff,
            per_link_bw_mbps: 22500,
            remote_type: 1,
        };
        let mut buf = [0u8; 20];
        let mut offset = 0;
        encode::<C2cInfoV22_01>(Some(&src), Some(&mut buf), 20, Some(&mut offset)).unwrap();
        assert_eq!(buf[0], 1);

        let mut dst = C2cInfoParams::default();
        let mut offset = 0;
        decode::<C2cInfoV22_01>(Some(&mut dst), Some(&buf), 20, Some(&mut offset)).unwrap();
        assert_eq!(dst, src);
    }
}
