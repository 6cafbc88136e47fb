// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use super::{wire_fields, WireField};
use crate::codec::WireRecord;
use crate::dispatch::{copy_entry, LogicalRecord, RecordKind, VersionEntry};
use rpcsdk::ce::*;
use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct CeCapsV2Wire {
    ce_engine_type: U32,
    caps_tbl: [u8; CE_CAPS_TBL_SIZE],
}

wire_fields!(CeCapsV2Wire => CeCapsV2 { ce_engine_type, caps_tbl });

/// Capabilities of every copy engine type.
#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct CeCapsV2V24_09 {
    ce_caps: [CeCapsV2Wire; ENGINE_TYPE_COPY_SIZE],
}

impl WireRecord for CeCapsV2V24_09 {
    type Params = CeCapsV2Table;

    fn copy_to(&self, p: &mut CeCapsV2Table) {
        self.ce_caps.load(&mut p.ce_caps);
    }

    fn copy_from(&mut self, p: &CeCapsV2Table) {
        self.ce_caps.store(&p.ce_caps);
    }
}

impl LogicalRecord for CeCapsV2Table {
    const KIND: RecordKind = RecordKind::CeCapsV2;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V24_09, CeCapsV2V24_09)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct CeAllCapsV21_0A {
    present: U32,
    caps_tbl: [[u8; CE_CAPS_TBL_SIZE]; MAX_PCES],
}

const _: () = assert!(size_of::<CeAllCapsV21_0A>() == 4 + 32 * 4);

impl WireRecord for CeAllCapsV21_0A {
    type Params = CeAllCapsParams;

    fn copy_to(&self, p: &mut CeAllCapsParams) {
        self.present.load(&mut p.present);
        self.caps_tbl.load(&mut p.caps_tbl);
    }

    fn copy_from(&mut self, p: &CeAllCapsParams) {
        self.present.store(&p.present);
        self.caps_tbl.store(&p.caps_tbl);
    }
}

impl LogicalRecord for CeAllCapsParams {
    const KIND: RecordKind = RecordKind::CeAllCaps;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V21_0A, CeAllCapsV21_0A)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct BspCapsWire {
    caps_tbl: [u8; BSP_CAPS_TBL_SIZE],
}

wire_fields!(BspCapsWire => BspCaps { caps_tbl });

/// Decoder capabilities, one table per NVDEC engine.
#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct BspCapsV25_00 {
    bsp_caps: [BspCapsWire; MAX_NVDEC_ENGINES],
}

impl WireRecord for BspCapsV25_00 {
    type Params = BspCapsTable;

    fn copy_to(&self, p: &mut BspCapsTable) {
        self.bsp_caps.load(&mut p.bsp_caps);
    }

    fn copy_from(&mut self, p: &BspCapsTable) {
        self.bsp_caps.store(&p.bsp_caps);
    }
}

impl LogicalRecord for BspCapsTable {
    const KIND: RecordKind = RecordKind::BspCaps;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V25_00, BspCapsV25_00)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct MsencCapsV25_00 {
    instance_id: U32,
    caps_tbl: [u8; MSENC_CAPS_TBL_SIZE],
}

wire_fields!(MsencCapsV25_00 => MsencCapsParams { instance_id, caps_tbl });

impl WireRecord for MsencCapsV25_00 {
    type Params = MsencCapsParams;

    fn copy_to(&self, p: &mut MsencCapsParams) {
        self.load(p);
    }

    fn copy_from(&mut self, p: &MsencCapsParams) {
        self.store(p);
    }
}

impl LogicalRecord for MsencCapsParams {
    const KIND: RecordKind = RecordKind::MsencCaps;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V25_00, MsencCapsV25_00)];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use crate::dispatch::wire_size;
    use crate::version::ProtocolVersion;

    #[test]
    fn ce_caps_per_engine_type() {
        let mut buf = [0u8; 80];
        for (i, entry) in buf.chunks_exact_mut(8).enumerate() {
            entry[0..4].copy_from_slice(&(i as u32 + 0xd).to_le_bytes());
            entry[4..8].copy_from_slice(&[i as u8, 0, 0, 0x80]);
        }
        let mut dst = CeCapsV2Table::default();
        let mut offset = 0;
        decode::<CeCapsV2V24_09>(Some(&mut dst), Some(&buf), 80, Some(&mut offset)).unwrap();
        assert_eq!(offset, 80);
        assert_eq!(
            dst.ce_caps[9],
            CeCapsV2 {
                ce_engine_type: 0x16,
                caps_tbl: [9, 0, 0, 0x80],
            }
        );
    }

    #[test]
    fn all_caps_round_trip() {
        let mut src = CeAllCapsParams {
            present: 0x8000_0001,
            ..Default::default()
        };
        src.caps_tbl[0] = [1, 2, 3, 4];
        src.caps_tbl[31] = [5, 6, 7, 8];

        let mut buf = [0u8; 132];
        let mut offset = 0;
        encode::<CeAllCapsV21_0A>(Some(&src), Some(&mut buf), 132, Some(&mut offset)).unwrap();
        assert_eq!(&buf[128..], &[5, 6, 7, 8]);

        let mut dst = CeAllCapsParams::default();
        let mut offset = 0;
        decode::<CeAllCapsV21_0A>(Some(&mut dst), Some(&buf), 132, Some(&mut offset)).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn video_caps_sizes() {
        assert_eq!(wire_size::<BspCapsTable>(ProtocolVersion::V25_00), Ok(64));
        assert_eq!(wire_size::<MsencCapsParams>(ProtocolVersion::LATEST), Ok(8));
        assert!(wire_size::<MsencCapsParams>(ProtocolVersion::V24_09).is_err());
    }
}
