// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use super::{wire_fields, WireField};
use crate::codec::WireRecord;
use crate::dispatch::{copy_entry, LogicalRecord, RecordKind, VersionEntry};
use rpcsdk::fifo::*;
use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct FifoDeviceInfoEntryWire {
    engine_data: [U32; FIFO_DEVICE_INFO_ENGINE_DATA_TYPES],
    pbdma_ids: [U32; FIFO_DEVICE_INFO_MAX_PBDMA],
    pbdma_fault_ids: [U32; FIFO_DEVICE_INFO_MAX_PBDMA],
    num_pbdmas: U32,
    engine_name: [u8; FIFO_DEVICE_INFO_ENGINE_NAME_LEN],
}

const _: () = assert!(size_of::<FifoDeviceInfoEntryWire>() == 100);

wire_fields!(FifoDeviceInfoEntryWire => FifoDeviceInfoEntry {
    engine_data,
    pbdma_ids,
    pbdma_fault_ids,
    num_pbdmas,
    engine_name,
});

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct FifoDeviceInfoPageWire {
    base_index: U32,
    num_entries: U32,
    more: u8,
    _pad: [u8; 3],
    entries: [FifoDeviceInfoEntryWire; FIFO_DEVICE_INFO_MAX_ENTRIES],
}

wire_fields!(FifoDeviceInfoPageWire => FifoDeviceInfoTableParams {
    base_index,
    num_entries,
    more,
    entries,
});

/// The host device table, fetched in fixed size pages. Every page slot is
/// transferred whether or not the host filled it.
#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct FifoDeviceInfoTableV1A_07 {
    pages: [FifoDeviceInfoPageWire; FIFO_DEVICE_INFO_ITERATIONS],
}

const _: () = assert!(size_of::<FifoDeviceInfoTableV1A_07>() == 8 * (12 + 32 * 100));

impl WireRecord for FifoDeviceInfoTableV1A_07 {
    type Params = FifoDeviceInfoTable;

    fn copy_to(&self, p: &mut FifoDeviceInfoTable) {
        self.pages.load(&mut p.pages);
    }

    fn copy_from(&mut self, p: &FifoDeviceInfoTable) {
        self.pages.store(&p.pages);
    }
}

impl LogicalRecord for FifoDeviceInfoTable {
    const KIND: RecordKind = RecordKind::FifoDeviceInfoTable;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V1A_07, FifoDeviceInfoTableV1A_07)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct LatencyBufferSizeWire {
    engine_id: U32,
    gp_entries: U32,
    pb_entries: U32,
}

wire_fields!(LatencyBufferSizeWire => LatencyBufferSize {
    engine_id,
    gp_entries,
    pb_entries,
});

// Each revision covers the engine types known at the time. Engines past
// the end of an older layout are left untouched.
macro_rules! latency_buffer_layouts {
    ($($name:ident = $engines:expr),+ $(,)?) => {
        $(
            #[repr(C, packed)]
            #[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
            pub struct $name {
                fifo_latency_buffer_size: [LatencyBufferSizeWire; $engines],
            }

            const _: () = assert!($engines <= ENGINE_TYPE_LAST);

            impl WireRecord for $name {
                type Params = LatencyBufferSizes;

                fn copy_to(&self, p: &mut LatencyBufferSizes) {
                    self.fifo_latency_buffer_size
                        .load(&mut p.fifo_latency_buffer_size);
                }

                fn copy_from(&mut self, p: &LatencyBufferSizes) {
                    self.fifo_latency_buffer_size
                        .store(&p.fifo_latency_buffer_size);
                }
            }
        )+
    };
}

latency_buffer_layouts!(LatencyBufferSizesV1C_09 = 0x34, LatencyBufferSizesV27_02 = 0x40);

impl LogicalRecord for LatencyBufferSizes {
    const KIND: RecordKind = RecordKind::LatencyBufferSize;
    const HISTORY: &'static [VersionEntry<Self>] = &[
        copy_entry!(V1C_09, LatencyBufferSizesV1C_09),
        copy_entry!(V27_02, LatencyBufferSizesV27_02),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use crate::dispatch::{decode_record, wire_size};
    use crate::cursor::CursorError;
    use crate::error::RpcError;
    use crate::version::ProtocolVersion;
    use zerocopy::FromZeros;

    #[test]
    fn device_table_copies_every_slot() {
        let mut wire = FifoDeviceInfoTableV1A_07::new_box_zeroed().unwrap();
        wire.pages[0].num_entries = U32::new(2);
        wire.pages[0].more = 1;
        // Stale slot beyond num_entries still travels.
        wire.pages[0].entries[31].num_pbdmas = U32::new(2);
        wire.pages[7].base_index = U32::new(224);
        wire.pages[7].entries[0].engine_name = *b"GR0\0\0\0\0\0\0\0\0\0\0\0\0\0";
        wire.pages[7].entries[0].pbdma_fault_ids = [U32::new(0x20), U32::new(0x21)];

        let mut dst = FifoDeviceInfoTable::new_box_zeroed().unwrap();
        let mut offset = 0;
        decode::<FifoDeviceInfoTableV1A_07>(
            Some(&mut *dst),
            Some(wire.as_bytes()),
            FifoDeviceInfoTableV1A_07::WIRE_SIZE,
            Some(&mut offset),
        )
        .unwrap();
        assert!(dst.pages[0].more);
        assert!(!dst.pages[1].more);
        assert_eq!(dst.pages[0].entries[31].num_pbdmas, 2);
        assert_eq!(dst.pages[7].base_index, 224);
        assert_eq!(&dst.pages[7].entries[0].engine_name[..4], b"GR0\0");
        assert_eq!(dst.pages[7].entries[0].pbdma_fault_ids, [0x20, 0x21]);
    }

    #[test]
    fn device_table_short_buffer() {
        let buf = [0u8; 64];
        let mut dst = FifoDeviceInfoTable::new_box_zeroed().unwrap();
        let mut offset = 0;
        let err = decode::<FifoDeviceInfoTableV1A_07>(
            Some(&mut *dst),
            Some(&buf),
            buf.len() as u32,
            Some(&mut offset),
        );
        assert_eq!(err, Err(RpcError::Cursor(CursorError::OutOfBounds)));
        assert_eq!(offset, FifoDeviceInfoTableV1A_07::WIRE_SIZE);
    }

    #[test]
    fn latency_older_layout_keeps_new_engines() {
        let mut wire = LatencyBufferSizesV1C_09::new_zeroed();
        for (i, e) in wire.fifo_latency_buffer_size.iter_mut().enumerate() {
            e.engine_id = U32::new(i as u32);
            e.gp_entries = U32::new(1024);
            e.pb_entries = U32::new(2048);
        }

        let mut dst = LatencyBufferSizes::default();
        dst.fifo_latency_buffer_size[0x3f].gp_entries = 7;
        let mut offset = 0;
        decode_record(
            ProtocolVersion::V26_03,
            Some(&mut dst),
            Some(wire.as_bytes()),
            wire_size::<LatencyBufferSizes>(ProtocolVersion::V26_03).unwrap(),
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(offset, 0x34 * 12);
        assert_eq!(dst.fifo_latency_buffer_size[0x33].engine_id, 0x33);
        assert_eq!(dst.fifo_latency_buffer_size[0x34], LatencyBufferSize::default());
        assert_eq!(dst.fifo_latency_buffer_size[0x3f].gp_entries, 7);
    }

    #[test]
    fn latency_newest_layout() {
        assert_eq!(
            wire_size::<LatencyBufferSizes>(ProtocolVersion::LATEST),
            Ok(0x40 * 12)
        );

        let mut src = LatencyBufferSizes::default();
        src.fifo_latency_buffer_size[0x3f] = LatencyBufferSize {
            engine_id: 0x3f,
            gp_entries: 16,
            pb_entries: 32,
        };
        let mut buf = [0u8; 0x40 * 12];
        let size = buf.len() as u32;
        let mut offset = 0;
        encode::<LatencyBufferSizesV27_02>(
            Some(&src),
            Some(&mut buf),
            size,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(&buf[0x3f * 12..0x3f * 12 + 4], &0x3fu32.to_le_bytes());
    }
}
