// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use super::{load_prefix, store_prefix, wire_fields, WireField};
use crate::codec::{check_count, WireRecord};
use crate::dispatch::{copy_entry, LogicalRecord, RecordKind, VersionEntry};
use crate::error::RpcError;
use rpcsdk::mc::*;
use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct EngineNotificationIntrVectorWire {
    nv2080_engine_type: U32,
    notification_intr_vector: U32,
}

wire_fields!(EngineNotificationIntrVectorWire => EngineNotificationIntrVector {
    nv2080_engine_type,
    notification_intr_vector,
});

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct EngineNotificationIntrVectorsV16_00 {
    num_entries: U32,
    entries: [EngineNotificationIntrVectorWire; ENGINE_NOTIFICATION_INTR_VECTORS_MAX_ENGINES],
}

impl WireRecord for EngineNotificationIntrVectorsV16_00 {
    type Params = EngineNotificationIntrVectorsParams;

    fn validate(&self) -> Result<(), RpcError> {
        check_count(
            self.num_entries.get(),
            ENGINE_NOTIFICATION_INTR_VECTORS_MAX_ENGINES,
        )
        .map(|_| ())
    }

    fn copy_to(&self, p: &mut EngineNotificationIntrVectorsParams) {
        let count = self.num_entries.get() as usize;
        self.num_entries.load(&mut p.num_entries);
        load_prefix(&self.entries, &mut p.entries, count);
    }

    fn validate_params(p: &EngineNotificationIntrVectorsParams) -> Result<(), RpcError> {
        check_count(p.num_entries, ENGINE_NOTIFICATION_INTR_VECTORS_MAX_ENGINES).map(|_| ())
    }

    fn copy_from(&mut self, p: &EngineNotificationIntrVectorsParams) {
        let count = p.num_entries as usize;
        self.num_entries.store(&p.num_entries);
        store_prefix(&mut self.entries, &p.entries, count);
    }
}

impl LogicalRecord for EngineNotificationIntrVectorsParams {
    const KIND: RecordKind = RecordKind::EngineNotificationIntrVectors;
    const HISTORY: &'static [VersionEntry<Self>] =
        &[copy_entry!(V16_00, EngineNotificationIntrVectorsV16_00)];
}

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct StaticIntrEntryWire {
    nv2080_intr_type: U32,
    pmc_intr_mask: U32,
    intr_vector_stall: U32,
    intr_vector_non_stall: U32,
}

wire_fields!(StaticIntrEntryWire => StaticIntrEntry {
    nv2080_intr_type,
    pmc_intr_mask,
    intr_vector_stall,
    intr_vector_non_stall,
});

#[repr(C, packed)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct StaticIntrTableV1E_09 {
    num_entries: U32,
    entries: [StaticIntrEntryWire; STATIC_INTR_TABLE_MAX],
}

const _: () = assert!(size_of::<StaticIntrTableV1E_09>() == 4 + 32 * 16);

impl WireRecord for StaticIntrTableV1E_09 {
    type Params = StaticIntrTableParams;

    fn validate(&self) -> Result<(), RpcError> {
        check_count(self.num_entries.get(), STATIC_INTR_TABLE_MAX).map(|_| ())
    }

    fn copy_to(&self, p: &mut StaticIntrTableParams) {
        let count = self.num_entries.get() as usize;
        self.num_entries.load(&mut p.num_entries);
        load_prefix(&self.entries, &mut p.entries, count);
    }

    fn validate_params(p: &StaticIntrTableParams) -> Result<(), RpcError> {
        check_count(p.num_entries, STATIC_INTR_TABLE_MAX).map(|_| ())
    }

    fn copy_from(&mut self, p: &StaticIntrTableParams) {
        let count = p.num_entries as usize;
        self.num_entries.store(&p.num_entries);
        store_prefix(&mut self.entries, &p.entries, count);
    }
}

impl LogicalRecord for StaticIntrTableParams {
    const KIND: RecordKind = RecordKind::StaticIntrTable;
    const HISTORY: &'static [VersionEntry<Self>] = &[copy_entry!(V1E_09, StaticIntrTableV1E_09)];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use zerocopy::FromZeros;

    #[test]
    fn vectors_bounded_by_count() {
        let mut wire = EngineNotificationIntrVectorsV16_00::new_zeroed();
        wire.num_entries = U32::new(3);
        for (i, entry) in wire.entries.iter_mut().enumerate() {
            entry.nv2080_engine_type = U32::new(i as u32);
            entry.notification_intr_vector = U32::new(0x80 + i as u32);
        }

        let mut dst = EngineNotificationIntrVectorsParams::default();
        let mut offset = 0;
        decode::<EngineNotificationIntrVectorsV16_00>(
            Some(&mut dst),
            Some(wire.as_bytes()),
            EngineNotificationIntrVectorsV16_00::WIRE_SIZE,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(dst.num_entries, 3);
        assert_eq!(dst.entries[2].notification_intr_vector, 0x82);
        assert_eq!(dst.entries[3], EngineNotificationIntrVector::default());
    }

    #[test]
    fn vectors_count_out_of_range() {
        let mut wire = EngineNotificationIntrVectorsV16_00::new_zeroed();
        wire.num_entries = U32::new(257);
        let mut dst = EngineNotificationIntrVectorsParams::default();
        let mut offset = 0;
        let err = decode::<EngineNotificationIntrVectorsV16_00>(
            Some(&mut dst),
            Some(wire.as_bytes()),
            EngineNotificationIntrVectorsV16_00::WIRE_SIZE,
            Some(&mut offset),
        );
        assert_eq!(err, Err(RpcError::OutOfRange));
        assert_eq!(dst.num_entries, 0);
    }

    #[test]
    fn static_intr_table_full() {
        let mut wire = StaticIntrTableV1E_09::new_zeroed();
        wire.num_entries = U32::new(32);
        wire.entries[31].intr_vector_non_stall = U32::new(0x1ff);

        let mut dst = StaticIntrTableParams::default();
        let mut offset = 0;
        decode::<StaticIntrTableV1E_09>(
            Some(&mut dst),
            Some(wire.as_bytes()),
            StaticIntrTableV1E_09::WIRE_SIZE,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(dst.entries[31].intr_vector_non_stall, 0x1ff);

        wire.num_entries = U32::new(33);
        let mut offset = 0;
        let err = decode::<StaticIntrTableV1E_09>(
            Some(&mut dst),
            Some(wire.as_bytes()),
            StaticIntrTableV1E_09::WIRE_SIZE,
            Some(&mut offset),
        );
        assert_eq!(err, Err(RpcError::OutOfRange));
    }
}
