// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

//! Selection of the wire layout of a record for a negotiated protocol
//! version.
//!
//! Every normalized structure that travels over the wire implements
//! [`LogicalRecord`], which lists the layout revisions of the record in
//! the order they were introduced. The layout used at a given protocol
//! version is the newest revision that is not newer than that version.

use crate::cursor::{advance, CursorError};
use crate::error::RpcError;
use crate::version::ProtocolVersion;
use core::any::Any;

pub type DecodeFn<P> =
    fn(Option<&mut P>, Option<&[u8]>, u32, Option<&mut u32>) -> Result<(), RpcError>;
pub type EncodeFn<P> =
    fn(Option<&P>, Option<&mut [u8]>, u32, Option<&mut u32>) -> Result<(), RpcError>;

/// How a record is handled at one protocol revision.
#[derive(Debug)]
pub enum Decoder<P: 'static> {
    /// The record is copied field by field using a wire layout of `size`
    /// bytes.
    Copy {
        decode: DecodeFn<P>,
        encode: EncodeFn<P>,
        size: u32,
    },
    /// The record occupies `size` bytes on the wire, but nothing in it is
    /// consumed.
    Reserved(u32),
    /// The revision has no payload. It succeeds without looking at the
    /// buffer or the offset.
    Empty,
    /// The revision is retired. Nothing is read, written or skipped.
    NotSupported,
}

impl<P: 'static> Clone for Decoder<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: 'static> Copy for Decoder<P> {}

impl<P: 'static> Decoder<P> {
    /// Number of bytes the record occupies on the wire.
    pub fn wire_size(&self) -> Option<u32> {
        match self {
            Self::Copy { size, .. } => Some(*size),
            Self::Reserved(size) => Some(*size),
            Self::Empty => Some(0),
            Self::NotSupported => None,
        }
    }

    pub fn decode(
        &self,
        dst: Option<&mut P>,
        buffer: Option<&[u8]>,
        buffer_size: u32,
        offset: Option<&mut u32>,
    ) -> Result<(), RpcError> {
        match self {
            Self::Copy { decode, .. } => decode(dst, buffer, buffer_size, offset),
            Self::Reserved(size) => skip(*size, offset),
            Self::Empty => Ok(()),
            Self::NotSupported => Err(RpcError::NotSupported),
        }
    }

    pub fn encode(
        &self,
        src: Option<&P>,
        buffer: Option<&mut [u8]>,
        buffer_size: u32,
        offset: Option<&mut u32>,
    ) -> Result<(), RpcError> {
        match self {
            Self::Copy { encode, .. } => encode(src, buffer, buffer_size, offset),
            Self::Reserved(size) => skip(*size, offset),
            Self::Empty => Ok(()),
            Self::NotSupported => Err(RpcError::NotSupported),
        }
    }
}

fn skip(size: u32, offset: Option<&mut u32>) -> Result<(), RpcError> {
    let offset = offset.ok_or(CursorError::NullCursor)?;
    advance(offset, size);
    Ok(())
}

/// One revision of a record: the protocol version that introduced it and
/// how it is handled.
#[derive(Debug)]
pub struct VersionEntry<P: 'static> {
    pub since: ProtocolVersion,
    pub decoder: Decoder<P>,
}

/// A normalized structure with a versioned wire representation.
pub trait LogicalRecord: Sized + 'static {
    const KIND: RecordKind;
    /// Revisions of the record, oldest first.
    const HISTORY: &'static [VersionEntry<Self>];
}

/// Builds a [`VersionEntry`] that copies through the wire layout `$wire`.
macro_rules! copy_entry {
    ($since:ident, $wire:ty) => {
        $crate::dispatch::VersionEntry {
            since: $crate::version::ProtocolVersion::$since,
            decoder: $crate::dispatch::Decoder::Copy {
                decode: $crate::codec::decode::<$wire>,
                encode: $crate::codec::encode::<$wire>,
                size: <$wire as $crate::codec::WireRecord>::WIRE_SIZE,
            },
        }
    };
}

/// Builds a [`VersionEntry`] for a retired revision.
macro_rules! not_supported {
    ($since:ident) => {
        $crate::dispatch::VersionEntry {
            since: $crate::version::ProtocolVersion::$since,
            decoder: $crate::dispatch::Decoder::NotSupported,
        }
    };
}

/// Builds a [`VersionEntry`] for a revision that is skipped over.
macro_rules! reserved_entry {
    ($since:ident, $wire:ty) => {
        $crate::dispatch::VersionEntry {
            since: $crate::version::ProtocolVersion::$since,
            decoder: $crate::dispatch::Decoder::Reserved(
                core::mem::size_of::<$wire>() as u32,
            ),
        }
    };
}

/// Builds a [`VersionEntry`] for a revision without payload.
macro_rules! empty_entry {
    ($since:ident) => {
        $crate::dispatch::VersionEntry {
            since: $crate::version::ProtocolVersion::$since,
            decoder: $crate::dispatch::Decoder::Empty,
        }
    };
}

pub(crate) use {copy_entry, empty_entry, not_supported, reserved_entry};

/// Returns how `P` is handled at `version`, or `None` if the record did
/// not exist yet at that version.
pub fn select<P: LogicalRecord>(version: ProtocolVersion) -> Option<Decoder<P>> {
    P::HISTORY
        .iter()
        .rev()
        .find(|entry| entry.since <= version)
        .map(|entry| entry.decoder)
}

/// Decodes one `P` record using the layout of `version`.
pub fn decode_record<P: LogicalRecord>(
    version: ProtocolVersion,
    dst: Option<&mut P>,
    buffer: Option<&[u8]>,
    buffer_size: u32,
    offset: Option<&mut u32>,
) -> Result<(), RpcError> {
    select::<P>(version)
        .ok_or(RpcError::NotSupported)?
        .decode(dst, buffer, buffer_size, offset)
}

/// Encodes one `P` record using the layout of `version`.
pub fn encode_record<P: LogicalRecord>(
    version: ProtocolVersion,
    src: Option<&P>,
    buffer: Option<&mut [u8]>,
    buffer_size: u32,
    offset: Option<&mut u32>,
) -> Result<(), RpcError> {
    select::<P>(version)
        .ok_or(RpcError::NotSupported)?
        .encode(src, buffer, buffer_size, offset)
}

/// Returns the wire size of `P` at `version`.
pub fn wire_size<P: LogicalRecord>(version: ProtocolVersion) -> Result<u32, RpcError> {
    select::<P>(version)
        .and_then(|decoder| decoder.wire_size())
        .ok_or(RpcError::NotSupported)
}

fn downcast_mut<P: LogicalRecord>(dst: Option<&mut dyn Any>) -> Result<Option<&mut P>, RpcError> {
    dst.map(|d| d.downcast_mut::<P>().ok_or(RpcError::InvalidArgument))
        .transpose()
}

fn downcast_ref<P: LogicalRecord>(src: Option<&dyn Any>) -> Result<Option<&P>, RpcError> {
    src.map(|s| s.downcast_ref::<P>().ok_or(RpcError::InvalidArgument))
        .transpose()
}

macro_rules! record_kinds {
    ($($kind:ident => $params:ty),+ $(,)?) => {
        /// Every logical record that has a wire representation.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum RecordKind {
            $($kind,)+
        }

        impl RecordKind {
            pub const ALL: &'static [RecordKind] = &[$(RecordKind::$kind,)+];
        }

        /// Decodes a record whose type is only known at run time. A
        /// destination of the wrong type is rejected before anything
        /// else happens.
        pub fn decode_any(
            kind: RecordKind,
            version: ProtocolVersion,
            dst: Option<&mut dyn Any>,
            buffer: Option<&[u8]>,
            buffer_size: u32,
            offset: Option<&mut u32>,
        ) -> Result<(), RpcError> {
            match kind {
                $(
                    RecordKind::$kind => {
                        let dst = downcast_mut::<$params>(dst)?;
                        decode_record::<$params>(version, dst, buffer, buffer_size, offset)
                    }
                )+
            }
        }

        /// Run time typed counterpart of [`encode_record`].
        pub fn encode_any(
            kind: RecordKind,
            version: ProtocolVersion,
            src: Option<&dyn Any>,
            buffer: Option<&mut [u8]>,
            buffer_size: u32,
            offset: Option<&mut u32>,
        ) -> Result<(), RpcError> {
            match kind {
                $(
                    RecordKind::$kind => {
                        let src = downcast_ref::<$params>(src)?;
                        encode_record::<$params>(version, src, buffer, buffer_size, offset)
                    }
                )+
            }
        }

        /// Returns the wire size of `kind` at `version`.
        pub fn record_size(kind: RecordKind, version: ProtocolVersion) -> Result<u32, RpcError> {
            match kind {
                $(RecordKind::$kind => wire_size::<$params>(version),)+
            }
        }

        #[cfg(test)]
        fn history_kind(kind: RecordKind) -> RecordKind {
            match kind {
                $(RecordKind::$kind => <$params as LogicalRecord>::KIND,)+
            }
        }

        #[cfg(test)]
        fn history_is_sorted(kind: RecordKind) -> bool {
            match kind {
                $(
                    RecordKind::$kind => <$params as LogicalRecord>::HISTORY
                        .windows(2)
                        .all(|w| w[0].since < w[1].since),
                )+
            }
        }
    };
}

use rpcsdk::{bus, ce, fb, fifo, gpu, gr, mc, vgpu};

record_kinds!(
    EccStatus => gpu::EccStatusParams,
    GpuPartitionInfo => gpu::GpuPartitionInfo,
    ExecPartitions => gpu::ExecPartitionsParams,
    ExecSyspipeInfo => gpu::ExecSyspipeInfo,
    ComputeProfiles => gpu::ComputeProfilesParams,
    GidInfo => gpu::GidInfoParams,
    SkuInfo => gpu::SkuInfoParams,
    ConstructedFalconInfo => gpu::ConstructedFalconInfoParams,
    DeviceInfoTable => gpu::DeviceInfoTableParams,
    CcuSampleInfo => gpu::CcuSampleInfoParams,
    P2pCapability => gpu::P2pCapabilityParams,
    ErrorContIntrMask => gpu::ErrorContIntrMaskParams,
    GrZcullInfo => gr::GrZcullInfo,
    SmIssueRateModifier => gr::SmIssueRateModifierParams,
    SmIssueRateModifierV2 => gr::SmIssueRateModifierV2Params,
    StaticGrInfo => gr::StaticGrInfoParams,
    GlobalSmOrder => gr::GlobalSmOrderParams,
    RopInfo => gr::RopInfoParams,
    PpcMasks => gr::PpcMasksParams,
    ContextBuffersInfo => gr::ContextBuffersInfoParams,
    FloorsweepingMasks => gr::FloorsweepingMasksParams,
    StaticZcullInfo => gr::StaticZcullInfoParams,
    FecsRecordSize => gr::FecsRecordSizeParams,
    FecsTraceDefines => gr::FecsTraceDefinesParams,
    PdbProperties => gr::PdbPropertiesParams,
    StaticSmIssueRateModifier => gr::StaticSmIssueRateModifierParams,
    StaticSmIssueRateModifierV2 => gr::StaticSmIssueRateModifierV2Params,
    BusInfoV2 => bus::BusInfoV2Params,
    PcieSupportedGpuAtomics => bus::PcieSupportedGpuAtomicsParams,
    PcieReqAtomicsCaps => bus::PcieReqAtomicsCapsParams,
    C2cInfo => bus::C2cInfoParams,
    NvlinkCaps => bus::NvlinkCapsParams,
    FbRegionInfo => fb::FbRegionInfoParams,
    DynamicBlacklistedPages => fb::DynamicBlacklistedPages,
    FbLtcInfoForFbp => fb::LtcInfoForFbp,
    VgpuLtcInfoForFbp => fb::VgpuLtcInfoForFbp,
    ZbcTableSizes => fb::ZbcTableSizes,
    MemsysStaticConfig => fb::MemsysStaticConfig,
    FlaRange => fb::FlaRangeParams,
    EngineNotificationIntrVectors => mc::EngineNotificationIntrVectorsParams,
    StaticIntrTable => mc::StaticIntrTableParams,
    CeCapsV2 => ce::CeCapsV2Table,
    CeAllCaps => ce::CeAllCapsParams,
    BspCaps => ce::BspCapsTable,
    MsencCaps => ce::MsencCapsParams,
    FifoDeviceInfoTable => fifo::FifoDeviceInfoTable,
    LatencyBufferSize => fifo::LatencyBufferSizes,
    VgpuStaticData => vgpu::VgpuStaticData,
    VgpuStaticProperties => vgpu::VgpuStaticProperties,
    VgxSystemInfo => vgpu::VgxSystemInfo,
    VgpuConfig => vgpu::VgpuConfig,
    LegacyStaticInfo => vgpu::LegacyStaticInfo,
    LegacyStaticInfo2 => vgpu::LegacyStaticInfo2,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::CursorError;
    use rpcsdk::gpu::{EccStatusParams, GidInfoParams};

    #[test]
    fn histories_are_consistent() {
        for &kind in RecordKind::ALL {
            assert_eq!(history_kind(kind), kind);
            assert!(history_is_sorted(kind), "{kind:?}");
        }
    }

    #[test]
    fn select_newest_not_newer() {
        let d = select::<EccStatusParams>(ProtocolVersion::V27_00).unwrap();
        assert_eq!(
            d.wire_size(),
            record_size(RecordKind::EccStatus, ProtocolVersion::V26_02).ok()
        );
        assert!(matches!(
            select::<EccStatusParams>(ProtocolVersion::V21_04),
            Some(Decoder::NotSupported)
        ));
        assert!(select::<EccStatusParams>(ProtocolVersion::V12_01).is_none());
    }

    #[test]
    fn not_supported_touches_nothing() {
        let buf = [0xaau8; 16];
        let mut dst = EccStatusParams::default();
        let mut offset = 4;
        let err = decode_record(
            ProtocolVersion::V20_03,
            Some(&mut dst),
            Some(&buf),
            16,
            Some(&mut offset),
        );
        assert_eq!(err, Err(RpcError::NotSupported));
        assert_eq!(offset, 4);
        assert_eq!(dst, EccStatusParams::default());
    }

    #[test]
    fn reserved_only_advances() {
        let size = record_size(RecordKind::FbLtcInfoForFbp, ProtocolVersion::V2B_09).unwrap();
        assert_eq!(size, 12);
        let mut offset = 0;
        decode_any(
            RecordKind::FbLtcInfoForFbp,
            ProtocolVersion::V2B_09,
            None,
            None,
            0,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(offset, 12);
        assert_eq!(
            decode_any(
                RecordKind::FbLtcInfoForFbp,
                ProtocolVersion::V2B_09,
                None,
                None,
                0,
                None,
            ),
            Err(RpcError::Cursor(CursorError::NullCursor))
        );
    }

    #[test]
    fn any_rejects_wrong_type() {
        let mut wrong = GidInfoParams::default();
        let mut offset = 0;
        let err = decode_any(
            RecordKind::EccStatus,
            ProtocolVersion::LATEST,
            Some(&mut wrong as &mut dyn Any),
            None,
            0,
            Some(&mut offset),
        );
        assert_eq!(err, Err(RpcError::InvalidArgument));
        assert_eq!(offset, 0);
    }

    #[test]
    fn any_round_trip() {
        let mut src = GidInfoParams::default();
        src.length = 3;
        src.data[..3].copy_from_slice(&[1, 2, 3]);
        let size = record_size(RecordKind::GidInfo, ProtocolVersion::LATEST).unwrap();
        let mut buf = [0u8; 512];
        let mut offset = 0;
        encode_any(
            RecordKind::GidInfo,
            ProtocolVersion::LATEST,
            Some(&src as &dyn Any),
            Some(&mut buf),
            size,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(offset, size);

        let mut dst = GidInfoParams::default();
        let mut offset = 0;
        decode_any(
            RecordKind::GidInfo,
            ProtocolVersion::LATEST,
            Some(&mut dst as &mut dyn Any),
            Some(&buf),
            size,
            Some(&mut offset),
        )
        .unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn absent_record() {
        assert_eq!(
            record_size(RecordKind::CcuSampleInfo, ProtocolVersion::V25_0E),
            Err(RpcError::NotSupported)
        );
    }
}
