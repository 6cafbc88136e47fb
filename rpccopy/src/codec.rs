// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

//! Generic record decoder and encoder.
//!
//! Each protocol revision of a record has its own fixed wire layout,
//! described by a type implementing [`WireRecord`]. [`decode`] and
//! [`encode`] implement the buffer handling shared by every layout:
//!
//! * Without an offset nothing happens and the call fails with
//!   [`CursorError::NullCursor`].
//! * Without a destination (or without a buffer) the call is a size probe:
//!   only the offset moves.
//! * Otherwise the record must fit at the offset, its count fields must be
//!   within the capacity of the layout, and only then are fields copied.
//! * In every case where an offset was supplied, the offset advances by
//!   the size of the wire layout, whether or not the copy succeeded.

use crate::cursor::{advance, checked_view, checked_view_mut, CursorError};
use crate::error::RpcError;
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned};

/// A fixed wire layout of one protocol revision of a record.
pub trait WireRecord: FromBytes + IntoBytes + KnownLayout + Immutable + Unaligned + Sized {
    /// The version independent structure this layout is copied into.
    type Params: 'static;

    /// Number of bytes the layout occupies in a wire buffer.
    const WIRE_SIZE: u32 = size_of::<Self>() as u32;

    /// Checks the wire provided counts against the capacity of the layout.
    /// Runs before anything is written to the destination.
    fn validate(&self) -> Result<(), RpcError> {
        Ok(())
    }

    /// Copies every field the layout carries into `params`. Fields the
    /// layout does not know about are left alone.
    fn copy_to(&self, params: &mut Self::Params);

    /// Checks that `params` can be represented by this layout.
    fn validate_params(_params: &Self::Params) -> Result<(), RpcError> {
        Ok(())
    }

    /// Fills a zeroed wire record from `params`.
    fn copy_from(&mut self, params: &Self::Params);
}

/// Decodes one `R` record at `*offset` into `dst`.
pub fn decode<R: WireRecord>(
    dst: Option<&mut R::Params>,
    buffer: Option<&[u8]>,
    buffer_size: u32,
    offset: Option<&mut u32>,
) -> Result<(), RpcError> {
    let offset = offset.ok_or(CursorError::NullCursor)?;

    let result = match (dst, buffer) {
        (Some(dst), Some(buffer)) => decode_at::<R>(dst, buffer, buffer_size, *offset),
        _ => Ok(()),
    };

    advance(offset, R::WIRE_SIZE);
    result
}

fn decode_at<R: WireRecord>(
    dst: &mut R::Params,
    buffer: &[u8],
    buffer_size: u32,
    offset: u32,
) -> Result<(), RpcError> {
    let view = checked_view(buffer, buffer_size, offset, R::WIRE_SIZE)?;
    let (record, _) = R::ref_from_prefix(view).map_err(|_| CursorError::OutOfBounds)?;
    record.validate()?;
    record.copy_to(dst);
    Ok(())
}

/// Encodes `src` as one `R` record at `*offset`.
pub fn encode<R: WireRecord>(
    src: Option<&R::Params>,
    buffer: Option<&mut [u8]>,
    buffer_size: u32,
    offset: Option<&mut u32>,
) -> Result<(), RpcError> {
    let offset = offset.ok_or(CursorError::NullCursor)?;

    let result = match (src, buffer) {
        (Some(src), Some(buffer)) => encode_at::<R>(src, buffer, buffer_size, *offset),
        _ => Ok(()),
    };

    advance(offset, R::WIRE_SIZE);
    result
}

fn encode_at<R: WireRecord>(
    src: &R::Params,
    buffer: &mut [u8],
    buffer_size: u32,
    offset: u32,
) -> Result<(), RpcError> {
    R::validate_params(src)?;
    let view = checked_view_mut(buffer, buffer_size, offset, R::WIRE_SIZE)?;
    let (record, _) = R::mut_from_prefix(view).map_err(|_| CursorError::OutOfBounds)?;
    record.zero();
    record.copy_from(src);
    Ok(())
}

/// Returns an error if a wire provided count exceeds `cap`.
pub(crate) fn check_count(count: u32, cap: usize) -> Result<usize, RpcError> {
    let count = count as usize;
    if count > cap {
        return Err(RpcError::OutOfRange);
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zerocopy::little_endian::{U16, U32};

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    struct Pair {
        count: u32,
        items: [u16; 4],
        tag: bool,
    }

    #[repr(C, packed)]
    #[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
    struct PairWire {
        count: U32,
        items: [U16; 3],
        tag: u8,
        _pad: u8,
    }

    const _: () = assert!(size_of::<PairWire>() == 12);

    impl WireRecord for PairWire {
        type Params = Pair;

        fn validate(&self) -> Result<(), RpcError> {
            check_count(self.count.get(), 3).map(|_| ())
        }

        fn copy_to(&self, p: &mut Pair) {
            p.count = self.count.get();
            for (d, s) in p.items.iter_mut().zip(self.items) {
                *d = s.get();
            }
            p.tag = self.tag != 0;
        }

        fn validate_params(p: &Pair) -> Result<(), RpcError> {
            check_count(p.count, 3).map(|_| ())
        }

        fn copy_from(&mut self, p: &Pair) {
            self.count = p.count.into();
            for (d, s) in self.items.iter_mut().zip(p.items) {
                *d = s.into();
            }
            self.tag = p.tag.into();
        }
    }

    fn wire(count: u32) -> [u8; 12] {
        let mut buf = [0u8; 12];
        buf[0..4].copy_from_slice(&count.to_le_bytes());
        buf[4..6].copy_from_slice(&0x1122u16.to_le_bytes());
        buf[6..8].copy_from_slice(&0x3344u16.to_le_bytes());
        buf[8..10].copy_from_slice(&0x5566u16.to_le_bytes());
        buf[10] = 1;
        buf
    }

    #[test]
    fn decode_exact_buffer() {
        let buf = wire(2);
        let mut dst = Pair::default();
        let mut offset = 0;
        decode::<PairWire>(Some(&mut dst), Some(&buf), 12, Some(&mut offset)).unwrap();
        assert_eq!(offset, 12);
        assert_eq!(
            dst,
            Pair {
                count: 2,
                items: [0x1122, 0x3344, 0x5566, 0],
                tag: true,
            }
        );
    }

    #[test]
    fn decode_short_buffer() {
        let buf = wire(2);
        let mut dst = Pair::default();
        let mut offset = 0;
        let err = decode::<PairWire>(Some(&mut dst), Some(&buf), 11, Some(&mut offset));
        assert_eq!(err, Err(RpcError::Cursor(CursorError::OutOfBounds)));
        assert_eq!(offset, 12);
        assert_eq!(dst, Pair::default());
    }

    #[test]
    fn decode_offset_past_end() {
        let buf = wire(2);
        let mut dst = Pair::default();
        let mut offset = 16;
        let err = decode::<PairWire>(Some(&mut dst), Some(&buf), 12, Some(&mut offset));
        assert_eq!(err, Err(RpcError::Cursor(CursorError::OutOfBounds)));
        assert_eq!(offset, 28);
    }

    #[test]
    fn decode_null_offset() {
        let buf = wire(2);
        let mut dst = Pair::default();
        let err = decode::<PairWire>(Some(&mut dst), Some(&buf), 12, None);
        assert_eq!(err, Err(RpcError::Cursor(CursorError::NullCursor)));
        assert_eq!(dst, Pair::default());
    }

    #[test]
    fn decode_probe() {
        let buf = wire(2);
        let mut dst = Pair::default();
        let mut offset = 4;
        decode::<PairWire>(None, Some(&buf), 0, Some(&mut offset)).unwrap();
        assert_eq!(offset, 16);
        decode::<PairWire>(Some(&mut dst), None, 0, Some(&mut offset)).unwrap();
        assert_eq!(offset, 28);
        assert_eq!(dst, Pair::default());
    }

    #[test]
    fn decode_count_out_of_range() {
        let buf = wire(4);
        let mut dst = Pair::default();
        let mut offset = 0;
        let err = decode::<PairWire>(Some(&mut dst), Some(&buf), 12, Some(&mut offset));
        assert_eq!(err, Err(RpcError::OutOfRange));
        assert_eq!(offset, 12);
        assert_eq!(dst, Pair::default());
    }

    #[test]
    fn encode_then_decode() {
        let src = Pair {
            count: 3,
            items: [1, 2, 3, 0],
            tag: true,
        };
        let mut buf = [0xffu8; 12];
        let mut offset = 0;
        encode::<PairWire>(Some(&src), Some(&mut buf), 12, Some(&mut offset)).unwrap();
        assert_eq!(offset, 12);
        // Reserved bytes are cleared.
        assert_eq!(buf[11], 0);

        let mut dst = Pair::default();
        let mut offset = 0;
        decode::<PairWire>(Some(&mut dst), Some(&buf), 12, Some(&mut offset)).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn encode_rejects_unrepresentable() {
        let src = Pair {
            count: 9,
            ..Default::default()
        };
        let mut buf = [0u8; 12];
        let mut offset = 0;
        let err = encode::<PairWire>(Some(&src), Some(&mut buf), 12, Some(&mut offset));
        assert_eq!(err, Err(RpcError::OutOfRange));
        assert_eq!(offset, 12);
        assert_eq!(buf, [0u8; 12]);
    }
}
