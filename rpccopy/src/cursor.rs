// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

//! Bounds checking for records read from, or written to, a shared wire
//! buffer.
//!
//! A wire buffer is addressed by a byte offset that every decode step
//! advances by the size of the record it consumed. The helpers in this
//! module never trust the offset: a record is only accessible when both
//! `offset <= buffer_size` and `offset + size <= buffer_size` hold, and
//! when the backing slice really is that long.

use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorError {
    /// The record does not fit in what is left of the buffer.
    OutOfBounds,
    /// The caller did not provide an offset to advance.
    NullCursor,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "buffer too small for record"),
            Self::NullCursor => write!(f, "missing buffer offset"),
        }
    }
}

/// Returns the number of bytes left after `offset`, or 0 if the offset is
/// already past the end of the buffer.
pub fn remaining_capacity(buffer_size: u32, offset: u32) -> u32 {
    buffer_size.saturating_sub(offset)
}

fn checked_range(
    buffer_len: usize,
    buffer_size: u32,
    offset: u32,
    record_size: u32,
) -> Result<core::ops::Range<usize>, CursorError> {
    if buffer_size < offset {
        return Err(CursorError::OutOfBounds);
    }
    let end = offset
        .checked_add(record_size)
        .ok_or(CursorError::OutOfBounds)?;
    if buffer_size < end {
        return Err(CursorError::OutOfBounds);
    }
    let start = offset as usize;
    let end = end as usize;
    if buffer_len < end {
        return Err(CursorError::OutOfBounds);
    }
    Ok(start..end)
}

/// Returns the `record_size` bytes at `offset`.
pub fn checked_view(
    buffer: &[u8],
    buffer_size: u32,
    offset: u32,
    record_size: u32,
) -> Result<&[u8], CursorError> {
    let range = checked_range(buffer.len(), buffer_size, offset, record_size)?;
    Ok(&buffer[range])
}

/// Mutable counterpart of [`checked_view`], used by encoders.
pub fn checked_view_mut(
    buffer: &mut [u8],
    buffer_size: u32,
    offset: u32,
    record_size: u32,
) -> Result<&mut [u8], CursorError> {
    let range = checked_range(buffer.len(), buffer_size, offset, record_size)?;
    Ok(&mut buffer[range])
}

/// Moves `offset` past a record of `record_size` bytes.
pub fn advance(offset: &mut u32, record_size: u32) {
    *offset = offset.saturating_add(record_size);
}

/// Rounds `offset` up to the next multiple of `align`, which must be a
/// power of two.
pub fn align_up(offset: u32, align: u32) -> u32 {
    debug_assert!(align.is_power_of_two());
    let mask = align - 1;
    offset.saturating_add(mask) & !mask
}

/// A positional walker over a buffer holding back-to-back records.
///
/// A cursor without a buffer runs in probe mode: every step only advances
/// the offset, which makes it possible to compute the size of a stream
/// without touching memory. `B` is `&[u8]` for decoding and `&mut [u8]`
/// for encoding.
#[derive(Debug)]
pub struct WireCursor<B> {
    buffer: Option<B>,
    buffer_size: u32,
    offset: u32,
}

impl<B: AsRef<[u8]>> WireCursor<B> {
    pub fn new(buffer: B) -> Self {
        let len = AsRef::<[u8]>::as_ref(&buffer).len();
        let buffer_size = u32::try_from(len).unwrap_or(u32::MAX);
        Self::with_offset(Some(buffer), buffer_size, 0)
    }
}

impl<B> WireCursor<B> {
    pub fn probe() -> Self {
        Self::with_offset(None, u32::MAX, 0)
    }

    pub fn with_offset(buffer: Option<B>, buffer_size: u32, offset: u32) -> Self {
        Self {
            buffer,
            buffer_size,
            offset,
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn remaining(&self) -> u32 {
        remaining_capacity(self.buffer_size, self.offset)
    }

    pub fn align(&mut self, align: u32) {
        self.offset = align_up(self.offset, align);
    }
}

impl<B: AsRef<[u8]>> WireCursor<B> {
    /// Runs one decode step at the current position. `step` receives the
    /// buffer, its size and the offset, exactly like a record decoder.
    pub fn decode<F, E>(&mut self, step: F) -> Result<(), E>
    where
        F: FnOnce(Option<&[u8]>, u32, Option<&mut u32>) -> Result<(), E>,
    {
        let buffer = self.buffer.as_ref().map(AsRef::<[u8]>::as_ref);
        step(buffer, self.buffer_size, Some(&mut self.offset))
    }
}

impl<B: AsMut<[u8]>> WireCursor<B> {
    /// Runs one encode step at the current position.
    pub fn encode<F, E>(&mut self, step: F) -> Result<(), E>
    where
        F: FnOnce(Option<&mut [u8]>, u32, Option<&mut u32>) -> Result<(), E>,
    {
        let buffer = self.buffer.as_mut().map(AsMut::<[u8]>::as_mut);
        step(buffer, self.buffer_size, Some(&mut self.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_in_bounds() {
        let buf = [0u8, 1, 2, 3, 4, 5, 6, 7];
        assert_eq!(checked_view(&buf, 8, 2, 4).unwrap(), &[2, 3, 4, 5]);
        assert_eq!(checked_view(&buf, 8, 4, 4).unwrap(), &[4, 5, 6, 7]);
        assert_eq!(checked_view(&buf, 8, 8, 0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn view_out_of_bounds() {
        let buf = [0u8; 8];
        assert_eq!(checked_view(&buf, 8, 5, 4), Err(CursorError::OutOfBounds));
        assert_eq!(checked_view(&buf, 8, 9, 0), Err(CursorError::OutOfBounds));
        assert_eq!(
            checked_view(&buf, 8, u32::MAX, 2),
            Err(CursorError::OutOfBounds)
        );
    }

    #[test]
    fn view_shorter_than_declared() {
        let buf = [0u8; 4];
        assert_eq!(checked_view(&buf, 16, 0, 8), Err(CursorError::OutOfBounds));
    }

    #[test]
    fn remaining() {
        assert_eq!(remaining_capacity(16, 4), 12);
        assert_eq!(remaining_capacity(16, 20), 0);
    }

    #[test]
    fn advance_saturates() {
        let mut offset = u32::MAX - 1;
        advance(&mut offset, 8);
        assert_eq!(offset, u32::MAX);
    }

    #[test]
    fn alignment() {
        assert_eq!(align_up(0, 8), 0);
        assert_eq!(align_up(1, 8), 8);
        assert_eq!(align_up(8, 8), 8);
        assert_eq!(align_up(13, 4), 16);
    }

    #[test]
    fn cursor_probe() {
        let mut cursor = WireCursor::<&[u8]>::probe();
        cursor
            .decode(|buf, _, offset| {
                assert!(buf.is_none());
                advance(offset.unwrap(), 12);
                Ok::<(), CursorError>(())
            })
            .unwrap();
        cursor.align(8);
        assert_eq!(cursor.offset(), 16);
    }

    #[test]
    fn cursor_steps() {
        let mut buf = [0u8; 8];
        let mut cursor = WireCursor::new(&mut buf[..]);
        cursor
            .encode(|buf, size, offset| {
                let offset = offset.unwrap();
                checked_view_mut(buf.unwrap(), size, *offset, 2)?.copy_from_slice(&[7, 9]);
                advance(offset, 2);
                Ok::<(), CursorError>(())
            })
            .unwrap();
        assert_eq!(cursor.remaining(), 6);
        assert_eq!(buf[..2], [7, 9]);
    }
}
