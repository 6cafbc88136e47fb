// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use crate::cursor::CursorError;
use core::fmt;

// Leaf errors of a module convert into an RpcError through From, so
// public functions only ever return RpcError.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RpcError {
    // Errors related to the wire buffer or the cursor into it
    Cursor(CursorError),
    // A count field exceeds the capacity of its destination array
    OutOfRange,
    // No decoder exists for the record at the negotiated version
    NotSupported,
    // Missing or mismatched arguments
    InvalidArgument,
    // Operation not allowed in the current session state
    InvalidState,
    // Allocation of a destination structure failed
    NoMemory,
    // Control command has no cache slot
    ObjectNotFound,
}

impl From<CursorError> for RpcError {
    fn from(err: CursorError) -> Self {
        Self::Cursor(err)
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cursor(err) => write!(f, "{err}"),
            Self::OutOfRange => write!(f, "count field out of range"),
            Self::NotSupported => write!(f, "record not supported at this version"),
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::InvalidState => write!(f, "invalid session state"),
            Self::NoMemory => write!(f, "out of memory"),
            Self::ObjectNotFound => write!(f, "object not found"),
        }
    }
}

/// Status codes reported back to the RPC layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
pub enum RpcStatus {
    OK,
    BUFFER_TOO_SMALL,
    INVALID_ARGUMENT,
    INVALID_STATE,
    NO_MEMORY,
    NOT_SUPPORTED,
    OBJECT_NOT_FOUND,
    OUT_OF_RANGE,
}

impl RpcStatus {
    pub fn from_result(res: Result<(), RpcError>) -> Self {
        match res {
            Ok(()) => Self::OK,
            Err(e) => e.into(),
        }
    }
}

impl From<RpcError> for RpcStatus {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Cursor(CursorError::OutOfBounds) => Self::BUFFER_TOO_SMALL,
            RpcError::Cursor(CursorError::NullCursor) => Self::INVALID_ARGUMENT,
            RpcError::OutOfRange => Self::OUT_OF_RANGE,
            RpcError::NotSupported => Self::NOT_SUPPORTED,
            RpcError::InvalidArgument => Self::INVALID_ARGUMENT,
            RpcError::InvalidState => Self::INVALID_STATE,
            RpcError::NoMemory => Self::NO_MEMORY,
            RpcError::ObjectNotFound => Self::OBJECT_NOT_FOUND,
        }
    }
}

impl From<RpcStatus> for u32 {
    fn from(status: RpcStatus) -> u32 {
        match status {
            RpcStatus::OK => 0x0000_0000,
            RpcStatus::BUFFER_TOO_SMALL => 0x0000_0002,
            RpcStatus::INVALID_ARGUMENT => 0x0000_001F,
            RpcStatus::INVALID_STATE => 0x0000_0040,
            RpcStatus::NO_MEMORY => 0x0000_0051,
            RpcStatus::NOT_SUPPORTED => 0x0000_0056,
            RpcStatus::OBJECT_NOT_FOUND => 0x0000_0057,
            RpcStatus::OUT_OF_RANGE => 0x0000_005B,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(u32::from(RpcStatus::from_result(Ok(()))), 0);
        assert_eq!(
            u32::from(RpcStatus::from(RpcError::Cursor(CursorError::OutOfBounds))),
            0x02
        );
        assert_eq!(
            RpcStatus::from(RpcError::Cursor(CursorError::NullCursor)),
            RpcStatus::INVALID_ARGUMENT
        );
        assert_eq!(
            u32::from(RpcStatus::from_result(Err(RpcError::OutOfRange))),
            0x5B
        );
        assert_eq!(u32::from(RpcStatus::NOT_SUPPORTED), 0x56);
    }
}
