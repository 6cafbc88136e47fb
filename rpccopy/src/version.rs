// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use crate::error::RpcError;
use core::fmt;

/// Revision of the host/guest RPC protocol. Revisions are totally ordered
/// by `(major, minor)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion {
    pub major: u8,
    pub minor: u8,
}

macro_rules! versions {
    ($($name:ident = ($major:literal, $minor:literal)),+ $(,)?) => {
        impl ProtocolVersion {
            $(pub const $name: Self = Self::new($major, $minor);)+
        }
    };
}

versions!(
    V03_00 = (0x03, 0x00),
    V07_00 = (0x07, 0x00),
    V09_04 = (0x09, 0x04),
    V12_00 = (0x12, 0x00),
    V12_01 = (0x12, 0x01),
    V12_06 = (0x12, 0x06),
    V12_0A = (0x12, 0x0A),
    V13_06 = (0x13, 0x06),
    V15_01 = (0x15, 0x01),
    V15_02 = (0x15, 0x02),
    V15_03 = (0x15, 0x03),
    V16_00 = (0x16, 0x00),
    V16_02 = (0x16, 0x02),
    V16_05 = (0x16, 0x05),
    V16_07 = (0x16, 0x07),
    V17_00 = (0x17, 0x00),
    V17_01 = (0x17, 0x01),
    V17_05 = (0x17, 0x05),
    V18_03 = (0x18, 0x03),
    V18_04 = (0x18, 0x04),
    V18_07 = (0x18, 0x07),
    V18_0B = (0x18, 0x0B),
    V18_0C = (0x18, 0x0C),
    V18_0E = (0x18, 0x0E),
    V18_0F = (0x18, 0x0F),
    V18_10 = (0x18, 0x10),
    V18_11 = (0x18, 0x11),
    V18_13 = (0x18, 0x13),
    V18_16 = (0x18, 0x16),
    V19_00 = (0x19, 0x00),
    V1A_00 = (0x1A, 0x00),
    V1A_02 = (0x1A, 0x02),
    V1A_04 = (0x1A, 0x04),
    V1A_05 = (0x1A, 0x05),
    V1A_07 = (0x1A, 0x07),
    V1A_0D = (0x1A, 0x0D),
    V1A_18 = (0x1A, 0x18),
    V1A_1F = (0x1A, 0x1F),
    V1B_01 = (0x1B, 0x01),
    V1B_03 = (0x1B, 0x03),
    V1B_05 = (0x1B, 0x05),
    V1C_06 = (0x1C, 0x06),
    V1C_09 = (0x1C, 0x09),
    V1D_01 = (0x1D, 0x01),
    V1D_03 = (0x1D, 0x03),
    V1D_04 = (0x1D, 0x04),
    V1E_02 = (0x1E, 0x02),
    V1E_09 = (0x1E, 0x09),
    V1F_01 = (0x1F, 0x01),
    V1F_02 = (0x1F, 0x02),
    V1F_08 = (0x1F, 0x08),
    V1F_09 = (0x1F, 0x09),
    V20_01 = (0x20, 0x01),
    V20_03 = (0x20, 0x03),
    V20_04 = (0x20, 0x04),
    V21_04 = (0x21, 0x04),
    V21_09 = (0x21, 0x09),
    V21_0A = (0x21, 0x0A),
    V21_0C = (0x21, 0x0C),
    V22_01 = (0x22, 0x01),
    V23_01 = (0x23, 0x01),
    V24_05 = (0x24, 0x05),
    V24_06 = (0x24, 0x06),
    V24_07 = (0x24, 0x07),
    V24_09 = (0x24, 0x09),
    V25_00 = (0x25, 0x00),
    V25_01 = (0x25, 0x01),
    V25_03 = (0x25, 0x03),
    V25_05 = (0x25, 0x05),
    V25_06 = (0x25, 0x06),
    V25_07 = (0x25, 0x07),
    V25_0B = (0x25, 0x0B),
    V25_0E = (0x25, 0x0E),
    V25_13 = (0x25, 0x13),
    V26_01 = (0x26, 0x01),
    V26_02 = (0x26, 0x02),
    V26_03 = (0x26, 0x03),
    V27_00 = (0x27, 0x00),
    V27_01 = (0x27, 0x01),
    V27_02 = (0x27, 0x02),
    V27_04 = (0x27, 0x04),
    V27_05 = (0x27, 0x05),
    V28_01 = (0x28, 0x01),
    V28_02 = (0x28, 0x02),
    V28_04 = (0x28, 0x04),
    V28_08 = (0x28, 0x08),
    V29_00 = (0x29, 0x00),
    V29_03 = (0x29, 0x03),
    V29_05 = (0x29, 0x05),
    V2A_02 = (0x2A, 0x02),
    V2A_07 = (0x2A, 0x07),
    V2B_09 = (0x2B, 0x09),
);

impl ProtocolVersion {
    /// Newest revision this crate has wire layouts for.
    pub const LATEST: Self = Self::V2B_09;

    /// Oldest host revision a guest is willing to talk to by default.
    pub const MIN_SUPPORTED: Self = Self::V24_05;

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Returns the version in the layout used by the RPC handshake.
    pub const fn raw(self) -> u32 {
        ((self.major as u32) << 24) | ((self.minor as u32) << 16)
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self::new((raw >> 24) as u8, (raw >> 16) as u8)
    }
}

impl From<ProtocolVersion> for u32 {
    fn from(version: ProtocolVersion) -> u32 {
        version.raw()
    }
}

impl From<u32> for ProtocolVersion {
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{:02X}_{:02X}", self.major, self.minor)
    }
}

/// Picks the version a session runs at, given what the guest was built
/// for and what the host reports.
pub fn negotiate(
    guest: ProtocolVersion,
    host: ProtocolVersion,
    min_supported: ProtocolVersion,
) -> Result<ProtocolVersion, RpcError> {
    if host < min_supported {
        log::error!(
            "Host RPC version {} is older than the minimum supported version {}",
            host,
            min_supported
        );
        return Err(RpcError::NotSupported);
    }

    if guest > host {
        log::warn!(
            "Guest RPC version {} is newer than host version {}, using {}",
            guest,
            host,
            host
        );
        return Ok(host);
    }

    Ok(guest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering() {
        assert!(ProtocolVersion::V1A_1F < ProtocolVersion::V1B_01);
        assert!(ProtocolVersion::V25_13 < ProtocolVersion::V26_01);
        assert!(ProtocolVersion::V2A_07 > ProtocolVersion::V29_05);
    }

    #[test]
    fn raw_form() {
        let v = ProtocolVersion::V25_0E;
        assert_eq!(v.raw(), 0x250E_0000);
        assert_eq!(ProtocolVersion::from_raw(0x250E_0000), v);
    }

    #[test]
    fn display() {
        use alloc::format;
        assert_eq!(format!("{}", ProtocolVersion::V1A_0D), "v1A_0D");
    }

    #[test]
    fn negotiation() {
        let min = ProtocolVersion::V24_05;
        let latest = ProtocolVersion::LATEST;

        assert_eq!(negotiate(latest, latest, min), Ok(latest));
        assert_eq!(
            negotiate(latest, ProtocolVersion::V26_01, min),
            Ok(ProtocolVersion::V26_01)
        );
        assert_eq!(
            negotiate(ProtocolVersion::V26_01, latest, min),
            Ok(ProtocolVersion::V26_01)
        );
        assert_eq!(
            negotiate(latest, ProtocolVersion::V21_0C, min),
            Err(RpcError::NotSupported)
        );
    }
}
