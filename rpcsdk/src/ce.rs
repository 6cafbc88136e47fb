// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

//! Copy engine and video engine capability tables.

use zerocopy::FromZeros;

pub const CE_CAPS_TBL_SIZE: usize = 4;
/// Number of copy engine types (COPY0 and up).
pub const ENGINE_TYPE_COPY_SIZE: usize = 10;
pub const MAX_PCES: usize = 32;
pub const MAX_NVDEC_ENGINES: usize = 8;
pub const BSP_CAPS_TBL_SIZE: usize = 8;
pub const MSENC_CAPS_TBL_SIZE: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct CeCapsV2 {
    pub ce_engine_type: u32,
    pub caps_tbl: [u8; CE_CAPS_TBL_SIZE],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct CeCapsV2Table {
    pub ce_caps: [CeCapsV2; ENGINE_TYPE_COPY_SIZE],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct CeAllCapsParams {
    /// Bitmask of the physical copy engines present.
    pub present: u32,
    pub caps_tbl: [[u8; CE_CAPS_TBL_SIZE]; MAX_PCES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct BspCaps {
    pub caps_tbl: [u8; BSP_CAPS_TBL_SIZE],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct BspCapsTable {
    pub bsp_caps: [BspCaps; MAX_NVDEC_ENGINES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct MsencCapsParams {
    pub instance_id: u32,
    pub caps_tbl: [u8; MSENC_CAPS_TBL_SIZE],
}
