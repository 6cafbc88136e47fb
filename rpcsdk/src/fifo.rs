// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use zerocopy::FromZeros;

pub const FIFO_DEVICE_INFO_MAX_ENTRIES: usize = 32;
pub const FIFO_DEVICE_INFO_ENGINE_DATA_TYPES: usize = 16;
pub const FIFO_DEVICE_INFO_MAX_PBDMA: usize = 2;
pub const FIFO_DEVICE_INFO_ENGINE_NAME_LEN: usize = 16;
pub const FIFO_DEVICE_INFO_MAX_DEVICES: usize = 256;
/// Number of table pages needed to transfer every device.
pub const FIFO_DEVICE_INFO_ITERATIONS: usize =
    FIFO_DEVICE_INFO_MAX_DEVICES / FIFO_DEVICE_INFO_MAX_ENTRIES;

/// Number of engine types covered by the latency buffer table.
pub const ENGINE_TYPE_LAST: usize = 0x40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct FifoDeviceInfoEntry {
    pub engine_data: [u32; FIFO_DEVICE_INFO_ENGINE_DATA_TYPES],
    pub pbdma_ids: [u32; FIFO_DEVICE_INFO_MAX_PBDMA],
    pub pbdma_fault_ids: [u32; FIFO_DEVICE_INFO_MAX_PBDMA],
    pub num_pbdmas: u32,
    pub engine_name: [u8; FIFO_DEVICE_INFO_ENGINE_NAME_LEN],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct FifoDeviceInfoTableParams {
    pub base_index: u32,
    pub num_entries: u32,
    pub more: bool,
    pub entries: [FifoDeviceInfoEntry; FIFO_DEVICE_INFO_MAX_ENTRIES],
}

/// The complete FIFO device info table, transferred as consecutive pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct FifoDeviceInfoTable {
    pub pages: [FifoDeviceInfoTableParams; FIFO_DEVICE_INFO_ITERATIONS],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct LatencyBufferSize {
    pub engine_id: u32,
    pub gp_entries: u32,
    pub pb_entries: u32,
}

/// Channel latency buffer sizes, indexed by engine type. Engine types
/// beyond the negotiated protocol revision keep their previous value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeros)]
pub struct LatencyBufferSizes {
    pub fifo_latency_buffer_size: [LatencyBufferSize; ENGINE_TYPE_LAST],
}

impl_zeroed_default!(LatencyBufferSizes);
