// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use zerocopy::FromZeros;

pub const BUS_INFO_MAX_LIST_SIZE: usize = 0x34;
pub const PCIE_ATOMICS_OP_TYPE_COUNT: usize = 13;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct BusInfo {
    pub index: u32,
    pub data: u32,
}

/// Only the first `bus_info_list_size` entries of `bus_info_list` are
/// meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeros)]
pub struct BusInfoV2Params {
    pub bus_info_list_size: u32,
    pub bus_info_list: [BusInfo; BUS_INFO_MAX_LIST_SIZE],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct PcieAtomicOp {
    pub supported: bool,
    pub attributes: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct PcieSupportedGpuAtomicsParams {
    pub atomic_op: [PcieAtomicOp; PCIE_ATOMICS_OP_TYPE_COUNT],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct PcieReqAtomicsCapsParams {
    pub atomics_caps: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct C2cInfoParams {
    pub is_link_up: bool,
    pub nr_links: u32,
    pub link_mask: u32,
    pub per_link_bw_mbps: u32,
    pub remote_type: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct NvlinkCapsParams {
    pub caps_tbl: u64,
    pub lowest_nvlink_version: u8,
    pub highest_nvlink_version: u8,
    pub lowest_nci_version: u8,
    pub highest_nci_version: u8,
    pub discovered_link_mask: u32,
    pub enabled_link_mask: u32,
}

impl_zeroed_default!(BusInfoV2Params);
