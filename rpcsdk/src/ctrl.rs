// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

//! Control command identifiers and their handling flags.

use bitflags::bitflags;

pub const GPU_QUERY_ECC_STATUS: u32 = 0x2080012f;
pub const GPU_GET_GID_INFO: u32 = 0x2080014a;
pub const GPU_GET_COMPUTE_PROFILES: u32 = 0x208001a2;
pub const GPU_GET_CONSTRUCTED_FALCON_INFO: u32 = 0x208001b0;
pub const GR_GET_ZCULL_INFO: u32 = 0x20801206;
pub const GR_GET_SM_ISSUE_RATE_MODIFIER: u32 = 0x20801230;
pub const FB_GET_FB_REGION_INFO: u32 = 0x20801320;
pub const BUS_GET_INFO_V2: u32 = 0x20801823;
pub const BUS_GET_PCIE_REQ_ATOMICS_CAPS: u32 = 0x20801829;
pub const BUS_GET_PCIE_SUPPORTED_GPU_ATOMICS: u32 = 0x2080182a;
pub const BUS_GET_C2C_INFO: u32 = 0x2080182b;
pub const NVLINK_GET_NVLINK_CAPS: u32 = 0x20803001;
pub const INTERNAL_STATIC_KGR_GET_ZCULL_INFO: u32 = 0x20800a2c;
pub const INTERNAL_STATIC_KGR_GET_ROP_INFO: u32 = 0x20800a2e;
pub const INTERNAL_STATIC_KGR_GET_CONTEXT_BUFFERS_INFO: u32 = 0x20800a32;
pub const INTERNAL_STATIC_KGR_GET_FECS_RECORD_SIZE: u32 = 0x20800a3d;
pub const INTERNAL_STATIC_KGR_GET_FECS_TRACE_DEFINES: u32 = 0x20800a3f;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct CtrlFlags: u32 {
        /// The reply never changes for the lifetime of the vGPU and is
        /// answered from the session cache after the first request.
        const CACHEABLE         = 1 << 0;
        /// Copy the reply back to the caller even when the host reports
        /// an error.
        const COPYOUT_ON_ERROR  = 1 << 1;
        /// The control may be issued without holding the API lock.
        const API_LOCK_READONLY = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlInfo {
    pub cmd: u32,
    pub flags: CtrlFlags,
}

const CONTROLS: &[ControlInfo] = &[
    ControlInfo {
        cmd: GPU_QUERY_ECC_STATUS,
        flags: CtrlFlags::API_LOCK_READONLY,
    },
    ControlInfo {
        cmd: GPU_GET_GID_INFO,
        flags: CtrlFlags::CACHEABLE.union(CtrlFlags::API_LOCK_READONLY),
    },
    ControlInfo {
        cmd: GPU_GET_COMPUTE_PROFILES,
        flags: CtrlFlags::CACHEABLE,
    },
    ControlInfo {
        cmd: GPU_GET_CONSTRUCTED_FALCON_INFO,
        flags: CtrlFlags::CACHEABLE,
    },
    ControlInfo {
        cmd: GR_GET_ZCULL_INFO,
        flags: CtrlFlags::CACHEABLE,
    },
    ControlInfo {
        cmd: GR_GET_SM_ISSUE_RATE_MODIFIER,
        flags: CtrlFlags::CACHEABLE,
    },
    ControlInfo {
        cmd: FB_GET_FB_REGION_INFO,
        flags: CtrlFlags::CACHEABLE,
    },
    ControlInfo {
        cmd: BUS_GET_INFO_V2,
        flags: CtrlFlags::CACHEABLE.union(CtrlFlags::COPYOUT_ON_ERROR),
    },
    ControlInfo {
        cmd: BUS_GET_PCIE_REQ_ATOMICS_CAPS,
        flags: CtrlFlags::CACHEABLE,
    },
    ControlInfo {
        cmd: BUS_GET_PCIE_SUPPORTED_GPU_ATOMICS,
        flags: CtrlFlags::CACHEABLE,
    },
    ControlInfo {
        cmd: BUS_GET_C2C_INFO,
        flags: CtrlFlags::CACHEABLE,
    },
    ControlInfo {
        cmd: NVLINK_GET_NVLINK_CAPS,
        flags: CtrlFlags::CACHEABLE,
    },
    ControlInfo {
        cmd: INTERNAL_STATIC_KGR_GET_ZCULL_INFO,
        flags: CtrlFlags::CACHEABLE,
    },
    ControlInfo {
        cmd: INTERNAL_STATIC_KGR_GET_ROP_INFO,
        flags: CtrlFlags::CACHEABLE,
    },
    ControlInfo {
        cmd: INTERNAL_STATIC_KGR_GET_CONTEXT_BUFFERS_INFO,
        flags: CtrlFlags::CACHEABLE,
    },
    ControlInfo {
        cmd: INTERNAL_STATIC_KGR_GET_FECS_RECORD_SIZE,
        flags: CtrlFlags::CACHEABLE,
    },
    ControlInfo {
        cmd: INTERNAL_STATIC_KGR_GET_FECS_TRACE_DEFINES,
        flags: CtrlFlags::CACHEABLE,
    },
];

/// Looks up the handling flags of a control command.
pub fn control_info(cmd: u32) -> Option<ControlInfo> {
    CONTROLS.iter().find(|info| info.cmd == cmd).copied()
}

/// Iterates over every known control command.
pub fn controls() -> impl Iterator<Item = &'static ControlInfo> {
    CONTROLS.iter()
}
