// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

//! Per session cache of control replies that never change while the vGPU
//! exists.
//!
//! Every cacheable control command owns one slot. The first caller to
//! reach an empty slot populates it while holding the slot lock, so there
//! is exactly one round trip per command no matter how many callers race
//! for it. The outcome is final: a failure is cached just like a value.

use crate::dispatch::RecordKind;
use crate::error::{RpcError, RpcStatus};
use crate::locking::SpinLock;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use rpcsdk::ctrl::{self, CtrlFlags};

/// Returns the record carried by the reply of control `cmd`.
pub fn control_record(cmd: u32) -> Option<RecordKind> {
    let kind = match cmd {
        ctrl::GPU_QUERY_ECC_STATUS => RecordKind::EccStatus,
        ctrl::GPU_GET_GID_INFO => RecordKind::GidInfo,
        ctrl::GPU_GET_COMPUTE_PROFILES => RecordKind::ComputeProfiles,
        ctrl::GPU_GET_CONSTRUCTED_FALCON_INFO => RecordKind::ConstructedFalconInfo,
        ctrl::GR_GET_ZCULL_INFO => RecordKind::GrZcullInfo,
        ctrl::GR_GET_SM_ISSUE_RATE_MODIFIER => RecordKind::SmIssueRateModifier,
        ctrl::FB_GET_FB_REGION_INFO => RecordKind::FbRegionInfo,
        ctrl::BUS_GET_INFO_V2 => RecordKind::BusInfoV2,
        ctrl::BUS_GET_PCIE_REQ_ATOMICS_CAPS => RecordKind::PcieReqAtomicsCaps,
        ctrl::BUS_GET_PCIE_SUPPORTED_GPU_ATOMICS => RecordKind::PcieSupportedGpuAtomics,
        ctrl::BUS_GET_C2C_INFO => RecordKind::C2cInfo,
        ctrl::NVLINK_GET_NVLINK_CAPS => RecordKind::NvlinkCaps,
        ctrl::INTERNAL_STATIC_KGR_GET_ZCULL_INFO => RecordKind::StaticZcullInfo,
        ctrl::INTERNAL_STATIC_KGR_GET_ROP_INFO => RecordKind::RopInfo,
        ctrl::INTERNAL_STATIC_KGR_GET_CONTEXT_BUFFERS_INFO => RecordKind::ContextBuffersInfo,
        ctrl::INTERNAL_STATIC_KGR_GET_FECS_RECORD_SIZE => RecordKind::FecsRecordSize,
        ctrl::INTERNAL_STATIC_KGR_GET_FECS_TRACE_DEFINES => RecordKind::FecsTraceDefines,
        _ => return None,
    };
    Some(kind)
}

#[derive(Debug)]
enum SlotState {
    Uncached,
    Cached(Result<Box<dyn Any + Send>, RpcError>),
}

#[derive(Debug)]
struct Slot {
    cmd: u32,
    state: SpinLock<SlotState>,
}

#[derive(Debug)]
pub struct ControlCache {
    slots: Vec<Slot>,
    quiet_prints: bool,
}

impl ControlCache {
    /// Creates an empty cache with one slot per cacheable control.
    pub fn new(quiet_prints: bool) -> Self {
        let slots = ctrl::controls()
            .filter(|info| info.flags.contains(CtrlFlags::CACHEABLE))
            .map(|info| Slot {
                cmd: info.cmd,
                state: SpinLock::new(SlotState::Uncached),
            })
            .collect();
        Self {
            slots,
            quiet_prints,
        }
    }

    fn slot(&self, cmd: u32) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.cmd == cmd)
    }

    pub fn is_cacheable(&self, cmd: u32) -> bool {
        self.slot(cmd).is_some()
    }

    /// Returns true once the slot of `cmd` holds a value or a failure.
    pub fn is_populated(&self, cmd: u32) -> bool {
        self.slot(cmd)
            .is_some_and(|slot| matches!(*slot.state.lock(), SlotState::Cached(_)))
    }

    /// Copies the cached reply of `cmd` into `dst`, running `populate` to
    /// fill the slot first if nobody has done so yet.
    ///
    /// A cached failure is returned again without calling `populate`.
    pub fn lookup_or_populate<P, F>(&self, cmd: u32, dst: &mut P, populate: F) -> Result<(), RpcError>
    where
        P: Any + Send + Clone,
        F: FnOnce(&mut P) -> Result<(), RpcError>,
    {
        let slot = self.slot(cmd).ok_or(RpcError::ObjectNotFound)?;
        let mut state = slot.state.lock();

        if let SlotState::Cached(cached) = &*state {
            let value = cached.as_ref().map_err(|err| *err)?;
            let value = value
                .downcast_ref::<P>()
                .ok_or(RpcError::InvalidArgument)?;
            dst.clone_from(value);
            return Ok(());
        }

        let res = populate(dst);
        match res {
            Ok(()) => *state = SlotState::Cached(Ok(Box::new(dst.clone()))),
            Err(err) => {
                self.report_failure(cmd, err);
                *state = SlotState::Cached(Err(err));
            }
        }
        res
    }

    fn report_failure(&self, cmd: u32, err: RpcError) {
        let status = RpcStatus::from(err);
        let expected = matches!(err, RpcError::NotSupported | RpcError::ObjectNotFound);
        if self.quiet_prints || expected {
            log::info!("Control {:#x} failed: {:?}, caching result", cmd, status);
        } else {
            log::warn!("Control {:#x} failed: {:?}, caching result", cmd, status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};
    use rpcsdk::bus::NvlinkCapsParams;
    use rpcsdk::gpu::GidInfoParams;

    extern crate std;

    fn caps(enabled: u32) -> NvlinkCapsParams {
        NvlinkCapsParams {
            enabled_link_mask: enabled,
            ..Default::default()
        }
    }

    #[test]
    fn populates_once() {
        let cache = ControlCache::new(false);
        let calls = AtomicU32::new(0);
        let populate = |p: &mut NvlinkCapsParams| {
            calls.fetch_add(1, Ordering::Relaxed);
            *p = caps(0x3);
            Ok(())
        };

        let mut first = NvlinkCapsParams::default();
        cache
            .lookup_or_populate(ctrl::NVLINK_GET_NVLINK_CAPS, &mut first, populate)
            .unwrap();
        let mut second = NvlinkCapsParams::default();
        cache
            .lookup_or_populate(ctrl::NVLINK_GET_NVLINK_CAPS, &mut second, populate)
            .unwrap();

        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(first, caps(0x3));
        assert_eq!(second, caps(0x3));
        assert!(cache.is_populated(ctrl::NVLINK_GET_NVLINK_CAPS));
    }

    #[test]
    fn failure_is_terminal() {
        let cache = ControlCache::new(true);
        let mut dst = GidInfoParams::default();
        let res = cache.lookup_or_populate(ctrl::GPU_GET_GID_INFO, &mut dst, |_| {
            Err(RpcError::OutOfRange)
        });
        assert_eq!(res, Err(RpcError::OutOfRange));

        let res = cache.lookup_or_populate(ctrl::GPU_GET_GID_INFO, &mut dst, |p| {
            p.length = 16;
            Ok(())
        });
        assert_eq!(res, Err(RpcError::OutOfRange));
        assert_eq!(dst.length, 0);
    }

    #[test]
    fn unregistered_or_uncacheable() {
        let cache = ControlCache::new(false);
        let mut dst = GidInfoParams::default();
        for cmd in [0xdead_beef, ctrl::GPU_QUERY_ECC_STATUS] {
            assert!(!cache.is_cacheable(cmd));
            let res = cache.lookup_or_populate(cmd, &mut dst, |_| Ok(()));
            assert_eq!(res, Err(RpcError::ObjectNotFound));
        }
    }

    #[test]
    fn type_mismatch() {
        let cache = ControlCache::new(false);
        let mut caps = NvlinkCapsParams::default();
        cache
            .lookup_or_populate(ctrl::NVLINK_GET_NVLINK_CAPS, &mut caps, |_| Ok(()))
            .unwrap();

        let mut gid = GidInfoParams::default();
        let res = cache.lookup_or_populate(ctrl::NVLINK_GET_NVLINK_CAPS, &mut gid, |_| Ok(()));
        assert_eq!(res, Err(RpcError::InvalidArgument));
    }

    #[test]
    fn racing_callers_see_one_winner() {
        let cache = ControlCache::new(false);
        let calls = AtomicU32::new(0);

        std::thread::scope(|s| {
            for i in 0..8u32 {
                let cache = &cache;
                let calls = &calls;
                s.spawn(move || {
                    let mut dst = NvlinkCapsParams::default();
                    cache
                        .lookup_or_populate(ctrl::NVLINK_GET_NVLINK_CAPS, &mut dst, |p| {
                            calls.fetch_add(1, Ordering::Relaxed);
                            *p = caps(1 << i);
                            Ok(())
                        })
                        .unwrap();
                    dst
                });
            }
        });

        assert_eq!(calls.load(Ordering::Relaxed), 1);
        let mut dst = NvlinkCapsParams::default();
        cache
            .lookup_or_populate(ctrl::NVLINK_GET_NVLINK_CAPS, &mut dst, |_| {
                Err(RpcError::InvalidState)
            })
            .unwrap();
        assert_eq!(dst.enabled_link_mask.count_ones(), 1);
    }

    #[test]
    fn every_cacheable_control_has_a_record() {
        for info in ctrl::controls() {
            assert!(control_record(info.cmd).is_some(), "{:#x}", info.cmd);
        }
    }
}
