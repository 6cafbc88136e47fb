// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use crate::cache::{control_record, ControlCache};
use crate::dispatch::{decode_any, decode_record, encode_record, LogicalRecord};
use crate::error::RpcError;
use crate::static_info::{copy_static_info, static_info_size, StaticInfo};
use crate::version::{negotiate, ProtocolVersion};
use alloc::boxed::Box;
use core::any::Any;

/// Knobs of an RPC session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Newest protocol version the guest speaks.
    pub guest_version: ProtocolVersion,
    /// Hosts older than this are refused.
    pub min_host_version: ProtocolVersion,
    /// Records of the static stream start on 8 byte boundaries.
    pub align_records: bool,
    /// Log cached control failures at info level only.
    pub quiet_prints: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            guest_version: ProtocolVersion::LATEST,
            min_host_version: ProtocolVersion::MIN_SUPPORTED,
            align_records: true,
            quiet_prints: false,
        }
    }
}

/// Codec state shared by every RPC of one vGPU: the negotiated protocol
/// version and the control cache.
#[derive(Debug)]
pub struct RpcSession {
    config: SessionConfig,
    negotiated: Option<ProtocolVersion>,
    cache: ControlCache,
}

impl RpcSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            negotiated: None,
            cache: ControlCache::new(config.quiet_prints),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn cache(&self) -> &ControlCache {
        &self.cache
    }

    /// Settles on a protocol version with a host running `host`.
    ///
    /// Repeating the handshake is allowed as long as it yields the same
    /// version. Switching versions would invalidate cached replies.
    pub fn negotiate(&mut self, host: ProtocolVersion) -> Result<ProtocolVersion, RpcError> {
        let version = negotiate(self.config.guest_version, host, self.config.min_host_version)?;
        match self.negotiated {
            Some(current) if current != version => {
                log::error!(
                    "RPC version already negotiated as {}, refusing {}",
                    current,
                    version
                );
                Err(RpcError::InvalidState)
            }
            _ => {
                log::info!("RPC protocol version {}", version);
                self.negotiated = Some(version);
                Ok(version)
            }
        }
    }

    /// The negotiated protocol version.
    pub fn version(&self) -> Result<ProtocolVersion, RpcError> {
        self.negotiated.ok_or(RpcError::InvalidState)
    }

    pub fn decode<P: LogicalRecord>(
        &self,
        dst: Option<&mut P>,
        buffer: Option<&[u8]>,
        buffer_size: u32,
        offset: Option<&mut u32>,
    ) -> Result<(), RpcError> {
        decode_record(self.version()?, dst, buffer, buffer_size, offset)
    }

    pub fn encode<P: LogicalRecord>(
        &self,
        src: Option<&P>,
        buffer: Option<&mut [u8]>,
        buffer_size: u32,
        offset: Option<&mut u32>,
    ) -> Result<(), RpcError> {
        encode_record(self.version()?, src, buffer, buffer_size, offset)
    }

    /// Size of the static stream the host sends at the negotiated version.
    pub fn static_info_size(&self) -> Result<u32, RpcError> {
        static_info_size(self.version()?, self.config.align_records)
    }

    /// Decodes the static stream in `buffer` starting at `offset`.
    pub fn static_info(&self, buffer: &[u8], offset: &mut u32) -> Result<Box<StaticInfo>, RpcError> {
        let version = self.version()?;
        let buffer_size = u32::try_from(buffer.len()).map_err(|_| RpcError::InvalidArgument)?;
        let mut info = StaticInfo::new_boxed()?;
        copy_static_info(
            Some(&mut *info),
            version,
            Some(buffer),
            buffer_size,
            Some(offset),
            self.config.align_records,
        )?;
        Ok(info)
    }

    /// Decodes the reply of control `cmd` into `dst`.
    ///
    /// Replies of cacheable controls are decoded once per session. Later
    /// calls are answered from the cache and ignore `reply`.
    pub fn control<P>(
        &self,
        cmd: u32,
        dst: &mut P,
        reply: Option<&[u8]>,
        reply_size: u32,
    ) -> Result<(), RpcError>
    where
        P: LogicalRecord + Send + Clone,
    {
        let version = self.version()?;
        let kind = control_record(cmd).ok_or(RpcError::ObjectNotFound)?;
        if kind != P::KIND {
            return Err(RpcError::InvalidArgument);
        }

        let populate = |dst: &mut P| {
            let mut offset = 0;
            decode_any(
                kind,
                version,
                Some(dst as &mut dyn Any),
                reply,
                reply_size,
                Some(&mut offset),
            )
        };

        if self.cache.is_cacheable(cmd) {
            self.cache.lookup_or_populate(cmd, dst, populate)
        } else {
            populate(dst)
        }
    }
}
