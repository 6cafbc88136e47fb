// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

//! Versioned structure copy between the guest driver and the vGPU host.
//!
//! The host answers RPCs with records laid out according to the protocol
//! version both sides negotiated at boot. This crate copies those records
//! into the version independent structures of `rpcsdk` and back, checking
//! every bound on the way, and caches the control replies that can never
//! change during a session.

#![no_std]

extern crate alloc;

pub mod cache;
pub mod codec;
pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod locking;
pub mod records;
pub mod session;
// The `FromZeros` derive on the macro-generated `StaticInfo` emits helper types
// that trip `missing_debug_implementations`; `StaticInfo` itself derives `Debug`.
#[allow(missing_debug_implementations)]
pub mod static_info;
pub mod version;

pub use error::{RpcError, RpcStatus};
pub use session::{RpcSession, SessionConfig};
pub use static_info::StaticInfo;
pub use version::ProtocolVersion;
