// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

pub mod spinlock;

pub use spinlock::{LockGuard, SpinLock};
