// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025 The rpccopy developers
//
// Author: The rpccopy developers

use zerocopy::FromZeros;

pub const ENGINE_NOTIFICATION_INTR_VECTORS_MAX_ENGINES: usize = 256;
pub const STATIC_INTR_TABLE_MAX: usize = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct EngineNotificationIntrVector {
    pub nv2080_engine_type: u32,
    pub notification_intr_vector: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeros)]
pub struct EngineNotificationIntrVectorsParams {
    pub num_entries: u32,
    pub entries: [EngineNotificationIntrVector; ENGINE_NOTIFICATION_INTR_VECTORS_MAX_ENGINES],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromZeros)]
pub struct StaticIntrEntry {
    pub nv2080_intr_type: u32,
    pub pmc_intr_mask: u32,
    pub intr_vector_stall: u32,
    pub intr_vector_non_stall: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, FromZeros)]
pub struct StaticIntrTableParams {
    pub num_entries: u32,
    pub entries: [StaticIntrEntry; STATIC_INTR_TABLE_MAX],
}

impl_zeroed_default!(EngineNotificationIntrVectorsParams, StaticIntrTableParams);
