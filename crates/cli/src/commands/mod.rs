// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod events;
pub mod operator;
pub mod signal;
pub mod status;
