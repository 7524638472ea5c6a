// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Utility modules
//!
//! Common terminal helpers for the simdeploy CLI.

pub mod colors;
pub mod spinner;

pub use colors::*;
pub use spinner::*;
