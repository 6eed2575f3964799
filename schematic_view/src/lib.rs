// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Schematic View: the viewport state machine and the border table a frame
//! stabs the spatial index with.
//!
//! - [`border::ViewportArea`]: a viewport rectangle plus the nine edges and
//!   axes `schematic_index` stabs against it.
//! - [`controller::Controller`]: integer-exact pan/zoom state. Positions are
//!   tracked in [`schematic_geometry::BigCoord`] so that panning and zooming
//!   stay exact at the widest zoom-out, where `coord << zoom_factor` would
//!   overflow a 32-bit value.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod border;
pub mod controller;

pub use border::{Border, ViewportArea};
pub use controller::{Controller, Move, Zoom, ZoomKind};
