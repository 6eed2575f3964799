// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Schematic Raster: clips selected sections against the screen rect and
//! paints them into a pixel buffer.
//!
//! - [`clip::clip_section`]: the tolerant section-to-rectangle clipper.
//! - [`paint::Painter`]: the thickness-, outline- and junction-aware
//!   plotter, plus the road-class zoom scaling and filter it is driven by.
//! - [`pixels::PixelBuffer`]: the row-aligned pixel grid the painter writes
//!   into.
//! - [`frame::render_frame`]: ties the three together into one call per
//!   frame.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod clip;
mod frame;
mod paint;
mod pixels;

pub use clip::clip_section;
pub use frame::render_frame;
pub use paint::{junction_for, road_class_filter, scale_road_class, JunctionShape, Painter};
pub use pixels::PixelBuffer;
