// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer geometry primitives shared across the schematic map engine.
//!
//! Everything here is plain data and arithmetic: points, sizes, rectangles,
//! a 64-bit "wide" variant of each used by the viewport controller to stay
//! exact at extreme zoom-out, an orientation classifier for line segments,
//! and the small set of numeric constants the rest of the workspace is built
//! against.
//!
//! ```
//! use schematic_geometry::{Point, Rect};
//!
//! let rect = Rect::new(0, 0, 100, 100);
//! assert!(rect.contains(Point::new(100, 0)));
//! assert!(!rect.contains(Point::new(101, 0)));
//! ```

#![no_std]

extern crate alloc;

mod big;
mod color;
mod consts;
mod orientation;
mod rect;
mod utils;

pub use big::{BigPoint, BigRect, BigSize};
pub use color::Color;
pub use consts::*;
pub use orientation::{Direction, Orientation};
pub use rect::{Point, Rect, Size};
pub use utils::{check_flag, get_median, is_odd, value_in_range};

/// Planar integer coordinate.
pub type Coord = i32;

/// Wide coordinate used where zoomed-out arithmetic would overflow [`Coord`].
pub type BigCoord = i64;
