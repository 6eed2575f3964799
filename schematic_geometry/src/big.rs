// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 64-bit counterparts of [`crate::Point`]/[`crate::Size`]/[`crate::Rect`].
//!
//! The controller needs these to keep viewport arithmetic exact at the most
//! extreme zoom-out levels, where `coord << zoom_factor` would overflow a
//! 32-bit value. Narrowing back down asserts that the value is in range in
//! debug builds and truncates in release builds, mirroring
//! `beBigCoordTypes.cpp`'s `big2coord`.

use crate::{BigCoord, Coord, Point, Rect, Size};

fn narrow(value: BigCoord) -> Coord {
    debug_assert!(
        (Coord::MIN as BigCoord <= value) && (value <= Coord::MAX as BigCoord),
        "big coordinate out of range"
    );
    value as Coord
}

/// A point in the wide (64-bit) coordinate domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BigPoint {
    /// Horizontal coordinate.
    pub x: BigCoord,
    /// Vertical coordinate.
    pub y: BigCoord,
}

impl BigPoint {
    /// Creates a wide point from its coordinates.
    #[must_use]
    pub const fn new(x: BigCoord, y: BigCoord) -> Self {
        Self { x, y }
    }

    /// Narrows back to a [`Point`], truncating towards the `Coord` domain.
    #[must_use]
    pub fn to_point(self) -> Point {
        Point::new(narrow(self.x), narrow(self.y))
    }
}

impl From<Point> for BigPoint {
    fn from(point: Point) -> Self {
        Self::new(point.x as BigCoord, point.y as BigCoord)
    }
}

/// A width/height pair in the wide (64-bit) coordinate domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BigSize {
    /// Horizontal extent.
    pub width: BigCoord,
    /// Vertical extent.
    pub height: BigCoord,
}

impl BigSize {
    /// Creates a wide size from its components.
    #[must_use]
    pub const fn new(width: BigCoord, height: BigCoord) -> Self {
        Self { width, height }
    }
}

impl From<Size> for BigSize {
    fn from(size: Size) -> Self {
        Self::new(size.width as BigCoord, size.height as BigCoord)
    }
}

/// A rectangle in the wide (64-bit) coordinate domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BigRect {
    /// Left edge, inclusive.
    pub left: BigCoord,
    /// Top edge, inclusive.
    pub top: BigCoord,
    /// Right edge, inclusive.
    pub right: BigCoord,
    /// Bottom edge, inclusive.
    pub bottom: BigCoord,
}

impl BigRect {
    /// Creates a wide rectangle from its four edges.
    #[must_use]
    pub const fn new(left: BigCoord, top: BigCoord, right: BigCoord, bottom: BigCoord) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a wide rectangle from a top-left corner and a wide size.
    #[must_use]
    pub fn from_top_left(top_left: BigPoint, size: BigSize) -> Self {
        Self::new(
            top_left.x,
            top_left.y,
            top_left.x + size.width,
            top_left.y + size.height,
        )
    }

    /// Narrows back to a [`Rect`], truncating each edge towards `Coord`.
    #[must_use]
    pub fn to_rect(self) -> Rect {
        Rect::new_unchecked(
            narrow(self.left),
            narrow(self.top),
            narrow(self.right),
            narrow(self.bottom),
        )
    }
}

impl From<Rect> for BigRect {
    fn from(rect: Rect) -> Self {
        Self::new(
            rect.left as BigCoord,
            rect.top as BigCoord,
            rect.right as BigCoord,
            rect.bottom as BigCoord,
        )
    }
}
