// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The nine edges and axes a viewport rectangle exposes to `schematic_index`.

use schematic_geometry::{Coord, Rect, MIN_COORD};

/// One coordinate that a query stabs against, plus which side of it counts
/// as "inside".
///
/// `is_min` means the border is a lower bound: a value matches when
/// `coord <= value`. Otherwise the border is an upper bound: a value matches
/// when `value < coord`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Border {
    /// The coordinate this border is defined at.
    pub coord: Coord,
    /// Whether this border is a lower bound (`coord <= value`) or an upper
    /// bound (`value < coord`).
    pub is_min: bool,
}

impl Border {
    const fn new(coord: Coord, is_min: bool) -> Self {
        Self { coord, is_min }
    }

    /// Whether `value` lies on the "inside" side of this border.
    #[must_use]
    pub fn matches(self, value: Coord) -> bool {
        if self.is_min {
            self.coord <= value
        } else {
            value < self.coord
        }
    }
}

/// The nine borders a frame's viewport stabs the spatial index with: the
/// four viewport edges, a border at the top of the whole coordinate domain,
/// and the four viewport axes (the edges reused with their bound flipped, so
/// the left/top edges can also be queried as upper bounds and the
/// right/bottom edges as lower bounds).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewportArea {
    rect: Rect,
}

impl ViewportArea {
    /// Wraps a viewport rectangle to derive its border table.
    #[must_use]
    pub const fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// The wrapped viewport rectangle.
    #[must_use]
    pub const fn rect(self) -> Rect {
        self.rect
    }

    /// Lower bound at the viewport's left edge.
    #[must_use]
    pub const fn left_edge(self) -> Border {
        Border::new(self.rect.left, true)
    }

    /// Upper bound at the viewport's right edge.
    #[must_use]
    pub const fn right_edge(self) -> Border {
        Border::new(self.rect.right, false)
    }

    /// Lower bound at the viewport's top edge.
    #[must_use]
    pub const fn top_edge(self) -> Border {
        Border::new(self.rect.top, true)
    }

    /// Upper bound at the viewport's bottom edge.
    #[must_use]
    pub const fn bottom_edge(self) -> Border {
        Border::new(self.rect.bottom, false)
    }

    /// Lower bound at the top of the whole coordinate domain, used to stab
    /// for sections whose bounding box passes entirely above the viewport.
    #[must_use]
    pub const fn map_top_border(self) -> Border {
        Border::new(MIN_COORD, true)
    }

    /// Upper bound at the viewport's left edge, used when a stab needs the
    /// left edge as an exclusive ceiling instead of an inclusive floor.
    #[must_use]
    pub const fn left_axis(self) -> Border {
        Border::new(self.rect.left, false)
    }

    /// Lower bound at the viewport's right edge.
    #[must_use]
    pub const fn right_axis(self) -> Border {
        Border::new(self.rect.right, true)
    }

    /// Upper bound at the viewport's top edge.
    #[must_use]
    pub const fn top_axis(self) -> Border {
        Border::new(self.rect.top, false)
    }

    /// Lower bound at the viewport's bottom edge.
    #[must_use]
    pub const fn bottom_axis(self) -> Border {
        Border::new(self.rect.bottom, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_inclusive_lower_or_upper_bounds() {
        let area = ViewportArea::new(Rect::new(10, 20, 110, 220));
        assert!(area.left_edge().matches(10));
        assert!(!area.left_edge().matches(9));
        assert!(area.right_edge().matches(109));
        assert!(!area.right_edge().matches(110));
    }

    #[test]
    fn axes_flip_the_bound_direction_of_the_matching_edge() {
        let area = ViewportArea::new(Rect::new(10, 20, 110, 220));
        assert!(area.left_axis().matches(9));
        assert!(!area.left_axis().matches(10));
        assert!(area.right_axis().matches(110));
        assert!(!area.right_axis().matches(109));
    }

    #[test]
    fn map_top_border_matches_every_representable_coordinate() {
        let area = ViewportArea::new(Rect::new(10, 20, 110, 220));
        assert!(area.map_top_border().matches(MIN_COORD));
        assert!(area.map_top_border().matches(20));
    }
}
