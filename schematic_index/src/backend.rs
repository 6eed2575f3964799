// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pluggable spatial-query backend, in the style of the teacher's generic
//! index crate's `Backend` trait: anything that can answer "which payloads
//! lie within this rectangle" can stand in for [`RangeTree`](crate::RangeTree)
//! without `select.rs` knowing which implementation it got.

use alloc::vec::Vec;
use schematic_geometry::{Coord, Rect};

use crate::range_tree::RangeTree;

/// A spatial structure answering axis-aligned rectangle membership queries
/// over `(x, y, payload)` triples.
pub trait Backend<T> {
    /// Every payload whose point lies within `rect`, inclusive of both edges.
    fn query_rect(&self, rect: Rect) -> Vec<T>;
}

impl<T: Copy> Backend<T> for RangeTree<T> {
    fn query_rect(&self, rect: Rect) -> Vec<T> {
        RangeTree::query_rect(self, rect)
    }
}

/// Linear-scan backend over the same `(x, y, payload)` triples a
/// [`RangeTree`] is built from. Used as the brute-force reference
/// implementation in debug-only consistency checks; never built in a
/// release profile, since its query cost is `O(n)` rather than
/// `O(log^2 n + k)`.
#[cfg(debug_assertions)]
pub struct LinearBackend<T> {
    points: Vec<(Coord, Coord, T)>,
}

#[cfg(debug_assertions)]
impl<T> LinearBackend<T> {
    /// Wraps `points` for linear-scan queries.
    #[must_use]
    pub fn new(points: Vec<(Coord, Coord, T)>) -> Self {
        Self { points }
    }
}

#[cfg(debug_assertions)]
impl<T: Copy> Backend<T> for LinearBackend<T> {
    fn query_rect(&self, rect: Rect) -> Vec<T> {
        self.points
            .iter()
            .filter(|(x, y, _)| rect.left <= *x && *x <= rect.right && rect.top <= *y && *y <= rect.bottom)
            .map(|(_, _, payload)| *payload)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_tree_and_linear_backend_agree() {
        let points = alloc::vec![(0, 0, 1u32), (50, 50, 2u32), (100, 100, 3u32)];
        let tree = RangeTree::build(points.clone());
        let linear = LinearBackend::new(points);

        let rect = Rect::new(10, 10, 60, 60);
        let mut from_tree = Backend::query_rect(&tree, rect);
        let mut from_linear = Backend::query_rect(&linear, rect);
        from_tree.sort_unstable();
        from_linear.sort_unstable();
        assert_eq!(from_tree, from_linear);
    }
}
