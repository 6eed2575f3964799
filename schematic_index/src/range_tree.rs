// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D range tree: an x-sorted binary tree with a y-sorted secondary array at
//! every internal node, answering axis-aligned rectangle queries without
//! visiting points outside the query rectangle's x-span.

use alloc::boxed::Box;
use alloc::vec::Vec;
use schematic_geometry::{get_median, Coord, Rect};

struct Node<T> {
    /// Smallest and largest x coordinate of any point in this subtree.
    x_min: Coord,
    x_max: Coord,
    /// Every point in this subtree, sorted by y ascending; queried by binary
    /// search once a node is found to lie entirely within the x-range.
    by_y: Vec<(Coord, Coord, T)>,
    kind: NodeKind<T>,
}

enum NodeKind<T> {
    Leaf,
    Internal {
        /// x coordinates `< split_x` are in `left`; `>= split_x` in `right`.
        split_x: Coord,
        left: Box<Node<T>>,
        right: Box<Node<T>>,
    },
}

/// A 2D range tree over a fixed set of `(x, y, payload)` triples.
///
/// Built once via [`RangeTree::build`]; queried any number of times via
/// [`RangeTree::query_rect`]. There is no incremental update: a changed
/// point set means building a new tree.
pub struct RangeTree<T> {
    root: Option<Node<T>>,
}

impl<T: Copy> RangeTree<T> {
    /// Builds a range tree over `points`. `points` need not be pre-sorted.
    #[must_use]
    pub fn build(mut points: Vec<(Coord, Coord, T)>) -> Self {
        points.sort_by_key(|(x, y, _)| (*x, *y));
        Self {
            root: build_node(points),
        }
    }

    /// Every payload whose point lies within `rect`, inclusive of both edges.
    #[must_use]
    pub fn query_rect(&self, rect: Rect) -> Vec<T> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            collect(root, rect, &mut out);
        }
        out
    }
}

fn build_node<T: Copy>(points: Vec<(Coord, Coord, T)>) -> Option<Node<T>> {
    if points.is_empty() {
        return None;
    }
    if points.len() == 1 {
        let (x, y, payload) = points[0];
        return Some(Node {
            x_min: x,
            x_max: x,
            by_y: alloc::vec![(x, y, payload)],
            kind: NodeKind::Leaf,
        });
    }

    // Split at the median so both halves are non-empty and differ in size
    // by at most one, keeping the tree balanced regardless of duplicate x
    // coordinates. The left half includes the median element itself.
    let median_index = get_median(points.len());
    let split_x = points[median_index].0;
    let mut left_points = points;
    let right_points = left_points.split_off(median_index + 1);

    let left = build_node(left_points).expect("non-empty half");
    let right = build_node(right_points).expect("non-empty half");

    let x_min = left.x_min;
    let x_max = right.x_max;
    let mut by_y = Vec::with_capacity(left.by_y.len() + right.by_y.len());
    merge_by_y(&left.by_y, &right.by_y, &mut by_y);

    Some(Node {
        x_min,
        x_max,
        by_y,
        kind: NodeKind::Internal {
            split_x,
            left: Box::new(left),
            right: Box::new(right),
        },
    })
}

fn merge_by_y<T: Copy>(left: &[(Coord, Coord, T)], right: &[(Coord, Coord, T)], out: &mut Vec<(Coord, Coord, T)>) {
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if left[i].1 <= right[j].1 {
            out.push(left[i]);
            i += 1;
        } else {
            out.push(right[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&left[i..]);
    out.extend_from_slice(&right[j..]);
}

fn collect<T: Copy>(node: &Node<T>, rect: Rect, out: &mut Vec<T>) {
    if node.x_max < rect.left || node.x_min > rect.right {
        return;
    }
    if rect.left <= node.x_min && node.x_max <= rect.right {
        collect_by_y(&node.by_y, rect, out);
        return;
    }
    match &node.kind {
        NodeKind::Leaf => {
            let (x, y, payload) = node.by_y[0];
            if rect.left <= x && x <= rect.right && rect.top <= y && y <= rect.bottom {
                out.push(payload);
            }
        }
        NodeKind::Internal { left, right, .. } => {
            collect(left, rect, out);
            collect(right, rect, out);
        }
    }
}

fn collect_by_y<T: Copy>(by_y: &[(Coord, Coord, T)], rect: Rect, out: &mut Vec<T>) {
    let start = by_y.partition_point(|(_, y, _)| *y < rect.top);
    for &(_, y, payload) in &by_y[start..] {
        if y > rect.bottom {
            break;
        }
        out.push(payload);
    }
}

#[cfg(debug_assertions)]
impl<T: Copy + PartialEq> RangeTree<T> {
    /// Brute-force re-derivation of [`RangeTree::query_rect`], for tests that
    /// check the tree against a linear scan of the original point set.
    #[must_use]
    pub fn query_rect_brute_force(points: &[(Coord, Coord, T)], rect: Rect) -> Vec<T> {
        points
            .iter()
            .filter(|(x, y, _)| rect.left <= *x && *x <= rect.right && rect.top <= *y && *y <= rect.bottom)
            .map(|(_, _, payload)| *payload)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut v: Vec<u32>) -> Vec<u32> {
        v.sort_unstable();
        v
    }

    #[test]
    fn query_matches_brute_force_on_a_grid() {
        let mut points = Vec::new();
        for x in 0..10 {
            for y in 0..10 {
                points.push((x * 10, y * 10, (x * 10 + y) as u32));
            }
        }
        let tree = RangeTree::build(points.clone());
        let rect = Rect::new(15, 25, 65, 75);
        let expected = sorted(RangeTree::query_rect_brute_force(&points, rect));
        let actual = sorted(tree.query_rect(rect));
        assert_eq!(actual, expected);
    }

    #[test]
    fn query_rect_is_inclusive_of_edges() {
        let tree = RangeTree::build(alloc::vec![(0, 0, 1u32), (100, 100, 2u32)]);
        assert_eq!(sorted(tree.query_rect(Rect::new(0, 0, 100, 100))), [1, 2]);
        assert!(tree.query_rect(Rect::new(1, 1, 99, 99)).is_empty());
    }

    #[test]
    fn single_point_tree_answers_queries() {
        let tree = RangeTree::build(alloc::vec![(5, 5, 42u32)]);
        assert_eq!(tree.query_rect(Rect::new(0, 0, 10, 10)), [42]);
        assert!(tree.query_rect(Rect::new(6, 6, 10, 10)).is_empty());
    }

    #[test]
    fn empty_tree_answers_empty() {
        let tree: RangeTree<u32> = RangeTree::build(Vec::new());
        assert!(tree.query_rect(Rect::new(0, 0, 10, 10)).is_empty());
    }
}
