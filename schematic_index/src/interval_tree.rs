// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interval tree over 1D intervals, each carrying a secondary-axis value:
//! answers "which intervals contain this point, and have a secondary value
//! within this range" without a full scan.
//!
//! Every node partitions the intervals that haven't already gone left or
//! right into the ones spanning its center point, kept in two "heaps": one
//! ordered by ascending `low` (stabbed when the query point is left of
//! center), one by descending `high` (stabbed when it is right of center).
//! Each heap is itself a recursive secondary structure, not a flat scanned
//! list: the item stored at a heap node is the extremum (minimal `low`, or
//! maximal `high`) of its whole range, which makes every heap a min-heap (or
//! max-heap) by construction. A stab can therefore prune an entire subtree
//! the instant its stored extremum fails the primary test, and the
//! remaining items split on their secondary-axis median into the node's
//! children, giving the pair of heaps the same `O(log n)` per-level query
//! cost a range tree's secondary array gets from binary search.

use alloc::boxed::Box;
use alloc::vec::Vec;
use schematic_geometry::{get_median, Coord};
use schematic_view::Border;

#[derive(Clone, Copy)]
struct Item<T> {
    low: Coord,
    high: Coord,
    secondary: Coord,
    payload: T,
}

/// One node of a heap-ordered secondary structure: `item` is the extremum
/// (by whichever primary field the enclosing heap is ordered on) of every
/// item in this node's subtree, so a primary-axis test on `item` alone
/// decides whether any descendant can possibly match.
struct HeapNode<T> {
    item: Item<T>,
    /// Smallest and largest secondary value anywhere in this subtree, for
    /// pruning a stab's secondary-range test the way `range_tree`'s
    /// `x_min`/`x_max` prunes on the primary axis.
    sec_min: Coord,
    sec_max: Coord,
    left: Option<Box<HeapNode<T>>>,
    right: Option<Box<HeapNode<T>>>,
}

impl<T: Copy> HeapNode<T> {
    fn leaf(item: Item<T>) -> Box<Self> {
        Box::new(Self {
            item,
            sec_min: item.secondary,
            sec_max: item.secondary,
            left: None,
            right: None,
        })
    }

    fn node(item: Item<T>, left: Option<Box<Self>>, right: Option<Box<Self>>) -> Box<Self> {
        let mut sec_min = item.secondary;
        let mut sec_max = item.secondary;
        for child in [&left, &right].into_iter().flatten() {
            sec_min = sec_min.min(child.sec_min);
            sec_max = sec_max.max(child.sec_max);
        }
        Box::new(Self {
            item,
            sec_min,
            sec_max,
            left,
            right,
        })
    }
}

/// Builds a heap over `items`, already sorted ascending by secondary value.
/// `pick_extreme` returns the index of the item that is the primary-axis
/// extremum of the whole slice (minimal `low` for an ascending heap, maximal
/// `high` for a descending one).
fn build_heap<T: Copy>(mut items: Vec<Item<T>>, pick_extreme: fn(&[Item<T>]) -> usize) -> Option<Box<HeapNode<T>>> {
    if items.is_empty() {
        return None;
    }
    let root = items.swap_remove(pick_extreme(&items));
    if items.is_empty() {
        return Some(HeapNode::leaf(root));
    }

    // `swap_remove` moved the last element into the removed slot, so
    // re-sort the remainder by secondary value before splitting it; the
    // rest of the build stays a simple median split of a sorted slice, the
    // same shape `range_tree`'s `build_node` uses.
    items.sort_by_key(|i| i.secondary);
    let median_index = get_median(items.len());
    let mut left_items = items;
    let right_items = left_items.split_off(median_index + 1);

    let left = build_heap(left_items, pick_extreme);
    let right = build_heap(right_items, pick_extreme);
    Some(HeapNode::node(root, left, right))
}

fn pick_min_low<T>(items: &[Item<T>]) -> usize {
    items
        .iter()
        .enumerate()
        .min_by_key(|(_, item)| item.low)
        .map(|(index, _)| index)
        .expect("non-empty slice")
}

fn pick_max_high<T>(items: &[Item<T>]) -> usize {
    items
        .iter()
        .enumerate()
        .max_by_key(|(_, item)| item.high)
        .map(|(index, _)| index)
        .expect("non-empty slice")
}

/// Stabs `heap` for every payload whose secondary value lies within
/// `[sec_lo, sec_hi]` and whose item satisfies `primary_ok`.
///
/// `primary_ok` must be monotonic with respect to the heap's ordering (false
/// for the root implies false for every descendant); passing the heap's own
/// extremum test (`low <= v` for an ascending heap, `high >= v` for a
/// descending one) is what gives the recursive prune its `O(log n)` bound
/// instead of visiting every node.
fn stab_heap<T: Copy>(
    heap: Option<&HeapNode<T>>,
    sec_lo: Border,
    sec_hi: Border,
    primary_ok: &impl Fn(&Item<T>) -> bool,
    out: &mut Vec<T>,
) {
    let Some(node) = heap else { return };
    if !sec_lo.matches(node.sec_max) || !sec_hi.matches(node.sec_min) {
        return;
    }
    if !primary_ok(&node.item) {
        return;
    }
    if sec_lo.matches(node.item.secondary) && sec_hi.matches(node.item.secondary) {
        out.push(node.item.payload);
    }
    stab_heap(node.left.as_deref(), sec_lo, sec_hi, primary_ok, out);
    stab_heap(node.right.as_deref(), sec_lo, sec_hi, primary_ok, out);
}

struct Node<T> {
    center: Coord,
    asc_by_low: Option<Box<HeapNode<T>>>,
    desc_by_high: Option<Box<HeapNode<T>>>,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

/// An interval tree over `(low, high, secondary, payload)` tuples.
pub struct IntervalTree<T> {
    root: Option<Box<Node<T>>>,
}

impl<T: Copy> IntervalTree<T> {
    /// Builds a tree over `intervals`, each `(low, high, secondary, payload)`
    /// with `low <= high`.
    #[must_use]
    pub fn build(intervals: Vec<(Coord, Coord, Coord, T)>) -> Self {
        let items = intervals
            .into_iter()
            .map(|(low, high, secondary, payload)| Item {
                low,
                high,
                secondary,
                payload,
            })
            .collect();
        Self {
            root: build_node(items),
        }
    }

    /// Every payload whose interval contains `v`, and whose secondary value
    /// matches both `sec_lo` and `sec_hi` (a lower and an upper bound,
    /// typically a [`schematic_view::ViewportArea`] edge or axis pair).
    #[must_use]
    pub fn stab(&self, v: Coord, sec_lo: Border, sec_hi: Border) -> Vec<T> {
        let mut out = Vec::new();
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            if v < n.center {
                stab_heap(n.asc_by_low.as_deref(), sec_lo, sec_hi, &|item| item.low <= v, &mut out);
                node = n.left.as_deref();
            } else if v > n.center {
                stab_heap(n.desc_by_high.as_deref(), sec_lo, sec_hi, &|item| item.high >= v, &mut out);
                node = n.right.as_deref();
            } else {
                stab_heap(n.asc_by_low.as_deref(), sec_lo, sec_hi, &|_| true, &mut out);
                break;
            }
        }
        out
    }
}

fn build_node<T: Copy>(items: Vec<Item<T>>) -> Option<Box<Node<T>>> {
    if items.is_empty() {
        return None;
    }

    let mut endpoints: Vec<Coord> = items.iter().flat_map(|i| [i.low, i.high]).collect();
    endpoints.sort_unstable();
    endpoints.dedup();
    let center = endpoints[get_median(endpoints.len())];

    let mut left_items = Vec::new();
    let mut right_items = Vec::new();
    let mut overlap = Vec::new();
    for item in items {
        if item.high < center {
            left_items.push(item);
        } else if item.low > center {
            right_items.push(item);
        } else {
            overlap.push(item);
        }
    }

    let mut asc_by_low = overlap.clone();
    asc_by_low.sort_by_key(|i| i.secondary);
    let mut desc_by_high = overlap;
    desc_by_high.sort_by_key(|i| i.secondary);

    Some(Box::new(Node {
        center,
        asc_by_low: build_heap(asc_by_low, pick_min_low),
        desc_by_high: build_heap(desc_by_high, pick_max_high),
        left: build_node(left_items),
        right: build_node(right_items),
    }))
}

#[cfg(debug_assertions)]
impl<T: Copy> IntervalTree<T> {
    /// Brute-force re-derivation of [`IntervalTree::stab`], for tests.
    #[must_use]
    pub fn stab_brute_force(
        intervals: &[(Coord, Coord, Coord, T)],
        v: Coord,
        sec_lo: Border,
        sec_hi: Border,
    ) -> Vec<T> {
        intervals
            .iter()
            .filter(|(low, high, secondary, _)| *low <= v && v <= *high && sec_lo.matches(*secondary) && sec_hi.matches(*secondary))
            .map(|(_, _, _, payload)| *payload)
            .collect()
    }
}
