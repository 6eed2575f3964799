// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use schematic_geometry::Point;

/// A polyline as decoded from the map file: a road class plus an ordered
/// sequence of points, before any derived structures are built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawSegment {
    /// Road class index, validated against
    /// [`schematic_geometry::MAX_ROAD_CLASS_INDEX`] during
    /// [`crate::SegmentStore::init`].
    pub road_class: u8,
    /// Ordered polyline vertices. Consecutive duplicates are collapsed by
    /// [`RawSegment::new`].
    pub points: Vec<Point>,
}

impl RawSegment {
    /// Builds a raw segment, collapsing consecutive duplicate points.
    #[must_use]
    pub fn new(road_class: u8, points: impl IntoIterator<Item = Point>) -> Self {
        let mut deduped: Vec<Point> = Vec::new();
        for point in points {
            if deduped.last() != Some(&point) {
                deduped.push(point);
            }
        }
        Self {
            road_class,
            points: deduped,
        }
    }
}
