// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ties the range tree and the two interval trees to a [`SegmentStore`],
//! answering "which sections might be visible in this viewport" the way a
//! frame needs it.

use alloc::vec::Vec;
use schematic_geometry::{Orientation, Rect};
use schematic_segments::{SectPosId, SectionId, SegmentStore};
use schematic_view::ViewportArea;

use crate::{IntervalTree, RangeTree};

/// Owns the spatial structures built over one [`SegmentStore`]'s vertices
/// and interval sections.
///
/// Rebuilding a `SectionIndex` is the only way to reflect a changed segment
/// store; there is no incremental insert or remove.
pub struct SectionIndex {
    points: RangeTree<schematic_segments::PointPosId>,
    horizontal: IntervalTree<SectPosId>,
    vertical: IntervalTree<SectPosId>,
}

impl SectionIndex {
    /// Builds every spatial structure over `store`'s current contents.
    #[must_use]
    pub fn build(store: &SegmentStore) -> Self {
        let points = RangeTree::build(
            store
                .get_point_positions()
                .into_iter()
                .map(|p| (p.point.x, p.point.y, p.id))
                .collect(),
        );
        let horizontal = build_interval_tree(store, Orientation::Horizontal);
        let vertical = build_interval_tree(store, Orientation::Vertical);
        Self {
            points,
            horizontal,
            vertical,
        }
    }

    /// Every section that might be visible within `viewport`, sorted and
    /// deduplicated.
    ///
    /// This is a selection step, not a clip: sections are chosen by their
    /// bounding box, and the result is a conservative superset of what is
    /// actually on screen once the rasterizer clips each one.
    #[must_use]
    pub fn select_sections(&self, store: &SegmentStore, viewport: Rect) -> Vec<SectionId> {
        let point_ids = self.points.query_rect(viewport);
        let area = ViewportArea::new(viewport);

        let mut sect_pos_ids = Vec::new();
        sect_pos_ids.extend(self.horizontal.stab(viewport.left, area.top_edge(), area.bottom_edge()));
        sect_pos_ids.extend(self.horizontal.stab(viewport.right, area.top_edge(), area.bottom_edge()));

        // Sections whose bounding box entirely contains the viewport never
        // cross the left or right edge within the [top, bottom] band, so
        // the two stabs above miss them. Stab the left edge again with the
        // band extended up to the top of the coordinate domain to find
        // sections whose bounding box's top edge passes above the
        // viewport, then keep only the ones whose bounding box reaches past
        // the viewport's bottom-right corner, meaning it covers the
        // viewport entirely.
        for id in self.horizontal.stab(viewport.left, area.map_top_border(), area.top_axis()) {
            let cross_point = store.get_section_cross_point(id);
            if viewport.right < cross_point.x && viewport.bottom < cross_point.y {
                sect_pos_ids.push(id);
            }
        }

        // The vertical tree's bottom axis is deliberately not stabbed: a
        // section crossing it either also crosses the left or right edge
        // (caught above) or has its bounding box entirely above the
        // viewport's bottom edge, in which case it was already caught by
        // the top-axis stab or the cross-section check above.
        sect_pos_ids.extend(self.vertical.stab(viewport.top, area.left_edge(), area.right_edge()));

        store.prepare_sections(&point_ids, &sect_pos_ids)
    }
}

fn build_interval_tree(store: &SegmentStore, orientation: Orientation) -> IntervalTree<SectPosId> {
    let positions = store.get_sect_positions(orientation);
    let mut intervals = Vec::with_capacity(positions.len() / 2);
    for pair in positions.chunks_exact(2) {
        let begin = pair[0];
        let end = pair[1];
        let (low, high, secondary) = match orientation {
            Orientation::Horizontal => (begin.point.x, end.point.x, begin.point.y),
            _ => (begin.point.y, end.point.y, begin.point.x),
        };
        intervals.push((low, high, secondary, begin.id));
    }
    IntervalTree::build(intervals)
}

/// Brute-force reference selector used in tests and debug assertions: a
/// section is a candidate whenever its bounding box intersects the
/// viewport, found by a linear scan instead of the spatial structures.
#[cfg(debug_assertions)]
pub mod brute_force {
    use alloc::vec::Vec;
    use schematic_geometry::Rect;
    use schematic_segments::{SectionId, SegmentStore};

    /// Linear-scan reimplementation of [`super::SectionIndex::select_sections`].
    #[must_use]
    pub fn select_sections(store: &SegmentStore, viewport: Rect) -> Vec<SectionId> {
        let mut sections = Vec::new();
        for (segment_index, segment) in store.segments().iter().enumerate() {
            for section_index in 0..segment.section_count() {
                let begin = segment.points[section_index].point;
                let end = segment.points[section_index + 1].point;
                let bbox = Rect::new(begin.x, begin.y, end.x, end.y);
                if rects_intersect(bbox, viewport) {
                    sections.push(SectionId::compose(segment_index as u32, section_index as u32));
                }
            }
        }
        sections.sort();
        sections
    }

    fn rects_intersect(a: Rect, b: Rect) -> bool {
        a.left <= b.right && b.left <= a.right && a.top <= b.bottom && b.top <= a.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schematic_geometry::Point;
    use schematic_segments::RawSegment;

    fn sample_store() -> SegmentStore {
        SegmentStore::init(alloc::vec![
            RawSegment::new(0, [Point::new(0, 500), Point::new(1000, 500)]),
            RawSegment::new(1, [Point::new(500, 0), Point::new(500, 1000)]),
            RawSegment::new(2, [Point::new(-2000, -2000), Point::new(3000, 3000)]),
            RawSegment::new(3, [Point::new(200, 200), Point::new(260, 260)]),
        ])
        .unwrap()
    }

    #[test]
    fn matches_brute_force_on_a_centered_viewport() {
        let store = sample_store();
        let index = SectionIndex::build(&store);
        let viewport = Rect::new(100, 100, 900, 900);

        let mut fast = index.select_sections(&store, viewport);
        let mut slow = brute_force::select_sections(&store, viewport);
        fast.sort();
        slow.sort();
        assert_eq!(fast, slow);
    }

    #[test]
    fn matches_brute_force_on_an_off_center_viewport() {
        let store = sample_store();
        let index = SectionIndex::build(&store);
        let viewport = Rect::new(600, -100, 1200, 400);

        let mut fast = index.select_sections(&store, viewport);
        let mut slow = brute_force::select_sections(&store, viewport);
        fast.sort();
        slow.sort();
        assert_eq!(fast, slow);
    }

    #[test]
    fn a_section_exactly_on_the_viewport_bottom_edge_is_excluded() {
        let store = sample_store();
        let index = SectionIndex::build(&store);
        // Section 0 runs along y=500; the viewport's right edge (x=500) cuts
        // through its x-span, and the viewport's bottom sits exactly at
        // y=500, which is an exclusive upper bound.
        let viewport = Rect::new(-100, 0, 500, 500);
        let sections = index.select_sections(&store, viewport);
        assert!(sections.iter().all(|s| s.decompose().0 != 0));
    }

    #[test]
    fn finds_section_whose_bounding_box_surrounds_the_viewport() {
        let store = sample_store();
        let index = SectionIndex::build(&store);
        // Entirely inside the long diagonal section's bounding box, with no
        // endpoint of that section inside it and no edge crossing through.
        let viewport = Rect::new(-100, -100, 100, 100);
        let sections = index.select_sections(&store, viewport);
        let (segment_index, _) = sections
            .iter()
            .map(|s| s.decompose())
            .find(|(segment_index, _)| *segment_index == 2)
            .expect("diagonal section should be selected");
        assert_eq!(segment_index, 2);
    }
}
