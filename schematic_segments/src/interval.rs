// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interval-section generation: turning each real section into the one or
//! four axis-monotone bounding lines the interval trees index.

use alloc::vec::Vec;
use schematic_geometry::{Orientation, Point};

use crate::SectionId;

/// One axis-monotone bounding line of a section, belonging to either the
/// horizontal or the vertical interval tree.
///
/// `begin` and `end` are normalized so that the primary-axis coordinate of
/// `begin` is less than or equal to that of `end` (x for a horizontal
/// interval section, y for a vertical one).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalSection {
    /// The real section this bounding line belongs to.
    pub section_id: SectionId,
    /// [`Orientation::Horizontal`] or [`Orientation::Vertical`]; the
    /// inclined variants never appear here.
    pub orientation: Orientation,
    /// Primary-axis-minimal endpoint.
    pub begin: Point,
    /// Primary-axis-maximal endpoint.
    pub end: Point,
}

fn normalize_horizontal(mut begin: Point, mut end: Point) -> (Point, Point) {
    if end.x < begin.x {
        core::mem::swap(&mut begin, &mut end);
    }
    (begin, end)
}

fn normalize_vertical(mut begin: Point, mut end: Point) -> (Point, Point) {
    if end.y < begin.y {
        core::mem::swap(&mut begin, &mut end);
    }
    (begin, end)
}

/// Builds the interval sections for one real section between `begin` and
/// `end` (in either order), per the §3 rule: one interval section if the
/// real section is axis-aligned, four (the bounding rectangle's edges) if
/// it is inclined.
pub fn build_interval_sections(section_id: SectionId, begin: Point, end: Point) -> Vec<IntervalSection> {
    let dx = end.x - begin.x;
    let dy = end.y - begin.y;

    if dy == 0 {
        let (begin, end) = normalize_horizontal(begin, end);
        return alloc::vec![IntervalSection {
            section_id,
            orientation: Orientation::Horizontal,
            begin,
            end,
        }];
    }
    if dx == 0 {
        let (begin, end) = normalize_vertical(begin, end);
        return alloc::vec![IntervalSection {
            section_id,
            orientation: Orientation::Vertical,
            begin,
            end,
        }];
    }

    let min_x = begin.x.min(end.x);
    let max_x = begin.x.max(end.x);
    let min_y = begin.y.min(end.y);
    let max_y = begin.y.max(end.y);

    alloc::vec![
        IntervalSection {
            section_id,
            orientation: Orientation::Horizontal,
            begin: Point::new(min_x, min_y),
            end: Point::new(max_x, min_y),
        },
        IntervalSection {
            section_id,
            orientation: Orientation::Horizontal,
            begin: Point::new(min_x, max_y),
            end: Point::new(max_x, max_y),
        },
        IntervalSection {
            section_id,
            orientation: Orientation::Vertical,
            begin: Point::new(min_x, min_y),
            end: Point::new(min_x, max_y),
        },
        IntervalSection {
            section_id,
            orientation: Orientation::Vertical,
            begin: Point::new(max_x, min_y),
            end: Point::new(max_x, max_y),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid() -> SectionId {
        SectionId::compose(0, 0)
    }

    #[test]
    fn axis_horizontal_section_yields_one_interval_section() {
        let sections = build_interval_sections(sid(), Point::new(100, 50), Point::new(0, 50));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].orientation, Orientation::Horizontal);
        assert_eq!(sections[0].begin, Point::new(0, 50));
        assert_eq!(sections[0].end, Point::new(100, 50));
    }

    #[test]
    fn axis_vertical_section_yields_one_interval_section() {
        let sections = build_interval_sections(sid(), Point::new(10, 100), Point::new(10, 0));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].orientation, Orientation::Vertical);
        assert_eq!(sections[0].begin, Point::new(10, 0));
    }

    #[test]
    fn inclined_section_yields_four_bounding_edges() {
        let sections = build_interval_sections(sid(), Point::new(0, 0), Point::new(600, 500));
        assert_eq!(sections.len(), 4);
        let horz = sections
            .iter()
            .filter(|s| s.orientation == Orientation::Horizontal)
            .count();
        let vert = sections
            .iter()
            .filter(|s| s.orientation == Orientation::Vertical)
            .count();
        assert_eq!(horz, 2);
        assert_eq!(vert, 2);
        for section in &sections {
            assert!(section.begin.x <= section.end.x || section.begin.y <= section.end.y);
        }
    }
}
