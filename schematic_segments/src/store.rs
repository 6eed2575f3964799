// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The segment store: owns every polyline, assigns stable bit-packed
//! identifiers, and derives the interval sections the index crate builds
//! its trees over.

use alloc::vec::Vec;
use schematic_geometry::{Orientation, Point, MAX_SECTION_LENGTH, MAX_SEGMENT_ID};

use crate::{
    build_interval_sections, IntervalSection, PointPosId, RawSegment, RoadClassTable, SectPosId,
    SectionId, SegmentStoreError,
};

/// A point within a [`Segment`], carrying its stable identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointPos {
    /// The point's coordinates.
    pub point: Point,
    /// This point's stable identifier.
    pub id: PointPosId,
}

/// One polyline, after ingest: a road class plus a sequence of identified
/// points. Segments never mutate after [`SegmentStore::init`] returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Road class index.
    pub road_class: u8,
    /// Ordered, identified polyline vertices.
    pub points: Vec<PointPos>,
}

impl Segment {
    /// Number of sections (`points.len() - 1`) in this segment.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// An endpoint of an interval section, as returned by the lookup methods the
/// interval tree builder consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionPos {
    /// The endpoint's coordinates.
    pub point: Point,
    /// This endpoint's stable identifier.
    pub id: SectPosId,
    /// The real section this endpoint's interval section belongs to.
    pub section_id: SectionId,
    /// Orientation of the owning interval section.
    pub orientation: Orientation,
}

/// Owns every [`Segment`] and the interval sections derived from them.
///
/// Immutable once built: `init` is the only way to populate a store, and
/// every other method is a read-only lookup.
#[derive(Clone, Debug)]
pub struct SegmentStore {
    segments: Vec<Segment>,
    interval_sections: Vec<IntervalSection>,
    road_classes: RoadClassTable,
}

impl SegmentStore {
    /// Largest number of segments a `point_pos_id`/`section_id` can address.
    #[must_use]
    pub const fn max_segment_count() -> usize {
        (MAX_SEGMENT_ID + 1) as usize
    }

    /// Builds a store from raw, order-preserving-within-class polylines.
    ///
    /// Sorts by road class ascending (stable, so segments of equal class
    /// keep their relative input order) and renumbers segment indices to
    /// match, so that later during rasterization iterating segments in
    /// storage order also iterates them in ascending road-class order and
    /// higher classes draw last, on top.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentStoreError`] if a road class is out of range, a
    /// segment has fewer than two points after duplicate collapsing, a
    /// section's axis span exceeds [`MAX_SECTION_LENGTH`], or there are more
    /// segments than a 16-bit index can address.
    pub fn init(raw_segments: Vec<RawSegment>) -> Result<Self, SegmentStoreError> {
        if raw_segments.len() > Self::max_segment_count() {
            return Err(SegmentStoreError::TooManySegments);
        }

        let mut ordered: Vec<(usize, RawSegment)> = raw_segments.into_iter().enumerate().collect();
        ordered.sort_by_key(|(_, segment)| segment.road_class);

        let mut segments = Vec::with_capacity(ordered.len());
        let mut interval_sections = Vec::new();

        for (segment_index, (original_index, raw)) in ordered.into_iter().enumerate() {
            if raw.road_class > schematic_geometry::MAX_ROAD_CLASS_INDEX {
                return Err(SegmentStoreError::RoadClassOutOfRange {
                    segment_index: original_index,
                    road_class: raw.road_class,
                });
            }
            if raw.points.len() < 2 {
                return Err(SegmentStoreError::TooFewPoints {
                    segment_index: original_index,
                });
            }

            let points: Vec<PointPos> = raw
                .points
                .iter()
                .enumerate()
                .map(|(point_index, point)| PointPos {
                    point: *point,
                    id: PointPosId::compose(segment_index as u32, point_index as u32),
                })
                .collect();

            for (section_index, pair) in points.windows(2).enumerate() {
                let begin = pair[0].point;
                let end = pair[1].point;
                if (begin.x - end.x).unsigned_abs() >= MAX_SECTION_LENGTH as u32
                    || (begin.y - end.y).unsigned_abs() >= MAX_SECTION_LENGTH as u32
                {
                    return Err(SegmentStoreError::SectionTooLong {
                        segment_index: original_index,
                    });
                }
                let section_id = SectionId::compose(segment_index as u32, section_index as u32);
                interval_sections.extend(build_interval_sections(section_id, begin, end));
            }

            segments.push(Segment {
                road_class: raw.road_class,
                points,
            });
        }

        Ok(Self {
            segments,
            interval_sections,
            road_classes: RoadClassTable::default(),
        })
    }

    /// Every segment, in ascending road-class order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The road-class policy table.
    #[must_use]
    pub fn road_classes(&self) -> &RoadClassTable {
        &self.road_classes
    }

    /// Every interval section of the given orientation, as the pair of
    /// `SectionPos` endpoints the interval tree builder indexes.
    ///
    /// `orientation` must be [`Orientation::Horizontal`] or
    /// [`Orientation::Vertical`]; inclined orientations yield no sections
    /// since interval sections are always axis-aligned.
    #[must_use]
    pub fn get_sect_positions(&self, orientation: Orientation) -> Vec<SectionPos> {
        let mut result = Vec::new();
        for (index, interval_section) in self.interval_sections.iter().enumerate() {
            if interval_section.orientation != orientation {
                continue;
            }
            let index = index as u32;
            result.push(SectionPos {
                point: interval_section.begin,
                id: SectPosId::compose(index, false),
                section_id: interval_section.section_id,
                orientation,
            });
            result.push(SectionPos {
                point: interval_section.end,
                id: SectPosId::compose(index, true),
                section_id: interval_section.section_id,
                orientation,
            });
        }
        result
    }

    /// Every vertex of every segment, as the flat point set the range tree
    /// is built over.
    #[must_use]
    pub fn get_point_positions(&self) -> Vec<PointPos> {
        self.segments
            .iter()
            .flat_map(|segment| segment.points.iter().copied())
            .collect()
    }

    /// Looks up `(road_class, begin, end)` for a real section.
    ///
    /// # Panics
    ///
    /// Panics if `section_id` does not address a live segment/section.
    #[must_use]
    pub fn get_section(&self, section_id: SectionId) -> (u8, Point, Point) {
        let (segment_index, section_index) = section_id.decompose();
        let segment = &self.segments[segment_index as usize];
        let begin = segment.points[section_index as usize].point;
        let end = segment.points[section_index as usize + 1].point;
        (segment.road_class, begin, end)
    }

    /// The begin endpoint of the interval section at `interval_section_index`.
    #[must_use]
    pub fn get_section_begin_pos(&self, interval_section_index: u32) -> SectionPos {
        self.section_pos_at(interval_section_index, false)
    }

    /// The end endpoint of the interval section at `interval_section_index`.
    #[must_use]
    pub fn get_section_end_pos(&self, interval_section_index: u32) -> SectionPos {
        self.section_pos_at(interval_section_index, true)
    }

    fn section_pos_at(&self, interval_section_index: u32, is_end: bool) -> SectionPos {
        let interval_section = &self.interval_sections[interval_section_index as usize];
        let point = if is_end {
            interval_section.end
        } else {
            interval_section.begin
        };
        SectionPos {
            point,
            id: SectPosId::compose(interval_section_index, is_end),
            section_id: interval_section.section_id,
            orientation: interval_section.orientation,
        }
    }

    /// The bottom-right corner of the bounding box of the real section that
    /// owns `sect_pos_id`'s interval section. Used by the interval tree's
    /// cross-section test.
    #[must_use]
    pub fn get_section_cross_point(&self, sect_pos_id: SectPosId) -> Point {
        let interval_section_index = sect_pos_id.interval_section_index();
        let section_id = self.interval_sections[interval_section_index as usize].section_id;
        let (_, begin, end) = self.get_section(section_id);
        Point::new(begin.x.max(end.x), begin.y.max(end.y))
    }

    /// Unions the vertex-query and interval-section-query partial results
    /// into a sorted, deduplicated list of section ids.
    ///
    /// Every point id contributes both sections incident to it (the section
    /// ending at that point and the one beginning there, whichever exist);
    /// every sect-pos id contributes the real section it belongs to.
    #[must_use]
    pub fn prepare_sections(&self, point_ids: &[PointPosId], sect_pos_ids: &[SectPosId]) -> Vec<SectionId> {
        let mut sections = Vec::with_capacity(point_ids.len() * 2 + sect_pos_ids.len());

        for &point_id in point_ids {
            let (segment_index, point_index) = point_id.decompose();
            if point_index > 0 {
                sections.push(SectionId::compose(segment_index, point_index - 1));
            }
            let segment = &self.segments[segment_index as usize];
            if (point_index as usize) < segment.section_count() {
                sections.push(SectionId::compose(segment_index, point_index));
            }
        }

        for &sect_pos_id in sect_pos_ids {
            let interval_section_index = sect_pos_id.interval_section_index();
            sections.push(self.interval_sections[interval_section_index as usize].section_id);
        }

        sections.sort();
        sections.dedup();
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> SegmentStore {
        SegmentStore::init(alloc::vec![
            RawSegment::new(0, [Point::new(0, 100), Point::new(300, 100)]),
            RawSegment::new(1, [Point::new(100, 0), Point::new(100, 300)]),
        ])
        .unwrap()
    }

    #[test]
    fn init_sorts_by_road_class_ascending() {
        let store = SegmentStore::init(alloc::vec![
            RawSegment::new(3, [Point::new(0, 0), Point::new(1, 0)]),
            RawSegment::new(1, [Point::new(0, 0), Point::new(1, 0)]),
        ])
        .unwrap();
        assert_eq!(store.segments()[0].road_class, 1);
        assert_eq!(store.segments()[1].road_class, 3);
    }

    #[test]
    fn rejects_out_of_range_road_class() {
        let err = SegmentStore::init(alloc::vec![RawSegment::new(
            8,
            [Point::new(0, 0), Point::new(1, 0)]
        )])
        .unwrap_err();
        assert_eq!(
            err,
            SegmentStoreError::RoadClassOutOfRange {
                segment_index: 0,
                road_class: 8
            }
        );
    }

    #[test]
    fn rejects_single_point_segment() {
        let err = SegmentStore::init(alloc::vec![RawSegment::new(0, [Point::new(0, 0)])]).unwrap_err();
        assert_eq!(err, SegmentStoreError::TooFewPoints { segment_index: 0 });
    }

    #[test]
    fn get_section_cross_point_is_bounding_box_bottom_right() {
        let store = SegmentStore::init(alloc::vec![RawSegment::new(
            0,
            [Point::new(0, 0), Point::new(600, 500)]
        )])
        .unwrap();
        let horz = store.get_sect_positions(Orientation::Horizontal);
        let begin_id = horz[0].id;
        assert_eq!(store.get_section_cross_point(begin_id), Point::new(600, 500));
    }

    #[test]
    fn prepare_sections_includes_both_sections_incident_to_a_point() {
        let store = SegmentStore::init(alloc::vec![RawSegment::new(
            0,
            [Point::new(0, 0), Point::new(100, 0), Point::new(100, 100)]
        )])
        .unwrap();
        let middle_point = store.segments()[0].points[1].id;
        let sections = store.prepare_sections(&[middle_point], &[]);
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn sibling_lookup_round_trips_begin_and_end() {
        let store = sample_store();
        let begin = store.get_section_begin_pos(0);
        let end = store.get_section_end_pos(0);
        assert_eq!(begin.id.sibling(), end.id);
    }
}
