// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame orchestration: transforms each selected section from map space
//! to screen space for the current zoom factor, clips it, and hands it to
//! the [`Painter`].
//!
//! Zoom factor `0` is 1:1 map-to-screen; a positive zoom factor is
//! zoomed-out (map deltas are right-shifted down to screen pixels) and a
//! negative zoom factor would be zoomed-in (left-shifted up). The workspace
//! clamps zoom factor to `0..=MAX_ZOOM_FACTOR`, so the zoomed-in branch below
//! is unreachable in practice, but is implemented so the transform is total
//! over the type the rest of the reference pipeline defines it on.
//!
//! A zoomed-in transform clips in map space, before the magnifying
//! left-shift: shifting first could carry a section's coordinates outside
//! [`Coord`]'s range before clipping ever gets a chance to pull them back
//! in. A zoomed-out or unzoomed transform shifts (or copies) first and
//! clips in screen space, since shrinking can only ever move coordinates
//! towards the origin.

use alloc::vec::Vec;
use schematic_geometry::{Color, Coord, Orientation, Point, Rect, Size};
use schematic_segments::RoadClass;

use crate::clip::clip_section;
use crate::paint::{scale_road_class, Painter};

/// Renders one frame's worth of already-selected, road-class-ascending
/// sections into a device-sized pixel buffer.
///
/// `top_left` is the map-space point that lands at screen origin.
/// `sections` must be in ascending road-class order so higher classes draw
/// on top, matching [`schematic_segments::SegmentStore`]'s segment order.
#[must_use]
pub fn render_frame(
    device_size: Size,
    screen_size: Size,
    top_left: Point,
    zoom_factor: i32,
    background: Color,
    sections: impl IntoIterator<Item = (RoadClass, Point, Point)>,
) -> Vec<Color> {
    let mut painter = Painter::new(device_size, screen_size, background);
    let screen_rect = Rect::new(0, 0, screen_size.width, screen_size.height);

    for (road_class, begin, end) in sections {
        let scaled = scale_road_class(&road_class, zoom_factor);

        let Some((begin_screen, end_screen)) =
            place_section(begin, end, top_left, zoom_factor, screen_rect, scaled.full_thickness())
        else {
            continue;
        };

        let orientation = Orientation::classify(end_screen.x - begin_screen.x, end_screen.y - begin_screen.y);
        painter.draw_section(begin_screen, end_screen, &scaled, orientation);
    }

    painter.finish()
}

/// A section's clip tolerance is zero for horizontal and vertical sections;
/// an inclined section is allowed to stick out by half its thickness, since
/// the unclipped part is still covered once the thick line is drawn.
fn clip_tolerance(orientation: Orientation, full_thickness: Coord) -> Coord {
    match orientation {
        Orientation::Horizontal | Orientation::Vertical => 0,
        Orientation::InclinedHorizontal | Orientation::InclinedVertical => {
            if full_thickness > 1 {
                full_thickness >> 1
            } else {
                0
            }
        }
    }
}

/// Transforms and clips one section, returning its screen-space endpoints if
/// any part of it survives.
fn place_section(
    begin: Point,
    end: Point,
    top_left: Point,
    zoom_factor: i32,
    screen_rect: Rect,
    full_thickness: Coord,
) -> Option<(Point, Point)> {
    if zoom_factor < 0 {
        let shift = -zoom_factor;
        let map_rect = Rect::new(0, 0, screen_rect.right << shift, screen_rect.bottom << shift);
        let mut begin_map = Point::new(begin.x - top_left.x, begin.y - top_left.y);
        let mut end_map = Point::new(end.x - top_left.x, end.y - top_left.y);
        let orientation = Orientation::classify(end_map.x - begin_map.x, end_map.y - begin_map.y);
        let tolerance = clip_tolerance(orientation, full_thickness) << shift;
        if !clip_section(orientation, map_rect, tolerance, &mut begin_map, &mut end_map) {
            return None;
        }
        Some((
            Point::new(begin_map.x << shift, begin_map.y << shift),
            Point::new(end_map.x << shift, end_map.y << shift),
        ))
    } else {
        let shift = zoom_factor;
        let mut begin_screen = Point::new((begin.x - top_left.x) >> shift, (begin.y - top_left.y) >> shift);
        let mut end_screen = Point::new((end.x - top_left.x) >> shift, (end.y - top_left.y) >> shift);
        let orientation = Orientation::classify(end_screen.x - begin_screen.x, end_screen.y - begin_screen.y);
        let tolerance = clip_tolerance(orientation, full_thickness);
        if !clip_section(orientation, screen_rect, tolerance, &mut begin_screen, &mut end_screen) {
            return None;
        }
        Some((begin_screen, end_screen))
    }
}
