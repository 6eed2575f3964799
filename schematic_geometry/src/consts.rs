// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric constants shared across the workspace, ported from the reference
//! implementation's `beConsts.h`/`beConsts.cpp`.

use crate::{Color, Coord, Point};

/// Lower bound of the planar coordinate domain.
pub const MIN_COORD: Coord = Coord::MIN;
/// Upper bound of the planar coordinate domain.
pub const MAX_COORD: Coord = Coord::MAX;
/// Longest permitted axis span of a single section, chosen so that
/// `coord << zoom_factor` (zoom_factor up to 22) never overflows `BigCoord`
/// arithmetic performed on section endpoints.
pub const MAX_SECTION_LENGTH: Coord = MAX_COORD >> 2;

/// Smallest screen dimension (width or height) a view may have and still
/// produce a frame.
pub const MIN_SCREEN_DIM: Coord = 16;

/// Default viewport center used by `reset_view`.
pub const INIT_VIEWPORT_CENTER: Point = Point::new(29_000, 22_000);
/// Default zoom factor used by `reset_view`.
pub const INIT_ZOOM_FACTOR: i32 = 8;
/// Minimum allowed zoom factor (most zoomed in).
pub const MIN_ZOOM_FACTOR: i32 = 0;
/// Maximum allowed zoom factor (most zoomed out).
pub const MAX_ZOOM_FACTOR: i32 = 22;

/// Highest valid road-class index; classes are `0..=MAX_ROAD_CLASS_INDEX`.
pub const MAX_ROAD_CLASS_INDEX: u8 = 7;

/// Width in bits of the segment-index field shared by `point_pos_id` and
/// `section_id`.
pub const BITS_FOR_SEGMENT_ID: u32 = 16;
/// Largest representable segment index.
pub const MAX_SEGMENT_ID: u32 = (1 << BITS_FOR_SEGMENT_ID) - 1;
/// Width in bits of the section-index field of `section_id`.
pub const BITS_FOR_SECTION_ID: u32 = 16;
/// Largest representable section index within a segment.
pub const MAX_SECTION_ID: u32 = (1 << BITS_FOR_SECTION_ID) - 1;
/// Width in bits of the point-index field of `point_pos_id`.
pub const BITS_FOR_POINT_POS_ID: u32 = 16;
/// Largest representable point index within a segment.
pub const MAX_POINT_POS_ID: u32 = (1 << BITS_FOR_POINT_POS_ID) - 1;
/// Width in bits of the begin/end flag packed into `sect_pos_id`.
pub const BITS_FOR_IS_BEGIN_OR_END_FLAG: u32 = 1;
/// Width in bits of the interval-section-index field of `sect_pos_id`.
pub const BITS_FOR_INTERVAL_SECTION_ID: u32 = 31;
/// Largest representable interval-section index.
pub const MAX_INTERVAL_SECTION_ID: u32 = (1 << BITS_FOR_INTERVAL_SECTION_ID) - 1;

/// Default outline thickness applied to road classes that have an outline.
pub const OUTLINE_DEFAULT_THICKNESS: Coord = 1;

/// Background fill color, used for every pixel never explicitly written.
pub const BACKGROUND_COLOR: Color = Color::rgb(100, 100, 100);
/// Outline color drawn around thick sections and junction diamonds.
pub const OUTLINE_COLOR: Color = Color::rgb(255, 255, 255);

/// Per-road-class fill colors, indexed `0..=MAX_ROAD_CLASS_INDEX`, ported
/// verbatim from `beConsts.cpp`'s `RoadClassColors` table.
pub const ROAD_CLASS_COLORS: [Color; 8] = [
    Color::rgb(246, 242, 189),
    Color::rgb(192, 192, 192),
    Color::rgb(255, 255, 67),
    Color::rgb(244, 200, 0),
    Color::rgb(255, 166, 77),
    Color::rgb(240, 181, 14),
    Color::rgb(255, 128, 50),
    Color::rgb(205, 65, 25),
];
