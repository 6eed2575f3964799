// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clips a normalized section against a rectangle, with a tolerance band so
//! a section that barely misses is still drawn rather than silently
//! dropped.

use schematic_geometry::{is_odd, Coord, Orientation, Point, Rect, MAX_COORD, MIN_COORD};

/// How far outside `clip_rect` a section is still caught and clamped back in,
/// rather than rejected, while searching for a split point or bisecting
/// towards an inside anchor.
const CATCH_TOLERANCE: Coord = 16;
/// Once two successive split-point candidates land within this distance of
/// each other, the bisection in [`find_split_point`] gives up and declares
/// the section not visible.
const SPLIT_POINT_TOLERANCE: Coord = 2;

/// Clips `(begin, end)` in place against `rect`, expanded by
/// `extra_tolerance` on every side.
///
/// Returns whether the section (or some part of it, for an inclined
/// section) survives; if `false`, `begin`/`end` are left in an unspecified
/// state and should not be drawn.
///
/// `begin` and `end` must already be lexicographically normalized
/// (`begin <= end` by x then y), matching the normalization
/// [`schematic_segments::SegmentStore`] applies when it stores a segment's
/// points.
pub fn clip_section(
    orientation: Orientation,
    rect: Rect,
    extra_tolerance: Coord,
    begin: &mut Point,
    end: &mut Point,
) -> bool {
    let mut clipper = Clipper::new(rect, extra_tolerance);
    let result = match orientation {
        Orientation::Horizontal => clipper.clip_horizontal(begin, end),
        Orientation::Vertical => clipper.clip_vertical(begin, end),
        Orientation::InclinedHorizontal | Orientation::InclinedVertical => {
            clipper.clip_inclined(begin, end)
        }
    };
    if result && matches!(orientation, Orientation::InclinedHorizontal | Orientation::InclinedVertical) && !is_normalized(*begin, *end) {
        core::mem::swap(begin, end);
    }
    result
}

fn is_normalized(begin: Point, end: Point) -> bool {
    (begin.x < end.x) || (begin.x == end.x && begin.y <= end.y)
}

struct Clipper {
    clip_rect: Rect,
    catch_rect: Rect,
    rest_flag_x: bool,
    rest_flag_y: bool,
}

impl Clipper {
    fn new(rect: Rect, extra_tolerance: Coord) -> Self {
        let clip_rect = expand_rect(rect, extra_tolerance);
        let catch_rect = expand_rect(clip_rect, CATCH_TOLERANCE);
        Self {
            clip_rect,
            catch_rect,
            rest_flag_x: false,
            rest_flag_y: false,
        }
    }

    fn clip_horizontal(&mut self, begin: &mut Point, end: &mut Point) -> bool {
        let inside = self.clip_rect.top <= begin.y && begin.y <= self.clip_rect.bottom;
        if inside {
            clamp_coord(self.clip_rect.left, self.clip_rect.right, &mut begin.x);
            clamp_coord(self.clip_rect.left, self.clip_rect.right, &mut end.x);
        }
        inside
    }

    fn clip_vertical(&mut self, begin: &mut Point, end: &mut Point) -> bool {
        let inside = self.clip_rect.left <= begin.x && begin.x <= self.clip_rect.right;
        if inside {
            clamp_coord(self.clip_rect.top, self.clip_rect.bottom, &mut begin.y);
            clamp_coord(self.clip_rect.top, self.clip_rect.bottom, &mut end.y);
        }
        inside
    }

    fn clip_inclined(&mut self, begin: &mut Point, end: &mut Point) -> bool {
        let begin_inside = self.clip_rect.contains(*begin);
        let end_inside = self.clip_rect.contains(*end);

        if begin_inside && end_inside {
            return true;
        }
        if begin_inside {
            *end = self.clip(*begin, *end);
            return true;
        }
        if end_inside {
            *begin = self.clip(*end, *begin);
            return true;
        }

        match self.find_split_point(*begin, *end) {
            Some(split) => {
                let new_end = self.clip(split, *end);
                let new_begin = self.clip(split, *begin);
                *begin = new_begin;
                *end = new_end;
                true
            }
            None => false,
        }
    }

    /// Bisects `(begin, end)` looking for a point inside `clip_rect`,
    /// pushing whichever endpoint is outside towards the center each round.
    /// Declares no split point found once successive candidates stop making
    /// progress, within [`SPLIT_POINT_TOLERANCE`].
    fn find_split_point(&mut self, mut begin: Point, mut end: Point) -> Option<Point> {
        debug_assert!(!self.rest_flag_x && !self.rest_flag_y, "rest flags must be cleared before a fresh search");
        debug_assert!(begin.x < end.x, "caller must pass a normalized, non-degenerate section");
        let vert_growing = begin.y < end.y;

        let mut prev = Point::new(MAX_COORD, MAX_COORD);
        loop {
            let split = self.calc_center(begin, end);

            if split.x < self.clip_rect.left {
                begin = split;
            } else if self.clip_rect.right < split.x {
                end = split;
            } else if split.y < self.clip_rect.top {
                if vert_growing {
                    begin = split;
                } else {
                    end = split;
                }
            } else if self.clip_rect.bottom < split.y {
                if vert_growing {
                    end = split;
                } else {
                    begin = split;
                }
            } else {
                debug_assert!(self.clip_rect.contains(split));
                return Some(split);
            }

            if (split.x - prev.x).abs() <= SPLIT_POINT_TOLERANCE
                && (split.y - prev.y).abs() <= SPLIT_POINT_TOLERANCE
            {
                return None;
            }
            prev = split;
        }
    }

    /// Bisects `newEnd` towards `anchor` (known inside `clip_rect`) until it
    /// lands within `catch_rect`.
    fn clip(&mut self, anchor: Point, moving: Point) -> Point {
        self.rest_flag_x = false;
        self.rest_flag_y = false;

        let mut temp_begin = anchor;
        let mut new_end = moving;
        while !self.catch_rect.contains(new_end) {
            let middle = self.calc_center(temp_begin, new_end);
            if self.clip_rect.contains(middle) && !self.clip_rect.is_on_edge(middle) {
                temp_begin = middle;
            } else {
                new_end = middle;
            }
        }
        new_end
    }

    fn calc_center(&mut self, begin: Point, end: Point) -> Point {
        Point::new(
            calc_center_coord(begin.x, end.x, &mut self.rest_flag_x),
            calc_center_coord(begin.y, end.y, &mut self.rest_flag_y),
        )
    }
}

/// Midpoint of `begin..end`, alternating which odd-length bisection rounds
/// up versus down so repeated bisection along one axis does not bias
/// towards one side.
fn calc_center_coord(begin: Coord, end: Coord, rest_flag: &mut bool) -> Coord {
    let diff = end - begin;
    let mut complementation = 0;
    if is_odd(diff) {
        if *rest_flag {
            *rest_flag = false;
            complementation = 1;
        } else {
            *rest_flag = true;
        }
    }
    begin + (diff >> 1) + complementation
}

fn clamp_coord(min_pos: Coord, max_pos: Coord, coord: &mut Coord) {
    if *coord < min_pos {
        *coord = min_pos;
    } else if max_pos < *coord {
        *coord = max_pos;
    }
}

fn expand_rect(rect: Rect, tolerance: Coord) -> Rect {
    let left = if MIN_COORD + tolerance < rect.left {
        rect.left - tolerance
    } else {
        MIN_COORD
    };
    let top = if MIN_COORD + tolerance < rect.top {
        rect.top - tolerance
    } else {
        MIN_COORD
    };
    let right = if rect.right < MAX_COORD - tolerance {
        rect.right + tolerance
    } else {
        MAX_COORD
    };
    let bottom = if rect.bottom < MAX_COORD - tolerance {
        rect.bottom + tolerance
    } else {
        MAX_COORD
    };
    Rect::new_unchecked(left, top, right, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_section_clamps_x_when_y_is_in_band() {
        let mut begin = Point::new(-100, 50);
        let mut end = Point::new(500, 50);
        let kept = clip_section(
            Orientation::Horizontal,
            Rect::new(0, 0, 200, 200),
            0,
            &mut begin,
            &mut end,
        );
        assert!(kept);
        assert_eq!(begin, Point::new(0, 50));
        assert_eq!(end, Point::new(200, 50));
    }

    #[test]
    fn horizontal_section_outside_the_band_is_rejected() {
        let mut begin = Point::new(-100, 500);
        let mut end = Point::new(500, 500);
        let kept = clip_section(
            Orientation::Horizontal,
            Rect::new(0, 0, 200, 200),
            0,
            &mut begin,
            &mut end,
        );
        assert!(!kept);
    }

    #[test]
    fn vertical_section_clamps_y_when_x_is_in_band() {
        let mut begin = Point::new(50, -100);
        let mut end = Point::new(50, 500);
        let kept = clip_section(
            Orientation::Vertical,
            Rect::new(0, 0, 200, 200),
            0,
            &mut begin,
            &mut end,
        );
        assert!(kept);
        assert_eq!(begin, Point::new(50, 0));
        assert_eq!(end, Point::new(50, 200));
    }

    #[test]
    fn inclined_section_fully_inside_is_unchanged() {
        let mut begin = Point::new(10, 10);
        let mut end = Point::new(20, 30);
        let kept = clip_section(
            Orientation::InclinedVertical,
            Rect::new(0, 0, 200, 200),
            0,
            &mut begin,
            &mut end,
        );
        assert!(kept);
        assert_eq!(begin, Point::new(10, 10));
        assert_eq!(end, Point::new(20, 30));
    }

    #[test]
    fn inclined_section_with_one_endpoint_outside_clips_to_the_rect() {
        let mut begin = Point::new(50, 50);
        let mut end = Point::new(1000, 1000);
        let kept = clip_section(
            Orientation::InclinedHorizontal,
            Rect::new(0, 0, 200, 200),
            0,
            &mut begin,
            &mut end,
        );
        assert!(kept);
        assert!(begin.x <= 200 + CATCH_TOLERANCE && begin.y <= 200 + CATCH_TOLERANCE);
        assert!(end.x <= 200 + CATCH_TOLERANCE && end.y <= 200 + CATCH_TOLERANCE);
    }

    #[test]
    fn inclined_section_entirely_outside_the_bounding_diagonal_is_rejected() {
        let mut begin = Point::new(-1000, 500);
        let mut end = Point::new(-500, 1000);
        let kept = clip_section(
            Orientation::InclinedVertical,
            Rect::new(0, 0, 200, 200),
            0,
            &mut begin,
            &mut end,
        );
        assert!(!kept);
    }

    #[test]
    fn inclined_section_straddling_the_rect_clips_both_ends() {
        let mut begin = Point::new(-1000, 100);
        let mut end = Point::new(1000, 100);
        let kept = clip_section(
            Orientation::InclinedHorizontal,
            Rect::new(0, 0, 200, 200),
            0,
            &mut begin,
            &mut end,
        );
        assert!(kept);
        assert!(begin.x <= end.x);
    }
}
