// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The painter: walks one normalized, screen-space section and plots it into
//! a [`PixelBuffer`], including thickness, outline and junction diamonds.

use schematic_geometry::{Color, Coord, Orientation, Point, Size};
use schematic_segments::RoadClass;

use crate::pixels::PixelBuffer;

/// Beyond this zoom factor, an outlined road class's outline is thinned and
/// eventually dropped, so the outline band does not swallow the fill at
/// extreme zoom-out.
const MAX_OUTLINE_ZOOM_FACTOR: i32 = 14;
/// Below this zoom factor, thickness is left at its default; above it,
/// thickness is gradually reduced so roads do not visually dominate a
/// zoomed-out view.
const REDUCTION_ZOOM_FACTOR: i32 = 1;

/// Road class thickness and outline thickness scaled for one frame's zoom
/// factor.
#[must_use]
pub fn scale_road_class(class: &RoadClass, zoom_factor: i32) -> RoadClass {
    let thickness = scale_thickness(class.thickness, zoom_factor);
    let outline_thickness = class
        .outline
        .map(|(thickness, _)| scale_outline_thickness(thickness, zoom_factor))
        .unwrap_or(0);
    match class.outline {
        Some((_, color)) if outline_thickness > 0 => {
            RoadClass::outlined(thickness, class.color, outline_thickness, color)
        }
        _ => RoadClass::solid(thickness, class.color),
    }
}

fn scale_thickness(default_thickness: Coord, zoom_factor: i32) -> Coord {
    if zoom_factor < 0 {
        (-zoom_factor + 1) * default_thickness
    } else if zoom_factor > REDUCTION_ZOOM_FACTOR {
        let reduction = (zoom_factor - REDUCTION_ZOOM_FACTOR) / 2;
        (default_thickness - reduction).max(1)
    } else {
        default_thickness
    }
}

fn scale_outline_thickness(default_thickness: Coord, zoom_factor: i32) -> Coord {
    if zoom_factor < 0 {
        -zoom_factor + 1
    } else if zoom_factor > MAX_OUTLINE_ZOOM_FACTOR {
        let reduction = zoom_factor - MAX_OUTLINE_ZOOM_FACTOR;
        (default_thickness - reduction).max(0)
    } else {
        default_thickness
    }
}

/// Road-class index below which sections are skipped, derived from the
/// current zoom factor so far-out views omit minor roads. `0` means no
/// filtering.
#[must_use]
pub fn road_class_filter(zoom_factor: i32, max_zoom_factor: i32, max_class_index: u8) -> u8 {
    let min_filter_zoom = max_zoom_factor - 2 * i32::from(max_class_index);
    if min_filter_zoom < zoom_factor {
        let num = i32::from(max_class_index) * (zoom_factor - min_filter_zoom);
        let denom = max_zoom_factor - min_filter_zoom;
        let filter = num.div_euclid(denom) + i32::from(num.rem_euclid(denom) > 0);
        filter.clamp(0, i32::from(max_class_index)) as u8
    } else {
        0
    }
}

/// A junction shape joining two consecutive sections of a polyline at their
/// shared endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JunctionShape {
    /// A rhombic outline-then-fill diamond.
    Diamond,
}

/// Which junction shape, if any, joins a section of `current` orientation to
/// a preceding section of `previous` orientation.
///
/// `None` covers both "no junction needed" (same-axis pairs, whose thickness
/// bands already overlap) and "first section of a polyline" (no previous
/// orientation to pair with).
#[must_use]
pub const fn junction_for(previous: Option<Orientation>, current: Orientation) -> Option<JunctionShape> {
    use Orientation::{Horizontal, InclinedHorizontal, InclinedVertical, Vertical};
    match previous {
        None => None,
        Some(Horizontal) => match current {
            Vertical | InclinedVertical => Some(JunctionShape::Diamond),
            _ => None,
        },
        Some(Vertical) => match current {
            InclinedHorizontal => Some(JunctionShape::Diamond),
            _ => None,
        },
        Some(InclinedHorizontal) => match current {
            InclinedVertical | InclinedHorizontal => Some(JunctionShape::Diamond),
            _ => None,
        },
        Some(InclinedVertical) => match current {
            InclinedVertical => Some(JunctionShape::Diamond),
            _ => None,
        },
    }
}

/// Plots normalized, screen-space sections into a [`PixelBuffer`], one
/// `draw_section` call per polyline section, in order, so junction diamonds
/// can reference the previous section's endpoint and orientation.
pub struct Painter {
    screen_width: Coord,
    screen_height: Coord,
    pixels: PixelBuffer,

    x0: Coord,
    y0: Coord,
    x1: Coord,
    y1: Coord,
    begin_offset: Coord,
    end_offset: Coord,
    outline_thickness: Coord,

    prev_begin: Option<Point>,
    prev_end: Option<Point>,
    prev_orientation: Option<Orientation>,
}

impl Painter {
    /// Creates a painter for a `device_size` pixel buffer, drawing within a
    /// `screen_size`-bounded area of it.
    #[must_use]
    pub fn new(device_size: Size, screen_size: Size, background: Color) -> Self {
        Self {
            screen_width: screen_size.width,
            screen_height: screen_size.height,
            pixels: PixelBuffer::new(device_size, background),
            x0: 0,
            y0: 0,
            x1: 0,
            y1: 0,
            begin_offset: 0,
            end_offset: 0,
            outline_thickness: 0,
            prev_begin: None,
            prev_end: None,
            prev_orientation: None,
        }
    }

    /// Draws one normalized, screen-space section with `road_class`'s
    /// thickness and color, plus an outline and junction if the class has
    /// one.
    pub fn draw_section(&mut self, begin: Point, end: Point, road_class: &RoadClass, orientation: Orientation) {
        self.pixels.set_color(road_class.color);
        self.x0 = begin.x;
        self.y0 = begin.y;
        self.x1 = end.x;
        self.y1 = end.y;

        let thickness = road_class.full_thickness();
        if thickness == 1 {
            self.begin_offset = 0;
            self.end_offset = 0;
            self.draw_line(orientation, PutPixel::Single);
        } else {
            self.begin_offset = -(thickness >> 1);
            self.end_offset = self.begin_offset + thickness;
            self.outline_thickness = road_class.outline_thickness();
            if road_class.has_outline() {
                let (_, outline_color) = road_class.outline.expect("has_outline implies Some");
                self.pixels.set_outline_color(outline_color);
                self.draw_line(orientation, PutPixel::ThickWithOutline);
            } else {
                self.draw_line(orientation, PutPixel::Thick);
            }
            self.draw_junction(orientation);
        }

        self.prev_begin = Some(begin);
        self.prev_end = Some(end);
        self.prev_orientation = Some(orientation);
    }

    fn draw_line(&mut self, orientation: Orientation, put: PutPixel) {
        match orientation {
            Orientation::Horizontal => {
                let y = self.y0;
                for x in self.x0..=self.x1 {
                    self.put(put, x, y);
                }
            }
            Orientation::Vertical => {
                let x = self.x0;
                for y in self.y0..=self.y1 {
                    self.put(put, x, y);
                }
            }
            Orientation::InclinedHorizontal | Orientation::InclinedVertical => {
                self.draw_inclined_line(put);
            }
        }
    }

    fn draw_inclined_line(&mut self, put: PutPixel) {
        // If the section starts off-screen and ends on-screen, walk from the
        // on-screen end outward: a Bresenham walk that starts outside the
        // clip tolerance can otherwise terminate before reaching the part
        // that is actually visible.
        if !self.is_on_screen(self.x0, self.y0) && self.is_on_screen(self.x1, self.y1) {
            core::mem::swap(&mut self.x0, &mut self.x1);
            core::mem::swap(&mut self.y0, &mut self.y1);
        }

        let (dx, xi) = if self.x0 < self.x1 {
            (self.x1 - self.x0, 1)
        } else {
            (self.x0 - self.x1, -1)
        };
        let (dy, yi) = if self.y0 < self.y1 {
            (self.y1 - self.y0, 1)
        } else {
            (self.y0 - self.y1, -1)
        };

        if dy < dx {
            self.draw_horz_inclined_line(dx, dy, xi, yi, put);
        } else {
            self.draw_vert_inclined_line(dx, dy, xi, yi, put);
        }
    }

    fn draw_horz_inclined_line(&mut self, dx: Coord, dy: Coord, xi: Coord, yi: Coord, put: PutPixel) {
        let dd = (dy - dx) << 1;
        let dp = dy << 1;
        let mut di = dp - dx;

        let mut x = self.x0;
        let mut y = self.y0;
        let x_end = calc_inclined_end_pos(self.x1, xi, self.screen_width, self.begin_offset, self.end_offset);

        if (xi > 0 && x < x_end) || (xi < 0 && x_end < x) {
            loop {
                self.put(put, x, y);
                x += xi;
                if di >= 0 {
                    y += yi;
                    di += dd;
                } else {
                    di += dp;
                }
                if x == x_end {
                    break;
                }
            }
        }
    }

    fn draw_vert_inclined_line(&mut self, dx: Coord, dy: Coord, xi: Coord, yi: Coord, put: PutPixel) {
        let dd = (dx - dy) << 1;
        let dp = dx << 1;
        let mut di = dp - dy;

        let mut x = self.x0;
        let mut y = self.y0;
        let y_end = calc_inclined_end_pos(self.y1, yi, self.screen_height, self.begin_offset, self.end_offset);

        if (yi > 0 && y < y_end) || (yi < 0 && y_end < y) {
            loop {
                self.put(put, x, y);
                y += yi;
                if di >= 0 {
                    x += xi;
                    di += dd;
                } else {
                    di += dp;
                }
                if y == y_end {
                    break;
                }
            }
        }
    }

    fn is_on_screen(&self, x: Coord, y: Coord) -> bool {
        (0..self.screen_width).contains(&x) && (0..self.screen_height).contains(&y)
    }

    fn put(&mut self, put: PutPixel, x: Coord, y: Coord) {
        match put {
            PutPixel::Single => self.pixels.put_pixel(x, y),
            PutPixel::SingleOutline => self.pixels.put_outline_pixel(x, y),
            PutPixel::Thick => self.put_thick(x, y, false),
            PutPixel::ThickWithOutline => self.put_thick(x, y, true),
        }
    }

    /// `x`/`y` is the point *perpendicular to* the thick axis: for a
    /// horizontal line this spreads a column of pixels around `y` at a given
    /// `x`; for a vertical line, a row around `x` at a given `y`. The caller
    /// picks the axis via `draw_line`'s orientation dispatch, so this single
    /// routine serves both horizontal and vertical thick pixels, spread
    /// along whichever of `x`/`y` is passed as the "along" coordinate and
    /// which as the "across" coordinate is decided by `draw_line` always
    /// calling `put` with `(x, y)` in screen order — so thickness spreads
    /// along `y` for horizontal lines and along `x` for vertical lines.
    fn put_thick(&mut self, x: Coord, y: Coord, with_outline: bool) {
        match self.current_major_axis() {
            Axis::Horizontal => self.put_thick_band(x, y, self.screen_height, with_outline, true),
            Axis::Vertical => self.put_thick_band(y, x, self.screen_width, with_outline, false),
        }
    }

    fn current_major_axis(&self) -> Axis {
        if self.y0 == self.y1 {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// Spreads a thickness band across coordinate `init_across` bounded by
    /// `screen_dim`, plotting at `along` held fixed. `horizontal` selects
    /// whether `(along, across)` or `(across, along)` is passed to the pixel
    /// buffer.
    fn put_thick_band(&mut self, along: Coord, init_across: Coord, screen_dim: Coord, with_outline: bool, horizontal: bool) {
        let raw_begin = init_across + self.begin_offset;
        let raw_end = init_across + self.end_offset;
        let begin = raw_begin.max(0);
        let end = raw_end.min(screen_dim);

        let end_first_outline = raw_begin + self.outline_thickness;
        let begin_second_outline = raw_end - self.outline_thickness;

        let mut across = begin;
        while across < end {
            let use_fill = !with_outline || (end_first_outline <= across && across < begin_second_outline);
            if horizontal {
                if use_fill {
                    self.pixels.put_pixel(along, across);
                } else {
                    self.pixels.put_outline_pixel(along, across);
                }
            } else if use_fill {
                self.pixels.put_pixel(across, along);
            } else {
                self.pixels.put_outline_pixel(across, along);
            }
            across += 1;
        }
    }

    fn draw_junction(&mut self, orientation: Orientation) {
        let Some(shape) = junction_for(self.prev_orientation, orientation) else {
            return;
        };
        let Some(junction) = self.find_junction_point() else {
            return;
        };
        match shape {
            JunctionShape::Diamond => self.draw_junction_diamond(junction),
        }
    }

    fn find_junction_point(&self) -> Option<Point> {
        let begin = Point::new(self.x0, self.y0);
        let end = Point::new(self.x1, self.y1);
        if self.prev_begin == Some(begin) || self.prev_end == Some(begin) {
            Some(begin)
        } else if self.prev_begin == Some(end) || self.prev_end == Some(end) {
            Some(end)
        } else {
            None
        }
    }

    fn draw_junction_diamond(&mut self, junction: Point) {
        let (jx, jy) = (junction.x, junction.y);
        let mut x0 = jx + self.begin_offset;
        let mut y0 = jy + self.begin_offset;
        let mut x1 = jx + self.end_offset - 1;
        let mut y1 = jy + self.end_offset - 1;

        let mut i = 0;
        while x0 != jx {
            let put = if i < self.outline_thickness {
                PutPixel::SingleOutline
            } else {
                PutPixel::Single
            };
            self.draw_right_inclined(x0, jy, jx, put);
            self.draw_left_inclined(jx, y0, x1, put);
            self.draw_right_inclined(jx, y1, x1, put);
            self.draw_left_inclined(x0, jy, jx, put);
            i += 1;
            x0 += 1;
            y0 += 1;
            x1 -= 1;
            y1 -= 1;
        }
    }

    fn draw_right_inclined(&mut self, x0: Coord, y0: Coord, x1: Coord, put: PutPixel) {
        let mut x = x0;
        let mut y = y0;
        while x <= x1 {
            self.put(put, x, y);
            x += 1;
            y -= 1;
        }
    }

    fn draw_left_inclined(&mut self, x0: Coord, y0: Coord, x1: Coord, put: PutPixel) {
        let mut x = x0;
        let mut y = y0;
        while x <= x1 {
            self.put(put, x, y);
            x += 1;
            y += 1;
        }
    }

    /// Finishes the frame: unwritten pixels become the background color,
    /// and the device-visible pixels are handed back in row-major order.
    #[must_use]
    pub fn finish(mut self) -> alloc::vec::Vec<Color> {
        self.pixels.fill_background();
        self.pixels.dump()
    }
}

#[derive(Clone, Copy)]
enum PutPixel {
    Single,
    SingleOutline,
    Thick,
    ThickWithOutline,
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Extends the trailing stop coordinate by `end_offset` so a thick inclined
/// band terminates squarely at the screen edge instead of sliced, but never
/// past `screen_dim + end_offset`/before `begin_offset`.
fn calc_inclined_end_pos(raw_end_pos: Coord, step: Coord, screen_dim: Coord, begin_offset: Coord, end_offset: Coord) -> Coord {
    if step > 0 {
        raw_end_pos.min(screen_dim + end_offset)
    } else {
        raw_end_pos.max(begin_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schematic_geometry::MAX_ROAD_CLASS_INDEX;

    #[test]
    fn junction_is_none_for_the_first_section() {
        assert_eq!(junction_for(None, Orientation::Horizontal), None);
    }

    #[test]
    fn junction_is_none_for_same_axis_pairs() {
        assert_eq!(
            junction_for(Some(Orientation::Horizontal), Orientation::Horizontal),
            None
        );
        assert_eq!(
            junction_for(Some(Orientation::Horizontal), Orientation::InclinedHorizontal),
            None
        );
    }

    #[test]
    fn junction_is_a_diamond_across_incompatible_axes() {
        assert_eq!(
            junction_for(Some(Orientation::Horizontal), Orientation::Vertical),
            Some(JunctionShape::Diamond)
        );
        assert_eq!(
            junction_for(Some(Orientation::InclinedHorizontal), Orientation::InclinedVertical),
            Some(JunctionShape::Diamond)
        );
    }

    #[test]
    fn thickness_grows_while_zoomed_in() {
        assert_eq!(scale_thickness(2, -2), 6);
    }

    #[test]
    fn thickness_shrinks_but_not_below_one_while_zoomed_out() {
        assert_eq!(scale_thickness(2, 1), 2);
        assert_eq!(scale_thickness(2, 5), 1);
    }

    #[test]
    fn outline_thickness_vanishes_past_the_max_outline_zoom_factor() {
        assert_eq!(scale_outline_thickness(1, 10), 1);
        assert_eq!(scale_outline_thickness(1, 15), 0);
    }

    #[test]
    fn road_class_filter_is_zero_within_the_unfiltered_zoom_range() {
        assert_eq!(road_class_filter(0, 22, MAX_ROAD_CLASS_INDEX), 0);
    }

    #[test]
    fn road_class_filter_grows_towards_the_max_class_at_the_widest_zoom() {
        assert_eq!(
            road_class_filter(22, 22, MAX_ROAD_CLASS_INDEX),
            MAX_ROAD_CLASS_INDEX
        );
    }

    #[test]
    fn draws_a_single_pixel_line_for_a_thickness_one_class() {
        let mut painter = Painter::new(Size::new(10, 10), Size::new(10, 10), Color::rgb(0, 0, 0));
        let class = RoadClass::solid(1, Color::rgb(255, 0, 0));
        painter.draw_section(Point::new(2, 5), Point::new(7, 5), &class, Orientation::Horizontal);
        let pixels = painter.finish();
        assert_eq!(pixels[5 * 10 + 2], Color::rgb(255, 0, 0));
        assert_eq!(pixels[5 * 10 + 7], Color::rgb(255, 0, 0));
        assert_eq!(pixels[5 * 10 + 1], Color::rgb(0, 0, 0));
    }

    #[test]
    fn draws_a_thick_vertical_band_centered_on_the_line() {
        let mut painter = Painter::new(Size::new(10, 10), Size::new(10, 10), Color::rgb(0, 0, 0));
        let class = RoadClass::solid(3, Color::rgb(0, 255, 0));
        painter.draw_section(Point::new(5, 2), Point::new(5, 7), &class, Orientation::Vertical);
        let pixels = painter.finish();
        for y in 2..=7 {
            for x in 4..=6 {
                assert_eq!(pixels[y * 10 + x], Color::rgb(0, 255, 0), "x={x} y={y}");
            }
        }
    }
}
