// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer-exact pan/zoom state.
//!
//! Every move or zoom updates a `BigPoint` center and narrows it down to a
//! viewport [`Rect`] only when asked for one, so a long chain of moves at a
//! coarse zoom factor never loses precision to repeated rounding.

use alloc::string::String;
use alloc::string::ToString;
use schematic_geometry::{
    BigPoint, BigRect, BigSize, Coord, Direction, Point, Rect, Size, INIT_VIEWPORT_CENTER,
    INIT_ZOOM_FACTOR, MAX_COORD, MAX_ZOOM_FACTOR, MIN_COORD, MIN_SCREEN_DIM, MIN_ZOOM_FACTOR,
};

/// Width in bits of a [`Coord`], the shift `calc_screen_size` has to stay
/// under so a fully zoomed-in screen dimension cap never overflows.
const COORD_BITS: i32 = Coord::BITS as i32;

const fn max_viewport_rect() -> BigRect {
    BigRect::new(
        MIN_COORD as i64,
        MIN_COORD as i64,
        MAX_COORD as i64,
        MAX_COORD as i64,
    )
}

/// A requested move of the viewport center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Recenter the viewport on a screen-space point.
    ToPoint(Point),
    /// Shift the viewport by half a screen in a compass direction.
    InDirection(Direction),
    /// Shift the viewport by an explicit screen-space delta.
    ByDelta(Size),
}

/// Whether a zoom request zooms in (towards `MIN_ZOOM_FACTOR`) or out
/// (towards `MAX_ZOOM_FACTOR`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoomKind {
    /// Decrease the zoom factor, magnifying the map.
    In,
    /// Increase the zoom factor, shrinking the map.
    Out,
}

/// A requested zoom change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Zoom {
    /// Direction of the zoom change.
    pub kind: ZoomKind,
    /// Number of zoom-factor steps to move by.
    pub steps: i32,
    /// If set, the screen point that should stay under the cursor: the
    /// center is shifted so this point's screen position is unchanged by
    /// the zoom.
    pub anchor: Option<Point>,
}

/// Integer-exact viewport pan/zoom state for one open map view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Controller {
    viewport_center: BigPoint,
    device_size: Size,
    screen_size: Size,
    zoom_factor: i32,
}

impl Controller {
    /// Creates a controller at the default center and zoom, sized for
    /// `device_size`.
    #[must_use]
    pub fn new(device_size: Size) -> Self {
        let zoom_factor = INIT_ZOOM_FACTOR;
        Self {
            viewport_center: BigPoint::from(INIT_VIEWPORT_CENTER),
            device_size,
            screen_size: calc_screen_size(device_size, zoom_factor),
            zoom_factor,
        }
    }

    /// The current zoom factor, `0..=22`; `0` is most zoomed in.
    #[must_use]
    pub const fn zoom_factor(&self) -> i32 {
        self.zoom_factor
    }

    /// The screen dimensions actually used for rendering, capped by
    /// `device_size` and by how much map fits on screen at the current zoom.
    #[must_use]
    pub const fn screen_size(&self) -> Size {
        self.screen_size
    }

    /// The viewport rectangle in map coordinates at the current center,
    /// screen size and zoom factor, clamped to the representable coordinate
    /// domain.
    #[must_use]
    pub fn viewport_rect(&self) -> Rect {
        calc_viewport_rect(self.viewport_center, self.screen_size, self.zoom_factor)
    }

    /// Whether the current screen size is large enough to produce a frame.
    #[must_use]
    pub const fn can_generate_contents(&self) -> bool {
        self.screen_size.width >= MIN_SCREEN_DIM && self.screen_size.height >= MIN_SCREEN_DIM
    }

    /// Resizes the device surface, recomputing the screen size at the
    /// current zoom factor. Returns whether the screen size changed.
    pub fn set_device_size(&mut self, device_size: Size) -> bool {
        self.device_size = device_size;
        let screen_size = calc_screen_size(device_size, self.zoom_factor);
        let changed = screen_size != self.screen_size;
        self.screen_size = screen_size;
        changed
    }

    /// Applies a pan, clipping the resulting center so the viewport stays
    /// within the representable coordinate domain.
    pub fn move_view(&mut self, request: Move) {
        let half = half_extent(self.screen_size, self.zoom_factor);
        let screen_delta = match request {
            Move::ToPoint(point) => {
                let center = screen_center(self.screen_size);
                Size::new(point.x - center.x, point.y - center.y)
            }
            Move::InDirection(direction) => half_screen_delta(self.screen_size, direction),
            Move::ByDelta(delta) => delta,
        };
        let map_delta = BigPoint::new(
            (screen_delta.width as i64) << self.zoom_factor,
            (screen_delta.height as i64) << self.zoom_factor,
        );
        let candidate = BigPoint::new(
            self.viewport_center.x + map_delta.x,
            self.viewport_center.y + map_delta.y,
        );
        self.viewport_center = correct_point(candidate, half, max_viewport_rect());
    }

    /// Applies a zoom change. Zooming in clamps at `MIN_ZOOM_FACTOR`,
    /// zooming out at `MAX_ZOOM_FACTOR`.
    ///
    /// An anchored zoom (`request.anchor.is_some()`) keeps that screen
    /// point's map location fixed, the way a scroll-wheel zoom anchors on
    /// the cursor. A zoom in place is additionally clipped to the viewport
    /// rectangle as it stood before the zoom, instead of the full coordinate
    /// domain, so zooming in never reveals map outside what was already on
    /// screen before the gesture started.
    ///
    /// An un-anchored zoom-out leaves the center untouched: there is no
    /// natural point to recenter on, so the viewport simply grows around
    /// its current center.
    pub fn zoom(&mut self, request: Zoom) {
        let previous_viewport = self.viewport_rect();
        let old_zoom = self.zoom_factor;
        let new_zoom = match request.kind {
            ZoomKind::In => (old_zoom - request.steps).max(MIN_ZOOM_FACTOR),
            ZoomKind::Out => (old_zoom + request.steps).min(MAX_ZOOM_FACTOR),
        };

        let map_delta = match request.anchor {
            Some(focus) => calc_anchored_delta(self.screen_size, old_zoom, new_zoom, focus),
            // With no anchor point, a zoom-in recenters on the same point it
            // already had: nothing to correct for.
            None => BigPoint::default(),
        };

        self.zoom_factor = new_zoom;
        self.screen_size = calc_screen_size(self.device_size, new_zoom);

        let candidate = BigPoint::new(
            self.viewport_center.x + map_delta.x,
            self.viewport_center.y + map_delta.y,
        );
        let half = half_extent(self.screen_size, new_zoom);
        let bounds = if request.anchor.is_some() && matches!(request.kind, ZoomKind::In) {
            BigRect::from(previous_viewport)
        } else {
            max_viewport_rect()
        };
        self.viewport_center = correct_point(candidate, half, bounds);
    }

    /// Restores a previously saved `(center, zoom_factor)` pair, such as one
    /// decoded from the `"cx cy zoom"` view-state serialization. The zoom
    /// factor is clamped to the valid range and the center to the
    /// coordinate domain, the same as any other zoom or move.
    pub fn restore(&mut self, center: Point, zoom_factor: i32) {
        self.zoom_factor = zoom_factor.clamp(MIN_ZOOM_FACTOR, MAX_ZOOM_FACTOR);
        self.screen_size = calc_screen_size(self.device_size, self.zoom_factor);
        let half = half_extent(self.screen_size, self.zoom_factor);
        self.viewport_center = correct_point(BigPoint::from(center), half, max_viewport_rect());
    }

    /// Restores the default center, zoom factor and screen size.
    pub fn reset_view(&mut self) {
        self.zoom_factor = INIT_ZOOM_FACTOR;
        self.viewport_center = BigPoint::from(INIT_VIEWPORT_CENTER);
        self.screen_size = calc_screen_size(self.device_size, self.zoom_factor);
    }

    /// A fixed descriptor of this controller's parameter letters, as used by
    /// diagnostic dumps: left, top, right, bottom and zoom, each paired with
    /// its current-value label.
    #[must_use]
    pub fn params_description(&self) -> String {
        "l L t T r R b B zoom Z".to_string()
    }
}

fn screen_center(screen_size: Size) -> Point {
    Point::new(screen_size.width / 2, screen_size.height / 2)
}

fn half_screen_delta(screen_size: Size, direction: Direction) -> Size {
    match direction {
        Direction::North => Size::new(0, -(screen_size.height / 2)),
        Direction::South => Size::new(0, screen_size.height / 2),
        Direction::East => Size::new(screen_size.width / 2, 0),
        Direction::West => Size::new(-(screen_size.width / 2), 0),
    }
}

fn half_extent(screen_size: Size, zoom_factor: i32) -> BigSize {
    BigSize::new(
        ((screen_size.width as i64) << zoom_factor) / 2,
        ((screen_size.height as i64) << zoom_factor) / 2,
    )
}

/// The screen dimensions a view can actually use: the device surface size,
/// capped so the map covered by the screen never exceeds the representable
/// coordinate domain at the given zoom factor.
fn calc_screen_size(device_size: Size, zoom_factor: i32) -> Size {
    let cap = 1i64 << (COORD_BITS - zoom_factor);
    let width = (device_size.width as i64).min(cap) as Coord;
    let height = (device_size.height as i64).min(cap) as Coord;
    Size::new(width.max(0), height.max(0))
}

fn calc_viewport_rect(center: BigPoint, screen_size: Size, zoom_factor: i32) -> Rect {
    let half = half_extent(screen_size, zoom_factor);
    let rect = BigRect::new(
        center.x - half.width,
        center.y - half.height,
        center.x + half.width,
        center.y + half.height,
    );
    clamp_big_rect(rect, max_viewport_rect()).to_rect()
}

fn clamp_big_rect(rect: BigRect, bounds: BigRect) -> BigRect {
    BigRect::new(
        rect.left.max(bounds.left),
        rect.top.max(bounds.top),
        rect.right.min(bounds.right),
        rect.bottom.min(bounds.bottom),
    )
}

/// Nudges `center` so that a viewport of half-extent `half` centered on it
/// stays within `bounds`. When `bounds` is narrower than `2 * half` along an
/// axis, the viewport cannot fit inside it at all; the center is placed at
/// the midpoint of `bounds` on that axis instead of panicking or producing a
/// center outside `bounds`.
fn correct_point(center: BigPoint, half: BigSize, bounds: BigRect) -> BigPoint {
    BigPoint::new(
        clamp_axis(center.x, half.width, bounds.left, bounds.right),
        clamp_axis(center.y, half.height, bounds.top, bounds.bottom),
    )
}

fn clamp_axis(center: i64, half: i64, min: i64, max: i64) -> i64 {
    if max - min <= 2 * half {
        (min + max) / 2
    } else {
        center.clamp(min + half, max - half)
    }
}

/// Map-space delta that keeps screen point `focus` anchored to the same map
/// location across a zoom-factor change from `old_zoom` to `new_zoom`.
///
/// `(screen_center - focus)` is the focus point's screen-space offset from
/// center; scaling it by the old and new zoom factors gives the map-space
/// offset the center would need at each zoom to keep that screen point
/// fixed, and the difference between the two is the delta to apply.
fn calc_anchored_delta(screen_size: Size, old_zoom: i32, new_zoom: i32, focus: Point) -> BigPoint {
    let center = screen_center(screen_size);
    let dx = (center.x - focus.x) as i64;
    let dy = (center.y - focus.y) as i64;
    let old_offset = BigPoint::new(dx << old_zoom, dy << old_zoom);
    let new_offset = BigPoint::new(dx << new_zoom, dy << new_zoom);
    BigPoint::new(new_offset.x - old_offset.x, new_offset.y - old_offset.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_controller_starts_at_the_default_center_and_zoom() {
        let controller = Controller::new(Size::new(800, 600));
        assert_eq!(controller.zoom_factor(), INIT_ZOOM_FACTOR);
        assert!(controller.viewport_rect().contains(INIT_VIEWPORT_CENTER));
    }

    #[test]
    fn can_generate_contents_is_false_below_the_minimum_screen_dimension() {
        let mut controller = Controller::new(Size::new(800, 600));
        assert!(controller.can_generate_contents());
        controller.set_device_size(Size::new(4, 4));
        assert!(!controller.can_generate_contents());
    }

    #[test]
    fn move_in_direction_shifts_the_viewport_towards_that_side() {
        let mut controller = Controller::new(Size::new(800, 600));
        let before = controller.viewport_rect();
        controller.move_view(Move::InDirection(Direction::East));
        let after = controller.viewport_rect();
        assert!(after.left > before.left);
        assert_eq!(after.top, before.top);
    }

    #[test]
    fn move_to_point_recenters_on_that_screen_location() {
        let mut controller = Controller::new(Size::new(800, 600));
        let before = controller.viewport_rect();
        controller.move_view(Move::ToPoint(Point::new(600, 300)));
        let after = controller.viewport_rect();
        assert!(after.left > before.left);
    }

    #[test]
    fn zoom_out_widens_the_viewport_rect() {
        let mut controller = Controller::new(Size::new(800, 600));
        let before = controller.viewport_rect().size();
        controller.zoom(Zoom {
            kind: ZoomKind::Out,
            steps: 1,
            anchor: None,
        });
        let after = controller.viewport_rect().size();
        assert!(after.width > before.width);
        assert!(after.height > before.height);
    }

    #[test]
    fn zoom_in_narrows_the_viewport_rect() {
        let mut controller = Controller::new(Size::new(800, 600));
        controller.zoom(Zoom {
            kind: ZoomKind::Out,
            steps: 2,
            anchor: None,
        });
        let before = controller.viewport_rect().size();
        controller.zoom(Zoom {
            kind: ZoomKind::In,
            steps: 1,
            anchor: None,
        });
        let after = controller.viewport_rect().size();
        assert!(after.width < before.width);
    }

    #[test]
    fn zoom_clamps_at_the_minimum_and_maximum_zoom_factor() {
        let mut controller = Controller::new(Size::new(800, 600));
        for _ in 0..30 {
            controller.zoom(Zoom {
                kind: ZoomKind::In,
                steps: 1,
                anchor: None,
            });
        }
        assert_eq!(controller.zoom_factor(), MIN_ZOOM_FACTOR);
        for _ in 0..30 {
            controller.zoom(Zoom {
                kind: ZoomKind::Out,
                steps: 1,
                anchor: None,
            });
        }
        assert_eq!(controller.zoom_factor(), MAX_ZOOM_FACTOR);
    }

    #[test]
    fn anchoring_on_the_screen_center_behaves_like_an_unanchored_zoom() {
        let mut anchored = Controller::new(Size::new(800, 600));
        let mut unanchored = Controller::new(Size::new(800, 600));
        let center = screen_center(anchored.screen_size());
        anchored.zoom(Zoom {
            kind: ZoomKind::In,
            steps: 1,
            anchor: Some(center),
        });
        unanchored.zoom(Zoom {
            kind: ZoomKind::In,
            steps: 1,
            anchor: None,
        });
        assert_eq!(anchored.viewport_rect(), unanchored.viewport_rect());
    }

    #[test]
    fn anchoring_off_center_shifts_the_viewport_towards_the_focus_point() {
        let mut controller = Controller::new(Size::new(800, 600));
        let center = screen_center(controller.screen_size());
        let focus = Point::new(center.x + 200, center.y);
        let before = controller.viewport_rect();
        controller.zoom(Zoom {
            kind: ZoomKind::In,
            steps: 1,
            anchor: Some(focus),
        });
        let after = controller.viewport_rect();
        // Zooming in while anchored on a point to the right of center should
        // pull the viewport's center to the right too, towards that point.
        assert!(after.center().x > before.center().x);
    }

    #[test]
    fn reset_view_restores_the_default_center_and_zoom() {
        let mut controller = Controller::new(Size::new(800, 600));
        controller.move_view(Move::InDirection(Direction::East));
        controller.zoom(Zoom {
            kind: ZoomKind::Out,
            steps: 3,
            anchor: None,
        });
        controller.reset_view();
        assert_eq!(controller.zoom_factor(), INIT_ZOOM_FACTOR);
        assert!(controller.viewport_rect().contains(INIT_VIEWPORT_CENTER));
    }

    #[test]
    fn restore_sets_the_given_center_and_zoom() {
        let mut controller = Controller::new(Size::new(800, 600));
        controller.restore(Point::new(123, 456), 3);
        assert_eq!(controller.zoom_factor(), 3);
        assert!(controller.viewport_rect().contains(Point::new(123, 456)));
    }

    #[test]
    fn restore_clamps_an_out_of_range_zoom_factor() {
        let mut controller = Controller::new(Size::new(800, 600));
        controller.restore(Point::new(0, 0), 999);
        assert_eq!(controller.zoom_factor(), MAX_ZOOM_FACTOR);
    }

    #[test]
    fn params_description_lists_the_fixed_parameter_letters() {
        let controller = Controller::new(Size::new(800, 600));
        assert_eq!(controller.params_description(), "l L t T r R b B zoom Z");
    }
}
