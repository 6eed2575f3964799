// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document: owns the segment store, spatial index, and view state for
//! one loaded map, and drives one frame at a time.

use anyhow::{Context, Result};
use schematic_geometry::{Color, Point, Size, BACKGROUND_COLOR};
use schematic_index::SectionIndex;
use schematic_raster::render_frame;
use schematic_segments::{SectionId, SegmentStore};
use schematic_view::Controller;

use crate::bitmap::{Bitmap, ScopedLock};
use crate::diagnostics;
use crate::error::MapReadError;
use crate::map_reader::read_map;

/// A loaded map plus its live view state, ready to select sections and
/// render frames.
pub struct Document {
    store: SegmentStore,
    index: SectionIndex,
    view: Controller,
    device_size: Size,
    background: Color,
}

impl Document {
    /// Decodes `bytes` as a map file and builds the segment store and
    /// spatial index over it.
    ///
    /// # Errors
    ///
    /// Returns [`MapReadError`] if the stream is truncated or malformed, or
    /// if the decoded segments fail [`SegmentStore::init`]'s validation.
    pub fn load(bytes: &[u8], device_size: Size) -> Result<Self, MapReadError> {
        let data = read_map(bytes).map_err(MapReadError::Malformed)?;
        let store = SegmentStore::init(data.segments)?;
        let index = SectionIndex::build(&store);
        Ok(Self {
            store,
            index,
            view: Controller::new(device_size),
            device_size,
            background: BACKGROUND_COLOR,
        })
    }

    /// Resizes the device surface.
    pub fn set_device_size(&mut self, device_size: Size) {
        self.device_size = device_size;
        self.view.set_device_size(device_size);
    }

    /// The view controller, for panning, zooming, and device-size changes.
    pub fn view_mut(&mut self) -> &mut Controller {
        &mut self.view
    }

    /// Sets the background color unwritten pixels are filled with.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Every section that might be visible in the current viewport.
    #[must_use]
    pub fn select_sections(&self) -> Vec<SectionId> {
        let viewport = self.view.viewport_rect();
        let sections = self.index.select_sections(&self.store, viewport);
        diagnostics::dump_rect("viewport", viewport);
        diagnostics::dump_sections(&sections);
        sections
    }

    /// Looks up `(road_class, begin, end)` for a selected section id.
    #[must_use]
    pub fn get_section(&self, section_id: SectionId) -> (u8, Point, Point) {
        self.store.get_section(section_id)
    }

    /// Renders the current viewport into `bitmap`.
    ///
    /// Returns `false` without touching the bitmap if the view cannot
    /// currently produce a frame (see [`Controller::can_generate_contents`])
    /// or if the host declines to lock the bitmap.
    ///
    /// # Errors
    ///
    /// Returns an error if the rendered pixel count does not match the
    /// bitmap's locked buffer length; this can only happen if the host's
    /// [`Bitmap`] implementation disagrees with the device size the
    /// controller was constructed with.
    pub fn generate_contents(&self, bitmap: &mut impl Bitmap) -> Result<bool> {
        if !self.view.can_generate_contents() {
            return Ok(false);
        }

        let viewport = self.view.viewport_rect();
        let top_left = viewport.top_left();
        let zoom_factor = self.view.zoom_factor();
        let screen_size = self.view.screen_size();

        let section_ids = self.select_sections();
        let road_classes = self.store.road_classes();
        let sections = section_ids.iter().map(|&section_id| {
            let (road_class, begin, end) = self.store.get_section(section_id);
            let class = road_classes
                .get(road_class)
                .copied()
                .expect("section references a valid road class");
            (class, begin, end)
        });

        let pixels = render_frame(self.device_size, screen_size, top_left, zoom_factor, self.background, sections);

        let Some(mut guard) = ScopedLock::acquire(bitmap) else {
            return Ok(false);
        };
        let buffer = guard.buffer();
        if buffer.len() != pixels.len() {
            return Err(anyhow::anyhow!(
                "bitmap buffer holds {} pixels, frame produced {}",
                buffer.len(),
                pixels.len()
            ));
        }
        buffer.copy_from_slice(&pixels);
        Ok(true)
    }

    /// Serializes the view state as `"cx cy zoom"`.
    #[must_use]
    pub fn save_view_state(&self) -> String {
        let center = self.view.viewport_rect().center();
        format!("{} {} {}", center.x, center.y, self.view.zoom_factor())
    }

    /// Restores view state previously produced by [`Document::save_view_state`].
    ///
    /// # Errors
    ///
    /// Returns an error if `state` is not three whitespace-separated
    /// integers.
    pub fn restore_view_state(&mut self, state: &str) -> Result<()> {
        let mut parts = state.split_whitespace();
        let cx: i32 = parts.next().context("missing cx")?.parse().context("parsing cx")?;
        let cy: i32 = parts.next().context("missing cy")?.parse().context("parsing cy")?;
        let zoom: i32 = parts.next().context("missing zoom")?.parse().context("parsing zoom")?;
        self.view.restore(Point::new(cx, cy), zoom);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(values: &[i32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    struct VecBitmap {
        pixels: Vec<Color>,
    }

    impl Bitmap for VecBitmap {
        fn lock(&mut self) -> Option<&mut [Color]> {
            Some(&mut self.pixels)
        }
        fn unlock(&mut self) {}
    }

    #[test]
    fn loads_a_single_segment_map() {
        let bytes = encode(&[1, 0, 2, 0, 100, 100, 100]);
        let document = Document::load(&bytes, Size::new(256, 256)).unwrap();
        assert_eq!(document.store.segments().len(), 1);
    }

    #[test]
    fn view_state_round_trips() {
        let bytes = encode(&[0]);
        let mut document = Document::load(&bytes, Size::new(256, 256)).unwrap();
        document.restore_view_state("123 456 3").unwrap();
        let saved = document.save_view_state();
        assert_eq!(saved, "123 456 3");
    }

    #[test]
    fn select_sections_finds_a_horizontal_section_in_view() {
        let bytes = encode(&[1, 0, 2, 0, 100, 300, 100]);
        let mut document = Document::load(&bytes, Size::new(400, 400)).unwrap();
        document.restore_view_state("150 100 0").unwrap();
        assert_eq!(document.select_sections().len(), 1);
    }

    #[test]
    fn generate_contents_fills_the_bitmap_for_a_tiny_device() {
        let bytes = encode(&[1, 0, 2, 0, 100, 20, 100]);
        let mut document = Document::load(&bytes, Size::new(16, 16)).unwrap();
        document.restore_view_state("10 100 0").unwrap();
        let mut bitmap = VecBitmap {
            pixels: vec![Color::rgb(0, 0, 0); 16 * 16],
        };
        let drew = document.generate_contents(&mut bitmap).unwrap();
        assert!(drew);
    }

    #[test]
    fn generate_contents_refuses_below_the_minimum_screen_dimension() {
        let bytes = encode(&[0]);
        let mut document = Document::load(&bytes, Size::new(4, 4)).unwrap();
        let mut bitmap = VecBitmap {
            pixels: vec![Color::rgb(0, 0, 0); 16],
        };
        assert!(!document.generate_contents(&mut bitmap).unwrap());
    }
}
