// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios exercising the whole load → select → render
//! pipeline across crate boundaries.

use schematic_geometry::{Color, Size};
use schematic_map::{Bitmap, Document};

fn encode(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

struct VecBitmap {
    pixels: Vec<Color>,
}

impl VecBitmap {
    fn new(size: Size) -> Self {
        Self {
            pixels: vec![Color::rgb(0, 0, 0); (size.width * size.height) as usize],
        }
    }
}

impl Bitmap for VecBitmap {
    fn lock(&mut self) -> Option<&mut [Color]> {
        Some(&mut self.pixels)
    }

    fn unlock(&mut self) {}
}

#[test]
fn empty_viewport_at_zero_device_size_draws_nothing() {
    let bytes = encode(&[0]);
    let mut document = Document::load(&bytes, Size::new(0, 0)).unwrap();
    let mut bitmap = VecBitmap::new(Size::new(0, 0));
    assert!(!document.generate_contents(&mut bitmap).unwrap());
}

#[test]
fn single_horizontal_section_renders_its_road_class_color() {
    // One horizontal section from (0, 100) to (300, 100), class 0.
    let bytes = encode(&[1, 0, 2, 0, 100, 300, 100]);
    let size = Size::new(256, 256);
    let mut document = Document::load(&bytes, size).unwrap();
    document.restore_view_state("150 100 0").unwrap();

    let sections = document.select_sections();
    assert_eq!(sections.len(), 1);
    let (road_class, begin, end) = document.get_section(sections[0]);
    assert_eq!(road_class, 0);
    assert_eq!((begin.x, begin.y), (0, 100));
    assert_eq!((end.x, end.y), (300, 100));

    let mut bitmap = VecBitmap::new(size);
    assert!(document.generate_contents(&mut bitmap).unwrap());
    // Background fills somewhere away from the line; the line itself is not
    // background-colored.
    let background = schematic_geometry::BACKGROUND_COLOR;
    assert!(bitmap.pixels.iter().any(|&c| c == background));
    assert!(bitmap.pixels.iter().any(|&c| c != background));
}

#[test]
fn two_sections_sharing_a_vertex_both_get_selected() {
    let bytes = encode(&[
        2, // segment_count
        0, 2, 100, 100, 300, 100, // horizontal, class 0
        0, 2, 100, 100, 100, 300, // vertical, class 0
    ]);
    let size = Size::new(400, 400);
    let mut document = Document::load(&bytes, size).unwrap();
    document.restore_view_state("150 150 0").unwrap();

    let sections = document.select_sections();
    assert_eq!(sections.len(), 2);
}

#[test]
fn view_state_save_and_restore_is_stable_across_a_pan() {
    let bytes = encode(&[0]);
    let mut document = Document::load(&bytes, Size::new(256, 256)).unwrap();
    document.restore_view_state("1000 2000 4").unwrap();
    let saved = document.save_view_state();
    document.restore_view_state(&saved).unwrap();
    assert_eq!(document.save_view_state(), saved);
}

#[test]
fn malformed_map_stream_is_rejected() {
    let bytes = encode(&[1, 0, 5]); // declares 5 points but supplies none
    let result = Document::load(&bytes, Size::new(256, 256));
    assert!(result.is_err());
}
