// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Road-class table: thickness and color policy indexed by class integer.

use schematic_geometry::{Color, Coord, MAX_ROAD_CLASS_INDEX, OUTLINE_COLOR, ROAD_CLASS_COLORS};

/// Drawing policy for one road class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoadClass {
    /// Centerline thickness, in pixels, at the default zoom.
    pub thickness: Coord,
    /// Fill color.
    pub color: Color,
    /// Outline thickness and color, if this class is outlined.
    pub outline: Option<(Coord, Color)>,
}

impl RoadClass {
    /// Builds a road class with no outline.
    #[must_use]
    pub const fn solid(thickness: Coord, color: Color) -> Self {
        Self {
            thickness,
            color,
            outline: None,
        }
    }

    /// Builds a road class outlined with `outline_thickness` of `outline_color`.
    #[must_use]
    pub const fn outlined(
        thickness: Coord,
        color: Color,
        outline_thickness: Coord,
        outline_color: Color,
    ) -> Self {
        Self {
            thickness,
            color,
            outline: Some((outline_thickness, outline_color)),
        }
    }

    /// Whether this class draws an outline.
    #[must_use]
    pub const fn has_outline(&self) -> bool {
        self.outline.is_some()
    }

    /// Outline thickness, or zero if this class has no outline.
    #[must_use]
    pub const fn outline_thickness(&self) -> Coord {
        match self.outline {
            Some((thickness, _)) => thickness,
            None => 0,
        }
    }

    /// Total on-screen thickness including both outline bands:
    /// `thickness + 2 * outline_thickness`.
    #[must_use]
    pub const fn full_thickness(&self) -> Coord {
        self.thickness + 2 * self.outline_thickness()
    }
}

/// A `RoadClass` for every index in `0..=MAX_ROAD_CLASS_INDEX`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoadClassTable {
    classes: [RoadClass; (MAX_ROAD_CLASS_INDEX + 1) as usize],
}

impl RoadClassTable {
    /// Looks up the road class for `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: u8) -> Option<&RoadClass> {
        self.classes.get(index as usize)
    }
}

impl Default for RoadClassTable {
    fn default() -> Self {
        // Classes 0..6 are solid; the top class (the one drawn last, on top
        // of everything else) carries an outline so it reads clearly where
        // it crosses lower classes.
        let classes = [
            RoadClass::solid(1, ROAD_CLASS_COLORS[0]),
            RoadClass::solid(1, ROAD_CLASS_COLORS[1]),
            RoadClass::solid(1, ROAD_CLASS_COLORS[2]),
            RoadClass::solid(1, ROAD_CLASS_COLORS[3]),
            RoadClass::solid(1, ROAD_CLASS_COLORS[4]),
            RoadClass::solid(1, ROAD_CLASS_COLORS[5]),
            RoadClass::solid(1, ROAD_CLASS_COLORS[6]),
            RoadClass::outlined(
                MAX_ROAD_CLASS_INDEX as Coord,
                ROAD_CLASS_COLORS[7],
                1,
                OUTLINE_COLOR,
            ),
        ];
        Self { classes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_thickness_adds_both_outline_bands() {
        let class = RoadClass::outlined(4, Color::rgb(0, 0, 0), 1, Color::rgb(255, 255, 255));
        assert_eq!(class.full_thickness(), 6);
    }

    #[test]
    fn solid_class_has_no_outline() {
        let class = RoadClass::solid(1, Color::rgb(0, 0, 0));
        assert!(!class.has_outline());
        assert_eq!(class.full_thickness(), 1);
    }

    #[test]
    fn default_table_covers_every_class_index() {
        let table = RoadClassTable::default();
        for index in 0..=MAX_ROAD_CLASS_INDEX {
            assert!(table.get(index).is_some());
        }
        assert!(table.get(MAX_ROAD_CLASS_INDEX + 1).is_none());
    }
}
