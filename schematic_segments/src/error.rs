// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Reasons [`crate::SegmentStore::init`] can reject a batch of raw segments.
///
/// This crate is `no_std`, so the error is a plain enum implementing
/// [`core::error::Error`] rather than a `thiserror`-derived one; the facade
/// crate (`schematic_map`, which is `std`) wraps map-file-level failures in
/// `thiserror`/`anyhow` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentStoreError {
    /// A raw segment named a road class above [`schematic_geometry::MAX_ROAD_CLASS_INDEX`].
    RoadClassOutOfRange {
        /// Index of the offending segment in the input batch.
        segment_index: usize,
        /// The out-of-range road class that was supplied.
        road_class: u8,
    },
    /// A raw segment had fewer than two points after duplicate collapsing.
    TooFewPoints {
        /// Index of the offending segment in the input batch.
        segment_index: usize,
    },
    /// A section's axis span exceeded [`schematic_geometry::MAX_SECTION_LENGTH`].
    SectionTooLong {
        /// Index of the offending segment in the input batch.
        segment_index: usize,
    },
    /// More segments were supplied than a `point_pos_id`/`section_id` can
    /// address.
    TooManySegments,
}

impl fmt::Display for SegmentStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoadClassOutOfRange {
                segment_index,
                road_class,
            } => write!(
                f,
                "segment {segment_index} has road class {road_class}, out of range"
            ),
            Self::TooFewPoints { segment_index } => {
                write!(f, "segment {segment_index} has fewer than two points")
            }
            Self::SectionTooLong { segment_index } => {
                write!(f, "segment {segment_index} has a section exceeding the maximum length")
            }
            Self::TooManySegments => write!(f, "too many segments for a 16-bit segment index"),
        }
    }
}

impl core::error::Error for SegmentStoreError {}
