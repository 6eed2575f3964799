// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Schematic Segments: the road network's polyline store.
//!
//! This crate owns the raw map data once it has been decoded from a map
//! file: road-classed polylines, each broken into the axis-monotone
//! "interval sections" the spatial index builds its trees over.
//!
//! ## API overview
//!
//! - [`RawSegment`]: a decoded polyline, before derived structures exist.
//! - [`SegmentStore`]: owns every [`Segment`] and [`IntervalSection`], built
//!   once via [`SegmentStore::init`] and read-only after that.
//! - [`PointPosId`] / [`SectionId`] / [`SectPosId`]: bit-packed identifiers
//!   addressing points, sections, and interval-section endpoints without a
//!   hash map.
//! - [`RoadClass`] / [`RoadClassTable`]: thickness and color policy per road
//!   class index.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod ids;
mod interval;
mod raw;
mod road_class;
mod store;

pub use error::SegmentStoreError;
pub use ids::{PointPosId, SectPosId, SectionId};
pub use interval::{build_interval_sections, IntervalSection};
pub use raw::RawSegment;
pub use road_class::{RoadClass, RoadClassTable};
pub use store::{PointPos, Segment, SectionPos, SegmentStore};
