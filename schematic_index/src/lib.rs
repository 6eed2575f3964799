// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Schematic Index: the spatial structures [`schematic_map`] stabs with a
//! viewport rectangle to find what to draw.
//!
//! Two structures cover the two ways a section can be relevant to a
//! viewport:
//!
//! - [`range_tree::RangeTree`]: a 2D range tree over every segment vertex,
//!   answering "which points lie inside this rectangle" in `O(log^2 n + k)`.
//! - [`interval_tree::IntervalTree`]: built once per axis over the
//!   axis-monotone interval sections (see `schematic_segments`), answering
//!   "which sections cross this vertical or horizontal line, within this
//!   secondary-axis range" in the same bound.
//!
//! [`select::SectionIndex`] owns one of each (plus the vertical tree) and
//! combines their results into the section id list a frame actually needs,
//! per [`select::SectionIndex::select_sections`].
//!
//! [`backend::Backend`] is a pluggable spatial-query trait, in the style of
//! the teacher's generic index crate's own `Backend` abstraction, so a
//! linear-scan reference implementation can stand in for [`RangeTree`]
//! wherever only the rectangle-query interface matters.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod interval_tree;
pub mod range_tree;
pub mod select;

pub use backend::Backend;
pub use interval_tree::IntervalTree;
pub use range_tree::RangeTree;
pub use select::SectionIndex;
