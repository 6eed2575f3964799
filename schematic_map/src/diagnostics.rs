// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostic logging, gated entirely behind the `diagnostics` feature so a
//! release build pays nothing for it.

use schematic_geometry::Rect;
use schematic_segments::SectionId;

/// Logs a clip or viewport rectangle at debug level.
#[cfg(feature = "diagnostics")]
pub fn dump_rect(label: &str, rect: Rect) {
    tracing::debug!(left = rect.left, top = rect.top, right = rect.right, bottom = rect.bottom, label, "rect");
}

#[cfg(not(feature = "diagnostics"))]
#[allow(unused_variables)]
pub fn dump_rect(label: &str, rect: Rect) {}

/// Logs the view state (`"cx cy zoom"`) at debug level.
#[cfg(feature = "diagnostics")]
pub fn dump_view(view_state: &str) {
    tracing::debug!(view_state, "view");
}

#[cfg(not(feature = "diagnostics"))]
#[allow(unused_variables)]
pub fn dump_view(view_state: &str) {}

/// Logs the selected section count, and each id at trace level.
#[cfg(feature = "diagnostics")]
pub fn dump_sections(sections: &[SectionId]) {
    tracing::debug!(count = sections.len(), "sections selected");
    for section_id in sections {
        tracing::trace!(?section_id, "selected section");
    }
}

#[cfg(not(feature = "diagnostics"))]
#[allow(unused_variables)]
pub fn dump_sections(sections: &[SectionId]) {}
