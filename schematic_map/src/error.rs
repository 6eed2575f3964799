// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The one error type a caller needs to match on a specific variant.
//!
//! Everything else in this crate's public API returns [`anyhow::Result`];
//! `MapReadError` is the exception, surfaced so a caller can distinguish a
//! truncated stream from a semantically invalid one.

/// Reasons a map byte stream failed to decode into a usable
/// [`schematic_segments::SegmentStore`].
#[derive(Debug, thiserror::Error)]
pub enum MapReadError {
    /// The stream ended before a declared count was satisfied.
    #[error("map stream truncated while reading {0}")]
    Truncated(&'static str),
    /// A segment declared more than `i32::MAX` points, or a negative count.
    #[error("segment {segment_index} declared an invalid point count {point_count}")]
    InvalidPointCount {
        /// Index of the offending segment.
        segment_index: usize,
        /// The invalid count as read from the stream.
        point_count: i32,
    },
    /// The segment store rejected the decoded segments.
    #[error(transparent)]
    Segments(#[from] schematic_segments::SegmentStoreError),
    /// The map stream failed to decode for a reason not covered by a more
    /// specific variant: truncation, a negative point count, or an
    /// out-of-range road class. Carries [`map_reader::read_map`](crate::map_reader::read_map)'s
    /// own error so callers and logs keep the real cause.
    #[error("malformed map stream: {0}")]
    Malformed(anyhow::Error),
}
