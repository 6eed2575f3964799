// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decodes the map file's little-endian `i32` stream into [`RawSegment`]s.

use anyhow::{bail, Context, Result};
use schematic_geometry::{Point, Rect};
use schematic_segments::RawSegment;

/// A sentinel some in-memory streams append after the last segment, for
/// assertion purposes only. Map files on disk never carry it.
const TRAILING_SENTINEL: i32 = u32::from_be_bytes([0x89, 0xAB, 0xCD, 0xEF]) as i32;

/// The decoded segments plus the bounding rectangle of every point read,
/// tracked incrementally the way the reference reader's `updateAreaDims`
/// does.
#[derive(Debug)]
pub struct MapData {
    /// Every decoded segment.
    pub segments: Vec<RawSegment>,
    /// Bounding rectangle of every point across every segment, or `None` if
    /// the map had no segments.
    pub bounds: Option<Rect>,
}

/// Decodes `bytes` as a map file: `segment_count`, then per segment
/// `road_class`, `point_count`, and that many `(x, y)` pairs, all as
/// little-endian `i32`s. Consecutive duplicate points within a segment are
/// dropped. A trailing sentinel, if present, is consumed and ignored.
///
/// # Errors
///
/// Returns an error if the stream ends before a declared count is
/// satisfied, or a segment declares a negative point count.
pub fn read_map(bytes: &[u8]) -> Result<MapData> {
    let mut reader = Reader::new(bytes);
    let segment_count = reader.read_i32().context("reading segment count")?;
    let segment_count = usize::try_from(segment_count).context("negative segment count")?;

    let mut segments = Vec::with_capacity(segment_count);
    let mut bounds: Option<Rect> = None;

    for segment_index in 0..segment_count {
        let road_class = reader
            .read_i32()
            .with_context(|| format!("reading road class of segment {segment_index}"))?;
        let road_class = u8::try_from(road_class)
            .with_context(|| format!("segment {segment_index} has an out-of-range road class {road_class}"))?;

        let point_count = reader
            .read_i32()
            .with_context(|| format!("reading point count of segment {segment_index}"))?;
        if point_count < 0 {
            bail!("segment {segment_index} declared a negative point count {point_count}");
        }

        let mut points = Vec::with_capacity(point_count as usize);
        for point_index in 0..point_count {
            let x = reader
                .read_i32()
                .with_context(|| format!("reading point {point_index} x of segment {segment_index}"))?;
            let y = reader
                .read_i32()
                .with_context(|| format!("reading point {point_index} y of segment {segment_index}"))?;
            let point = Point::new(x, y);
            bounds = Some(match bounds {
                Some(rect) => union_point(rect, point),
                None => Rect::new(point.x, point.y, point.x, point.y),
            });
            if points.last() != Some(&point) {
                points.push(point);
            }
        }

        segments.push(RawSegment { road_class, points });
    }

    let _ = reader.read_i32_if_eq(TRAILING_SENTINEL);

    Ok(MapData { segments, bounds })
}

fn union_point(rect: Rect, point: Point) -> Rect {
    Rect::new(
        rect.left.min(point.x),
        rect.top.min(point.y),
        rect.right.max(point.x),
        rect.bottom.max(point.y),
    )
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn read_i32(&mut self) -> Result<i32> {
        let end = self.offset + 4;
        let chunk = self
            .bytes
            .get(self.offset..end)
            .context("unexpected end of map stream")?;
        self.offset = end;
        Ok(i32::from_le_bytes(chunk.try_into().expect("slice of length 4")))
    }

    /// Consumes the next `i32` only if it equals `expected`; otherwise
    /// leaves the reader positioned where it was (there is no more data to
    /// read after it regardless).
    fn read_i32_if_eq(&mut self, expected: i32) -> Option<i32> {
        let saved = self.offset;
        match self.read_i32() {
            Ok(value) if value == expected => Some(value),
            _ => {
                self.offset = saved;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(values: &[i32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn decodes_a_single_segment() {
        let bytes = encode(&[1, 2, 3, 0, 0, 100, 100]);
        let data = read_map(&bytes).unwrap();
        assert_eq!(data.segments.len(), 1);
        assert_eq!(data.segments[0].road_class, 2);
        assert_eq!(data.segments[0].points, vec![Point::new(0, 0), Point::new(100, 100)]);
        assert_eq!(data.bounds, Some(Rect::new(0, 0, 100, 100)));
    }

    #[test]
    fn drops_consecutive_duplicate_points() {
        let bytes = encode(&[1, 0, 3, 0, 0, 0, 0, 50, 50]);
        let data = read_map(&bytes).unwrap();
        assert_eq!(data.segments[0].points, vec![Point::new(0, 0), Point::new(50, 50)]);
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let bytes = encode(&[1, 0, 2, 0, 0]);
        assert!(read_map(&bytes).is_err());
    }

    #[test]
    fn empty_stream_of_segments_has_no_bounds() {
        let bytes = encode(&[0]);
        let data = read_map(&bytes).unwrap();
        assert!(data.segments.is_empty());
        assert_eq!(data.bounds, None);
    }

    #[test]
    fn trailing_sentinel_is_consumed_without_error() {
        let bytes = encode(&[1, 0, 2, 0, 0, 10, 10, TRAILING_SENTINEL]);
        assert!(read_map(&bytes).is_ok());
    }
}
