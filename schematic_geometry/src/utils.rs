// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small generic helpers used throughout the tree builders and the clipper.
//! Ported from the reference implementation's `beUtils.h`.

use core::ops::BitAnd;

/// Tests whether every bit set in `mask` is also set in `key`.
#[must_use]
pub fn check_flag<T>(key: T, mask: T) -> bool
where
    T: BitAnd<Output = T> + PartialEq + Copy,
{
    (key & mask) == mask
}

/// Tests whether `value`'s lowest bit is set.
#[must_use]
pub fn is_odd<T>(value: T) -> bool
where
    T: BitAnd<Output = T> + PartialEq + Copy + From<u8>,
{
    (value & T::from(1)) == T::from(1)
}

/// Tests `min_pos <= coord <= max_pos`, or `min_pos <= coord < max_pos` when
/// `including_max` is false. Used by the clipper and the pixel array for
/// both inclusive (rectangle membership) and exclusive (array bounds)
/// range checks.
#[must_use]
pub fn value_in_range<T: PartialOrd>(min_pos: T, coord: T, max_pos: T, including_max: bool) -> bool {
    if including_max {
        (min_pos <= coord) && (coord <= max_pos)
    } else {
        (min_pos <= coord) && (coord < max_pos)
    }
}

/// Index of the "lower of the two middles" element of a `0..len` range.
///
/// For an odd length this is the exact middle; for an even length it is the
/// element just before the midpoint. Every balanced tree builder in this
/// workspace (range tree, horizontal/vertical interval trees) uses this rule
/// so the left subtree of a split always includes the split element itself.
///
/// # Panics
///
/// Panics if `len` is zero.
#[must_use]
pub fn get_median(len: usize) -> usize {
    assert!(len != 0, "get_median of an empty range");
    let mut middle = len / 2;
    if len.bitand(1) == 0 {
        middle -= 1;
    }
    middle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_flag_requires_all_mask_bits() {
        assert!(check_flag(0b110u8, 0b100u8));
        assert!(!check_flag(0b100u8, 0b110u8));
    }

    #[test]
    fn is_odd_tests_low_bit() {
        assert!(is_odd(3u32));
        assert!(!is_odd(4u32));
    }

    #[test]
    fn value_in_range_respects_including_max() {
        assert!(value_in_range(0, 5, 5, true));
        assert!(!value_in_range(0, 5, 5, false));
    }

    #[test]
    fn get_median_picks_lower_middle_on_even_length() {
        assert_eq!(get_median(1), 0);
        assert_eq!(get_median(3), 1);
        assert_eq!(get_median(4), 1);
        assert_eq!(get_median(2), 0);
    }
}
