// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering modes and boundary lists.

/// How a sprite maps its frame onto the target size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderingMode {
    /// Stretch the whole frame as one quad; insets are ignored.
    Simple,
    /// Keep the corners fixed and stretch the edges and center (3×3 grid).
    #[default]
    Slice,
}

impl RenderingMode {
    /// Number of boundaries per axis: 2 for [`Simple`](Self::Simple),
    /// 4 for [`Slice`](Self::Slice).
    #[inline]
    #[must_use]
    pub const fn grid_size(self) -> usize {
        match self {
            Self::Simple => 2,
            Self::Slice => 4,
        }
    }
}

/// Ordered boundary coordinates along one axis.
///
/// Holds either two values (outer edges) or four (outer edges plus the two
/// cap boundaries).
#[derive(Clone, Copy, PartialEq)]
pub struct Boundaries {
    values: [f64; 4],
    len: u8,
}

impl Boundaries {
    /// Two boundaries: the outer edges.
    #[inline]
    #[must_use]
    pub const fn pair(first: f64, last: f64) -> Self {
        Self {
            values: [first, last, 0.0, 0.0],
            len: 2,
        }
    }

    /// Four boundaries.
    #[inline]
    #[must_use]
    pub const fn quad(b0: f64, b1: f64, b2: f64, b3: f64) -> Self {
        Self {
            values: [b0, b1, b2, b3],
            len: 4,
        }
    }

    /// The boundaries for `mode` from a full four-boundary list: the outer
    /// pair for [`RenderingMode::Simple`], all four otherwise.
    #[must_use]
    pub const fn for_mode(mode: RenderingMode, b: [f64; 4]) -> Self {
        match mode {
            RenderingMode::Simple => Self::pair(b[0], b[3]),
            RenderingMode::Slice => Self::quad(b[0], b[1], b[2], b[3]),
        }
    }

    /// The boundary values.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values[..usize::from(self.len)]
    }

    /// Number of boundaries (2 or 4).
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Always `false`; a boundary list has at least two entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First boundary.
    #[inline]
    #[must_use]
    pub const fn first(&self) -> f64 {
        self.values[0]
    }

    /// Last boundary.
    #[inline]
    #[must_use]
    pub const fn last(&self) -> f64 {
        self.values[self.len as usize - 1]
    }

    /// Returns `true` if no boundary is smaller than the one before it.
    #[must_use]
    pub fn is_non_decreasing(&self) -> bool {
        self.as_slice().windows(2).all(|w| w[0] <= w[1])
    }

    /// Returns `true` if every boundary is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.as_slice().iter().all(|v| v.is_finite())
    }
}

impl core::ops::Index<usize> for Boundaries {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.as_slice()[index]
    }
}

impl core::fmt::Debug for Boundaries {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
