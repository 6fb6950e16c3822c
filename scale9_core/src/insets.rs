// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cap insets and their resolution.
//!
//! Cap insets describe how far each fixed corner region reaches into the
//! source image: `left` and `right` are widths, `top` and `bottom` are
//! heights, all measured in the image's *untrimmed* (original) coordinate
//! space. Whatever the insets leave in the middle is the stretchable center.
//!
//! A sprite can get its insets from three places, in priority order:
//!
//! 1. Insets the caller set explicitly (any non-zero side counts).
//! 2. Insets carried by an embedded-border (9-patch) asset.
//! 3. A default three-way split of the original size.
//!
//! [`resolve_cap_insets`] applies that order and reports which source won.

use kurbo::{Insets, Rect, Size};

/// Distances from each edge of the original image to the stretchable center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CapInsets {
    /// Width of the left column.
    pub left: f64,
    /// Height of the top row.
    pub top: f64,
    /// Width of the right column.
    pub right: f64,
    /// Height of the bottom row.
    pub bottom: f64,
}

impl CapInsets {
    /// All four sides zero, meaning "not set".
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates insets from the four side lengths.
    #[inline]
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same length on every side.
    #[inline]
    #[must_use]
    pub const fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// Splits each axis of `original` into three equal parts.
    #[must_use]
    pub fn thirds(original: Size) -> Self {
        let w = original.width / 3.0;
        let h = original.height / 3.0;
        Self::new(w, h, w, h)
    }

    /// Returns `true` if all four sides are exactly zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }

    /// Builds insets from a center rectangle inside an image of size
    /// `original` (top-left origin).
    #[must_use]
    pub fn from_center_rect(center: Rect, original: Size) -> Self {
        Self::new(
            center.x0,
            center.y0,
            original.width - center.x1,
            original.height - center.y1,
        )
    }

    /// The stretchable center as a rectangle inside an image of size
    /// `original` (top-left origin).
    ///
    /// The result is not normalized: oversized insets produce a rectangle
    /// with `x1 < x0` or `y1 < y0`.
    #[must_use]
    pub fn center_rect(&self, original: Size) -> Rect {
        Rect::new(
            self.left,
            self.top,
            original.width - self.right,
            original.height - self.bottom,
        )
    }

    /// Multiplies every side by `factor`.
    #[inline]
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(
            self.left * factor,
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
        )
    }

    /// Replaces non-finite sides with zero, keeping negative ones.
    #[inline]
    #[must_use]
    pub fn sanitized(self) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self::new(
            finite(self.left),
            finite(self.top),
            finite(self.right),
            finite(self.bottom),
        )
    }

    /// Replaces negative and non-finite sides with zero.
    ///
    /// A negative side overlaps the opposite region; folding it to zero
    /// hands the overlap to the center.
    #[inline]
    #[must_use]
    pub fn clamped(self) -> Self {
        let clamp = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self::new(
            clamp(self.left),
            clamp(self.top),
            clamp(self.right),
            clamp(self.bottom),
        )
    }
}

impl From<Insets> for CapInsets {
    fn from(insets: Insets) -> Self {
        Self::new(insets.x0, insets.y0, insets.x1, insets.y1)
    }
}

impl From<CapInsets> for Insets {
    fn from(insets: CapInsets) -> Self {
        Self::new(insets.left, insets.top, insets.right, insets.bottom)
    }
}

/// Where a sprite's effective cap insets came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InsetSource {
    /// Set explicitly by the caller.
    Explicit,
    /// Carried by an embedded-border asset.
    Embedded,
    /// Computed as a three-way split of the original size.
    DefaultSplit,
}

/// The outcome of [`resolve_cap_insets`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedInsets {
    /// Effective insets, with negative sides folded into the center.
    pub insets: CapInsets,
    /// Which source supplied [`insets`](Self::insets).
    pub source: InsetSource,
    /// Whether the asset carries a baked-in border that must be excluded
    /// from sampling. Set whenever the asset has embedded insets, even when
    /// explicit insets take priority.
    pub embedded_border: bool,
    /// Original size after removing the embedded border, if any.
    pub original_size: Size,
}

/// Chooses the effective cap insets for one rebuild.
///
/// `explicit` and `embedded` must be in the same units as `original`.
/// When `embedded` is present and non-zero, `border` is removed from each
/// side of `original` before the default split is computed.
#[must_use]
pub fn resolve_cap_insets(
    explicit: CapInsets,
    embedded: Option<CapInsets>,
    original: Size,
    border: f64,
) -> ResolvedInsets {
    let embedded = embedded.filter(|e| !e.is_zero());
    let embedded_border = embedded.is_some();
    let original_size = if embedded_border {
        Size::new(
            (original.width - 2.0 * border).max(0.0),
            (original.height - 2.0 * border).max(0.0),
        )
    } else {
        original
    };

    let (insets, source) = if !explicit.is_zero() {
        (explicit, InsetSource::Explicit)
    } else if let Some(embedded) = embedded {
        (embedded, InsetSource::Embedded)
    } else {
        (CapInsets::thirds(original_size), InsetSource::DefaultSplit)
    };

    ResolvedInsets {
        insets: insets.clamped(),
        source,
        embedded_border,
        original_size,
    }
}

/// One axis of a nine-slice split: leading fixed region, stretchable
/// center, trailing fixed region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct AxisSplit {
    pub(crate) lead: f64,
    pub(crate) center: f64,
    pub(crate) trail: f64,
}

impl AxisSplit {
    /// Folds negative edges into the center, then shrinks the edges
    /// proportionally if the center is still negative.
    ///
    /// All three parts of the result are non-negative and their sum never
    /// exceeds the (non-negative part of the) input total.
    pub(crate) fn normalized(self) -> Self {
        let Self {
            mut lead,
            mut center,
            mut trail,
        } = self;
        if lead < 0.0 {
            center += lead;
            lead = 0.0;
        }
        if trail < 0.0 {
            center += trail;
            trail = 0.0;
        }
        if center < 0.0 {
            let edges = lead + trail;
            let total = edges + center;
            if total > 0.0 && edges > 0.0 {
                lead = lead * total / edges;
                trail = trail * total / edges;
            } else {
                lead = 0.0;
                trail = 0.0;
            }
            center = 0.0;
        }
        Self {
            lead,
            center,
            trail,
        }
    }
}
