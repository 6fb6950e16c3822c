// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content-space vertex boundaries.
//!
//! Content space has its origin at the bottom-left corner of the sprite with
//! y pointing up, in points. The boundaries along each axis are
//!
//! ```text
//! y3 ┌────┬──────────┬────┐
//!    │    │          │    │
//! y2 ├────┼──────────┼────┤
//!    │    │  center  │    │
//! y1 ├────┼──────────┼────┤
//!    │    │          │    │
//! y0 └────┴──────────┴────┘
//!    x0   x1         x2   x3
//! ```
//!
//! The corners keep their source size; only the center row and column
//! stretch. When the target is smaller than the two corners together, the
//! corners shrink proportionally and the center collapses to a line.

use kurbo::Size;

use crate::frame::TrimOffsets;
use crate::grid::{Boundaries, RenderingMode};
use crate::insets::CapInsets;

/// Inputs to [`compute_positions`].
///
/// `original_size`, `insets`, and `trim` are in pixels; `target` is in
/// points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionParams {
    /// Desired content size, in points.
    pub target: Size,
    /// Original image size, without any embedded border.
    pub original_size: Size,
    /// Resolved cap insets.
    pub insets: CapInsets,
    /// Trimmed margins of the original image.
    pub trim: TrimOffsets,
    /// Pixels per point.
    pub content_scale_factor: f64,
    /// Simple or sliced.
    pub mode: RenderingMode,
}

/// Vertex boundaries in content space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionGrid {
    /// Horizontal boundaries, left to right.
    pub x: Boundaries,
    /// Vertical boundaries, bottom to top.
    pub y: Boundaries,
    /// The target width was smaller than the left and right corners together.
    pub collapsed_x: bool,
    /// The target height was smaller than the top and bottom corners together.
    pub collapsed_y: bool,
}

/// Computes vertex boundaries for the given target size.
///
/// Never produces NaN or inverted boundaries for finite, non-negative
/// targets; a zero-width center still yields a valid grid.
#[must_use]
pub fn compute_positions(params: &PositionParams) -> PositionGrid {
    let csf = params.content_scale_factor;
    let target = Size::new(params.target.width.max(0.0), params.target.height.max(0.0));
    let original = params.original_size / csf;
    let insets = params.insets.scaled(1.0 / csf);
    let trim = params.trim.scaled(1.0 / csf);

    match params.mode {
        RenderingMode::Simple => {
            let sx = ratio(target.width, original.width);
            let sy = ratio(target.height, original.height);
            PositionGrid {
                x: Boundaries::pair(trim.left * sx, target.width - trim.right * sx),
                y: Boundaries::pair(trim.bottom * sy, target.height - trim.top * sy),
                collapsed_x: false,
                collapsed_y: false,
            }
        }
        RenderingMode::Slice => {
            let (x, collapsed_x) = slice_axis(
                target.width,
                original.width,
                (insets.left, insets.right),
                (trim.left, trim.right),
            );
            let (y, collapsed_y) = slice_axis(
                target.height,
                original.height,
                (insets.bottom, insets.top),
                (trim.bottom, trim.top),
            );
            PositionGrid {
                x,
                y,
                collapsed_x,
                collapsed_y,
            }
        }
    }
}

/// Lays out one axis of a sliced sprite. `caps` and `trim` are
/// `(leading, trailing)` pairs, with "leading" being the edge at the axis
/// origin.
fn slice_axis(
    target: f64,
    original: f64,
    caps: (f64, f64),
    trim: (f64, f64),
) -> (Boundaries, bool) {
    let center = original - caps.0 - caps.1;
    let mut sizable = target - caps.0 - caps.1;
    let mut lead = caps.0 - trim.0;
    let mut trail = caps.1 - trim.1;
    let mut origin = trim.0;

    let stretch = if center > 0.0 { sizable / center } else { 1.0 };
    // A trim wider than its corner eats into the stretched center.
    if lead < 0.0 {
        origin -= lead * (stretch - 1.0);
        sizable += lead * stretch;
        lead = 0.0;
    }
    if trail < 0.0 {
        sizable += trail * stretch;
        trail = 0.0;
    }

    if sizable >= 0.0 {
        let b1 = origin + lead;
        let b2 = b1 + sizable;
        (Boundaries::quad(origin, b1, b2, b2 + trail), false)
    } else {
        let scale = ratio(target, lead + trail);
        let mid = origin + lead * scale;
        (Boundaries::quad(origin, mid, mid, mid + trail * scale), true)
    }
}

/// `numerator / denominator`, or zero when the denominator is not positive.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
