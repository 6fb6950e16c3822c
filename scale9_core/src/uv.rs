// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Texture-coordinate boundaries.
//!
//! All inputs are in atlas pixels. The output boundaries are normalized by
//! the atlas size and listed in *atlas* order: `u` left to right, `v` top to
//! bottom. For a rotated frame the atlas `u` axis runs along the image's
//! vertical axis (bottom row first) and the atlas `v` axis along the image's
//! horizontal axis (left column first). [`assemble`](crate::mesh::assemble)
//! maps these onto content space.

use kurbo::{Rect, Size};

use crate::config::Scale9Config;
use crate::frame::TrimOffsets;
use crate::grid::{Boundaries, RenderingMode};
use crate::insets::{AxisSplit, CapInsets};

/// Inputs to [`compute_uv`], all in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvParams {
    /// Atlas texture size.
    pub atlas_size: Size,
    /// Frame rectangle in the atlas; width and height are logical
    /// (unrotated).
    pub texture_rect: Rect,
    /// Whether the frame is stored rotated by 90°.
    pub rotated: bool,
    /// Trimmed margins of the original image.
    pub trim: TrimOffsets,
    /// Original image size, without any embedded border.
    pub original_size: Size,
    /// Resolved cap insets.
    pub insets: CapInsets,
    /// Whether to skip the one-pixel embedded border when sampling.
    pub embedded_border: bool,
    /// Simple or sliced.
    pub mode: RenderingMode,
}

/// Normalized texture-coordinate boundaries in atlas order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvGrid {
    /// Horizontal atlas boundaries, left to right.
    pub u: Boundaries,
    /// Vertical atlas boundaries, top to bottom.
    pub v: Boundaries,
}

/// Computes texture-coordinate boundaries for one frame.
///
/// Edge regions that the packer trimmed away are folded into the center.
/// When an opposing pair of insets is larger than the frame, both edges are
/// scaled down so the center collapses to zero width and the boundaries
/// stay ordered.
#[must_use]
pub fn compute_uv(params: &UvParams, config: &Scale9Config) -> UvGrid {
    let UvParams {
        atlas_size,
        mut texture_rect,
        rotated,
        trim,
        original_size,
        insets,
        embedded_border,
        mode,
    } = *params;

    let horizontal = AxisSplit {
        lead: insets.left - trim.left,
        center: original_size.width - insets.left - insets.right,
        trail: insets.right - trim.right,
    };
    let vertical = AxisSplit {
        lead: insets.top - trim.top,
        center: original_size.height - insets.top - insets.bottom,
        trail: insets.bottom - trim.bottom,
    };
    // Rotated frames lie on their side: the image's bottom row is at the
    // atlas left edge.
    let (across, down) = if rotated {
        let bottom_first = AxisSplit {
            lead: vertical.trail,
            center: vertical.center,
            trail: vertical.lead,
        };
        (bottom_first, horizontal)
    } else {
        (horizontal, vertical)
    };

    if embedded_border {
        let bias = config.embedded_sampling_bias_px;
        let border = 2.0 * config.embedded_border_px;
        texture_rect = Rect::from_origin_size(
            (texture_rect.x0 + bias, texture_rect.y0 + bias),
            (texture_rect.width() - border, texture_rect.height() - border),
        );
    }
    let (footprint_w, footprint_h) = if rotated {
        (texture_rect.height(), texture_rect.width())
    } else {
        (texture_rect.width(), texture_rect.height())
    };

    let u = axis_boundaries(
        texture_rect.x0,
        footprint_w,
        across.normalized(),
        atlas_size.width,
    );
    let v = axis_boundaries(
        texture_rect.y0,
        footprint_h,
        down.normalized(),
        atlas_size.height,
    );
    UvGrid {
        u: Boundaries::for_mode(mode, u),
        v: Boundaries::for_mode(mode, v),
    }
}

fn axis_boundaries(origin: f64, extent: f64, split: AxisSplit, atlas: f64) -> [f64; 4] {
    let end = origin + extent.max(0.0);
    let b1 = (origin + split.lead).min(end);
    let b2 = (origin + split.lead + split.center).min(end);
    [origin / atlas, b1 / atlas, b2 / atlas, end / atlas]
}
