// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables shared by every sprite's geometry rebuild.

/// Configuration for geometry rebuilds.
///
/// Inset, frame, and size inputs are expressed in *points*; texture
/// coordinates are computed in *pixels*. The content scale factor converts
/// between the two.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale9Config {
    /// Pixels per point.
    pub content_scale_factor: f64,
    /// Width in pixels of the baked-in border on each side of an
    /// embedded-border (9-patch) asset.
    pub embedded_border_px: f64,
    /// Sub-pixel bias added to the sampling origin of embedded-border assets.
    ///
    /// Keeps bilinear sampling away from the border pixels and from whatever
    /// the atlas packer placed next to the frame. The right value depends on
    /// the atlas packing, so it is exposed rather than fixed.
    pub embedded_sampling_bias_px: f64,
}

impl Scale9Config {
    /// One pixel per point, one-pixel 9-patch border, 1.3 px sampling bias.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            content_scale_factor: 1.0,
            embedded_border_px: 1.0,
            embedded_sampling_bias_px: 1.3,
        }
    }

    /// Two pixels per point (high-density displays).
    #[must_use]
    pub const fn high_density() -> Self {
        Self {
            content_scale_factor: 2.0,
            ..Self::standard()
        }
    }

    /// Returns a copy with the given content scale factor.
    #[must_use]
    pub const fn with_content_scale_factor(mut self, factor: f64) -> Self {
        self.content_scale_factor = factor;
        self
    }

    /// Returns a copy with the given embedded-border sampling bias.
    #[must_use]
    pub const fn with_embedded_sampling_bias(mut self, bias_px: f64) -> Self {
        self.embedded_sampling_bias_px = bias_px;
        self
    }

    /// Content scale factor, falling back to `1.0` when the configured value
    /// is not a positive finite number.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        if self.content_scale_factor.is_finite() && self.content_scale_factor > 0.0 {
            self.content_scale_factor
        } else {
            1.0
        }
    }
}

impl Default for Scale9Config {
    #[inline]
    fn default() -> Self {
        Self::standard()
    }
}
