// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Source frame metadata supplied by the asset provider.
//!
//! A *frame* is a sub-rectangle of an atlas texture. Packers may trim
//! transparent margins (recorded as a trim offset plus the untrimmed
//! original size) and may store the frame rotated by 90° to pack tighter.
//! The core only ever holds `Copy` snapshots of this metadata.

use kurbo::{Rect, Size, Vec2};

use crate::error::{FrameField, Scale9Error};
use crate::insets::CapInsets;

/// An opaque reference to an atlas texture owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Atlas texture descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Texture {
    /// Renderer-side identity.
    pub id: TextureId,
    /// Atlas width in pixels.
    pub pixels_wide: u32,
    /// Atlas height in pixels.
    pub pixels_high: u32,
    /// Whether color channels are stored premultiplied by alpha.
    pub premultiplied_alpha: bool,
}

impl Texture {
    /// Creates a descriptor with straight (non-premultiplied) alpha.
    #[must_use]
    pub const fn new(id: TextureId, pixels_wide: u32, pixels_high: u32) -> Self {
        Self {
            id,
            pixels_wide,
            pixels_high,
            premultiplied_alpha: false,
        }
    }

    /// Returns a copy with the premultiplied-alpha flag set to `premultiplied`.
    #[must_use]
    pub const fn with_premultiplied_alpha(mut self, premultiplied: bool) -> Self {
        self.premultiplied_alpha = premultiplied;
        self
    }

    /// Atlas size in pixels.
    #[must_use]
    pub fn pixel_size(&self) -> Size {
        Size::new(f64::from(self.pixels_wide), f64::from(self.pixels_high))
    }

    /// Atlas size in points for the given content scale factor.
    #[must_use]
    pub fn content_size(&self, content_scale_factor: f64) -> Size {
        self.pixel_size() / content_scale_factor
    }

    /// Fails with [`FrameField::AtlasSize`] if either dimension is zero.
    pub fn validate(&self) -> Result<(), Scale9Error> {
        if self.pixels_wide == 0 || self.pixels_high == 0 {
            return Err(Scale9Error::InvalidFrame(FrameField::AtlasSize));
        }
        Ok(())
    }
}

/// Placement of one image inside an atlas, in points.
///
/// `rect` locates the frame in the atlas (top-left origin). Its width and
/// height are the *logical* (unrotated) trimmed size; a rotated frame
/// occupies `rect.height() × rect.width()` atlas points.
///
/// `offset` is the displacement of the trimmed rectangle's center from the
/// original image's center, with y pointing up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceFrame {
    /// Frame rectangle inside the atlas.
    pub rect: Rect,
    /// Whether the frame is stored rotated by 90°.
    pub rotated: bool,
    /// Trim offset (center displacement, y up).
    pub offset: Vec2,
    /// Size of the image before trimming.
    pub original_size: Size,
}

impl SourceFrame {
    /// An untrimmed, unrotated frame covering `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            rect,
            rotated: false,
            offset: Vec2::ZERO,
            original_size: rect.size(),
        }
    }

    /// Returns a copy with the rotation flag set to `rotated`.
    #[must_use]
    pub fn with_rotation(mut self, rotated: bool) -> Self {
        self.rotated = rotated;
        self
    }

    /// Returns a copy with the given trim offset and original size.
    #[must_use]
    pub fn with_trim(mut self, offset: Vec2, original_size: Size) -> Self {
        self.offset = offset;
        self.original_size = original_size;
        self
    }

    /// Fills in defaults: an empty rect means the whole texture, and an
    /// empty original size means "same as the rect".
    #[must_use]
    pub fn normalized(mut self, texture: &Texture, content_scale_factor: f64) -> Self {
        if self.rect.width() == 0.0 && self.rect.height() == 0.0 {
            self.rect = texture.content_size(content_scale_factor).to_rect();
        }
        if self.original_size.width == 0.0 && self.original_size.height == 0.0 {
            self.original_size = self.rect.size();
        }
        self
    }

    /// Checks that every field is usable for geometry.
    pub fn validate(&self) -> Result<(), Scale9Error> {
        let r = self.rect;
        if !(r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite())
            || r.width() <= 0.0
            || r.height() <= 0.0
        {
            return Err(Scale9Error::InvalidFrame(FrameField::Rect));
        }
        let o = self.original_size;
        if !(o.width.is_finite() && o.height.is_finite()) || o.width <= 0.0 || o.height <= 0.0 {
            return Err(Scale9Error::InvalidFrame(FrameField::OriginalSize));
        }
        if !(self.offset.x.is_finite() && self.offset.y.is_finite()) {
            return Err(Scale9Error::InvalidFrame(FrameField::Offset));
        }
        Ok(())
    }

    /// Transparent margins removed by the packer, in points.
    #[must_use]
    pub fn trim_offsets(&self) -> TrimOffsets {
        let size = self.rect.size();
        let left = self.offset.x + (self.original_size.width - size.width) / 2.0;
        let bottom = self.offset.y + (self.original_size.height - size.height) / 2.0;
        TrimOffsets {
            left,
            top: self.original_size.height - size.height - bottom,
            right: self.original_size.width - size.width - left,
            bottom,
        }
    }
}

/// Width of the margin trimmed from each side of the original image.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrimOffsets {
    /// Trimmed from the left edge.
    pub left: f64,
    /// Trimmed from the top edge.
    pub top: f64,
    /// Trimmed from the right edge.
    pub right: f64,
    /// Trimmed from the bottom edge.
    pub bottom: f64,
}

impl TrimOffsets {
    /// No trimming.
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Multiplies every side by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            left: self.left * factor,
            top: self.top * factor,
            right: self.right * factor,
            bottom: self.bottom * factor,
        }
    }
}

/// Everything a sprite needs to sample one frame.
///
/// Missing pieces are allowed here and reported when the asset is handed
/// to a sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameAsset {
    /// Atlas texture, if resolved.
    pub texture: Option<Texture>,
    /// Frame placement, if known.
    pub frame: Option<SourceFrame>,
    /// Cap insets baked into an embedded-border (9-patch) image, in points.
    pub embedded_insets: Option<CapInsets>,
}

impl FrameAsset {
    /// A frame from `texture` with no embedded insets.
    #[must_use]
    pub fn new(texture: Texture, frame: SourceFrame) -> Self {
        Self {
            texture: Some(texture),
            frame: Some(frame),
            embedded_insets: None,
        }
    }

    /// The whole of `texture` as a single untrimmed frame.
    #[must_use]
    pub fn whole_texture(texture: Texture) -> Self {
        Self::new(texture, SourceFrame::from_rect(Rect::ZERO))
    }

    /// Returns a copy carrying embedded-border insets.
    #[must_use]
    pub fn with_embedded_insets(mut self, insets: CapInsets) -> Self {
        self.embedded_insets = Some(insets);
        self
    }
}

/// Resolves named frames, typically from a sprite-sheet cache.
pub trait FrameProvider {
    /// Looks up the frame called `name`.
    fn frame_asset(&self, name: &str) -> Option<FrameAsset>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEX: Texture = Texture::new(TextureId(7), 256, 128);

    #[test]
    fn untrimmed_frame_has_zero_offsets() {
        let f = SourceFrame::from_rect(Rect::new(10.0, 10.0, 60.0, 40.0));
        assert_eq!(f.trim_offsets(), TrimOffsets::ZERO);
    }

    #[test]
    fn centered_trim_splits_evenly() {
        let f = SourceFrame::from_rect(Rect::new(0.0, 0.0, 80.0, 40.0))
            .with_trim(Vec2::ZERO, Size::new(100.0, 60.0));
        let t = f.trim_offsets();
        assert_eq!(t, TrimOffsets {
            left: 10.0,
            top: 10.0,
            right: 10.0,
            bottom: 10.0
        });
    }

    #[test]
    fn offset_shifts_trim_toward_one_side() {
        // Content sits 4 right and 2 up of center.
        let f = SourceFrame::from_rect(Rect::new(0.0, 0.0, 80.0, 40.0))
            .with_trim(Vec2::new(4.0, 2.0), Size::new(100.0, 60.0));
        let t = f.trim_offsets();
        assert_eq!(t.left, 14.0);
        assert_eq!(t.right, 6.0);
        assert_eq!(t.bottom, 12.0);
        assert_eq!(t.top, 8.0);
    }

    #[test]
    fn empty_rect_means_whole_texture() {
        let f = SourceFrame::from_rect(Rect::ZERO).normalized(&TEX, 2.0);
        assert_eq!(f.rect, Rect::new(0.0, 0.0, 128.0, 64.0));
        assert_eq!(f.original_size, Size::new(128.0, 64.0));
        assert!(f.validate().is_ok());
    }

    #[test]
    fn validate_reports_first_bad_field() {
        let bad_rect = SourceFrame::from_rect(Rect::new(0.0, 0.0, 0.0, 10.0));
        assert_eq!(
            bad_rect.validate(),
            Err(Scale9Error::InvalidFrame(FrameField::Rect))
        );

        let bad_original = SourceFrame::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0))
            .with_trim(Vec2::ZERO, Size::new(f64::INFINITY, 10.0));
        assert_eq!(
            bad_original.validate(),
            Err(Scale9Error::InvalidFrame(FrameField::OriginalSize))
        );

        let bad_offset = SourceFrame::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0))
            .with_trim(Vec2::new(f64::NAN, 0.0), Size::new(10.0, 10.0));
        assert_eq!(
            bad_offset.validate(),
            Err(Scale9Error::InvalidFrame(FrameField::Offset))
        );
    }

    #[test]
    fn zero_sized_atlas_is_rejected() {
        let t = Texture::new(TextureId(1), 0, 64);
        assert_eq!(
            t.validate(),
            Err(Scale9Error::InvalidFrame(FrameField::AtlasSize))
        );
        assert!(TEX.validate().is_ok());
    }
}
