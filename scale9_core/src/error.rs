// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for sprite initialization, frame updates, and rebuilds.
//!
//! All failures are local to one sprite. A failed initialization leaves the
//! sprite inert, a failed frame update leaves the previous frame and mesh in
//! place, and a failed rebuild leaves the sprite without a mesh until the
//! next successful one. Numeric degeneracy (oversized insets, a target
//! smaller than the fixed corners) is never an error.

use core::fmt;

/// The piece of frame metadata that was missing or unusable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameField {
    /// No frame was supplied at all.
    Frame,
    /// The frame rectangle is non-finite or has no area.
    Rect,
    /// The original (untrimmed) size is non-finite or has no area.
    OriginalSize,
    /// The trim offset is non-finite.
    Offset,
    /// The atlas texture reports zero pixel dimensions.
    AtlasSize,
}

impl fmt::Display for FrameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Frame => "frame",
            Self::Rect => "frame rect",
            Self::OriginalSize => "original size",
            Self::Offset => "trim offset",
            Self::AtlasSize => "atlas size",
        })
    }
}

/// Errors reported by [`Scale9Sprite`](crate::sprite::Scale9Sprite).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Scale9Error {
    /// The sprite has no texture to sample from.
    #[error("sprite has no texture")]
    MissingTexture,
    /// The source frame lacks usable metadata.
    #[error("source frame has no usable {0}")]
    InvalidFrame(FrameField),
    /// The vertex or index buffer could not be allocated.
    #[error("failed to allocate mesh buffers")]
    Allocation,
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn messages_name_the_field() {
        assert_eq!(
            Scale9Error::InvalidFrame(FrameField::OriginalSize).to_string(),
            "source frame has no usable original size"
        );
        assert_eq!(
            Scale9Error::MissingTexture.to_string(),
            "sprite has no texture"
        );
    }
}
