// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-state selection: visual state, material, and blending.
//!
//! None of this touches geometry. Changing the visual state swaps the
//! material used for the next draw; the mesh stays as it is.

use core::fmt;

/// Visual state of a sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// Drawn with its regular material.
    #[default]
    Normal,
    /// Drawn desaturated, e.g. for a disabled control.
    Gray,
}

/// An opaque reference to a material (shader program plus fixed state)
/// owned by the renderer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

impl fmt::Debug for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MaterialId({})", self.0)
    }
}

/// Maps each [`VisualState`] to a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialTable {
    normal: MaterialId,
    gray: MaterialId,
}

impl MaterialTable {
    /// Material 0 for [`Normal`](VisualState::Normal), material 1 for
    /// [`Gray`](VisualState::Gray).
    pub const DEFAULT: Self = Self::new(MaterialId(0), MaterialId(1));

    /// Creates a table from the two materials.
    #[must_use]
    pub const fn new(normal: MaterialId, gray: MaterialId) -> Self {
        Self { normal, gray }
    }

    /// The material for `state`.
    #[inline]
    #[must_use]
    pub const fn resolve(&self, state: VisualState) -> MaterialId {
        match state {
            VisualState::Normal => self.normal,
            VisualState::Gray => self.gray,
        }
    }

    /// Replaces the material for `state`.
    pub fn set(&mut self, state: VisualState, material: MaterialId) {
        match state {
            VisualState::Normal => self.normal = material,
            VisualState::Gray => self.gray = material,
        }
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How fragment color combines with the framebuffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendFunc {
    /// No blending; the fragment replaces the destination.
    Disabled,
    /// `src + dst · (1 − src.a)`, for premultiplied colors.
    AlphaPremultiplied,
    /// `src · src.a + dst · (1 − src.a)`, for straight colors.
    AlphaNonPremultiplied,
    /// `src · src.a + dst`.
    Additive,
}

impl BlendFunc {
    /// The usual alpha blend for a texture with the given alpha convention.
    #[inline]
    #[must_use]
    pub const fn for_texture(premultiplied_alpha: bool) -> Self {
        if premultiplied_alpha {
            Self::AlphaPremultiplied
        } else {
            Self::AlphaNonPremultiplied
        }
    }
}
