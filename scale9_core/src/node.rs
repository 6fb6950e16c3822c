// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generic scene nodes holding a drawable component.
//!
//! A [`Node`] owns scene-level properties (visibility and z order) and
//! forwards visits to the component it holds. The component implements
//! [`Drawable`]: it brings its derived state up to date in
//! [`prepare`](Drawable::prepare) and hands finished geometry to the
//! renderer in [`draw`](Drawable::draw).

use crate::error::Scale9Error;
use crate::submit::MeshSubmitter;
use crate::trace::Tracer;

/// Result of [`Drawable::prepare`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrepareOutcome {
    /// Nothing was stale.
    Clean,
    /// Derived geometry was rebuilt.
    Rebuilt,
    /// The component has nothing to build from yet.
    Inert,
    /// The rebuild failed; the component has no geometry until the next
    /// successful one.
    Failed(Scale9Error),
}

/// A component that produces geometry for the renderer.
pub trait Drawable {
    /// Rebuilds derived state if it is stale.
    ///
    /// `key` identifies the component in trace events.
    fn prepare(&mut self, key: u32, tracer: &mut Tracer<'_>) -> PrepareOutcome;

    /// Submits current geometry, if any.
    fn draw(&self, z_order: i32, submitter: &mut dyn MeshSubmitter);
}

/// A scene node wrapping one [`Drawable`].
#[derive(Clone, Debug)]
pub struct Node<D> {
    drawable: D,
    visible: bool,
    z_order: i32,
}

impl<D> Node<D> {
    /// A visible node at z order 0.
    #[must_use]
    pub const fn new(drawable: D) -> Self {
        Self {
            drawable,
            visible: true,
            z_order: 0,
        }
    }

    /// The wrapped component.
    #[inline]
    #[must_use]
    pub const fn drawable(&self) -> &D {
        &self.drawable
    }

    /// Mutable access to the wrapped component.
    #[inline]
    pub fn drawable_mut(&mut self) -> &mut D {
        &mut self.drawable
    }

    /// Unwraps the component.
    #[must_use]
    pub fn into_inner(self) -> D {
        self.drawable
    }

    /// Whether the node is drawn.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the node. Returns `true` if the value changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }

    /// Global z order; lower values draw first.
    #[inline]
    #[must_use]
    pub const fn z_order(&self) -> i32 {
        self.z_order
    }

    /// Sets the z order. Returns `true` if the value changed.
    pub fn set_z_order(&mut self, z_order: i32) -> bool {
        let changed = self.z_order != z_order;
        self.z_order = z_order;
        changed
    }
}

impl<D: Drawable> Node<D> {
    /// Prepares and draws the component.
    ///
    /// Hidden nodes are skipped entirely, including the rebuild, and return
    /// `None`.
    pub fn visit(
        &mut self,
        key: u32,
        submitter: &mut dyn MeshSubmitter,
        tracer: &mut Tracer<'_>,
    ) -> Option<PrepareOutcome> {
        if !self.visible {
            return None;
        }
        let outcome = self.drawable.prepare(key, tracer);
        self.drawable.draw(self.z_order, submitter);
        Some(outcome)
    }
}
