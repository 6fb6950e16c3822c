// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract between sprites and the renderer.
//!
//! `scale9_core` never talks to a graphics API. Drawing a sprite means
//! handing a [`DrawRequest`] to a [`MeshSubmitter`], which the renderer
//! implements (see `scale9_render::RenderPlan` for a batching one). The
//! request borrows the sprite's mesh for the duration of the call only.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame(store: &mut SpriteStore, plan: &mut RenderPlan) {
//!     // Mutate: insets, sizes, frames, states.
//!     store.set_preferred_size(button, Size::new(240.0, 64.0));
//!
//!     // Evaluate: rebuild dirty meshes, resolve draw order.
//!     let changes = store.evaluate(&mut Tracer::none());
//!
//!     // Draw: submit every visible sprite in z order.
//!     plan.clear();
//!     store.draw(plan, &mut Tracer::none());
//! }
//! ```

use crate::frame::TextureId;
use crate::mesh::Mesh;
use crate::state::{BlendFunc, MaterialId};

/// Everything a renderer needs to draw one sprite.
#[derive(Clone, Copy, Debug)]
pub struct DrawRequest<'a> {
    /// Geometry to draw.
    pub mesh: &'a Mesh,
    /// Texture the mesh samples.
    pub texture: TextureId,
    /// Material selected by the sprite's visual state.
    pub material: MaterialId,
    /// Blend function.
    pub blend: BlendFunc,
    /// Global z order; requests arrive sorted by it.
    pub z_order: i32,
}

/// Receives draw requests, typically to record them into a command list.
pub trait MeshSubmitter {
    /// Accepts one draw.
    fn submit(&mut self, request: &DrawRequest<'_>);
}
