// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: batched geometry for one frame.

use alloc::vec::Vec;

use kurbo::Rect;
use scale9_core::frame::TextureId;
use scale9_core::mesh::MeshVertex;
use scale9_core::state::{BlendFunc, MaterialId};
use scale9_core::submit::{DrawRequest, MeshSubmitter};

/// Pipeline state shared by every draw in a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BatchKey {
    /// Texture sampled.
    pub texture: TextureId,
    /// Material (shader program) used.
    pub material: MaterialId,
    /// Blend function.
    pub blend: BlendFunc,
}

/// One indexed draw over the plan's shared buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawBatch {
    /// Pipeline state.
    pub key: BatchKey,
    /// First index in [`RenderPlan::indices`].
    pub first_index: u32,
    /// Number of indices.
    pub index_count: u32,
    /// Number of sprites merged into this batch.
    pub sprites: u32,
}

/// Batched geometry for a single frame.
///
/// Draws are kept in submission order, so batches never reorder sprites:
/// only consecutive requests with equal [`BatchKey`]s are merged.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
    batches: Vec<DrawBatch>,
    bounds: Option<Rect>,
}

impl RenderPlan {
    /// Creates an empty render plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the plan for reuse, keeping its allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.batches.clear();
        self.bounds = None;
    }

    /// Whether nothing was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Shared vertex buffer.
    #[must_use]
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    /// Shared index buffer; indices address [`vertices`](Self::vertices).
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Batches in draw order.
    #[must_use]
    pub fn batches(&self) -> &[DrawBatch] {
        &self.batches
    }

    /// Vertex buffer as raw bytes, ready for upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes, ready for upload.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Union of the local bounds of every submitted mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Total sprites submitted.
    #[must_use]
    pub fn sprite_count(&self) -> u32 {
        self.batches.iter().map(|b| b.sprites).sum()
    }
}

impl MeshSubmitter for RenderPlan {
    fn submit(&mut self, request: &DrawRequest<'_>) {
        let mesh = request.mesh;
        if mesh.indices().is_empty() {
            return;
        }
        // A plan addresses at most u32::MAX vertices; later draws are dropped.
        let Ok(base) = u32::try_from(self.vertices.len()) else {
            return;
        };
        let Ok(first_index) = u32::try_from(self.indices.len()) else {
            return;
        };
        let Ok(index_count) = u32::try_from(mesh.indices().len()) else {
            return;
        };

        self.vertices.extend_from_slice(mesh.vertices());
        self.indices.extend(mesh.indices().iter().map(|&i| base + u32::from(i)));

        let bounds = mesh.bounds();
        self.bounds = Some(self.bounds.map_or(bounds, |b| b.union(bounds)));

        let key = BatchKey {
            texture: request.texture,
            material: request.material,
            blend: request.blend,
        };
        match self.batches.last_mut() {
            Some(last) if last.key == key => {
                last.index_count += index_count;
                last.sprites += 1;
            }
            _ => self.batches.push(DrawBatch {
                key,
                first_index,
                index_count,
                sprites: 1,
            }),
        }
    }
}
