// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot storage for sprites with generational handles.

use alloc::vec::Vec;

use kurbo::Size;
use understory_dirty::{CycleHandling, DirtyTracker};

use super::id::SpriteId;
use crate::dirty;
use crate::error::Scale9Error;
use crate::frame::FrameAsset;
use crate::grid::RenderingMode;
use crate::insets::CapInsets;
use crate::mesh::Rgba8;
use crate::node::Node;
use crate::sprite::Scale9Sprite;
use crate::state::VisualState;

/// Storage for all sprites of a scene.
///
/// Sprites are addressed by [`SpriteId`] handles. Internally, each sprite
/// occupies a slot; destroyed sprites are recycled via a free list, and
/// generation counters prevent stale handle access.
#[derive(Debug)]
pub struct SpriteStore {
    // -- Nodes --
    pub(crate) nodes: Vec<Node<Scale9Sprite>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Draw order cache --
    pub(crate) draw_order: Vec<u32>,
    pub(crate) order_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
    pub(crate) frame_index: u64,
}

impl Default for SpriteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            draw_order: Vec::new(),
            order_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            frame_index: 0,
        }
    }

    // -- Allocation API --

    /// Adds a sprite and returns its handle.
    ///
    /// The sprite starts visible at z order 0, and its mesh is built at the
    /// next [`evaluate`](Self::evaluate).
    pub fn create_sprite(&mut self, sprite: Scale9Sprite) -> SpriteId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generation[idx as usize] += 1;
            self.nodes[idx as usize] = Node::new(sprite);
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.nodes.push(Node::new(sprite));
            self.generation.push(0);
            idx
        };

        self.order_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::ORDER);
        self.dirty.mark(idx, dirty::GEOMETRY);

        SpriteId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a sprite, freeing its slot for reuse.
    ///
    /// Returns the sprite with its last mesh, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_sprite(&mut self, id: SpriteId) -> Scale9Sprite {
        self.validate(id);
        let idx = id.idx;

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        let node = core::mem::replace(
            &mut self.nodes[idx as usize],
            Node::new(Scale9Sprite::default()),
        );
        self.free_list.push(idx);
        self.order_dirty = true;
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::ORDER);
        node.into_inner()
    }

    /// Returns whether the given handle refers to a live sprite.
    #[must_use]
    pub fn is_alive(&self, id: SpriteId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Number of live sprites.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Returns the handle for a live slot index.
    #[must_use]
    pub fn id_at(&self, idx: u32) -> Option<SpriteId> {
        (idx < self.len && !self.free_list.contains(&idx)).then(|| SpriteId {
            idx,
            generation: self.generation[idx as usize],
        })
    }

    // -- Getters (read-only, no dirty marking) --

    /// The sprite behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn sprite(&self, id: SpriteId) -> &Scale9Sprite {
        self.validate(id);
        self.nodes[id.idx as usize].drawable()
    }

    /// Whether the sprite is drawn.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn is_visible(&self, id: SpriteId) -> bool {
        self.validate(id);
        self.nodes[id.idx as usize].is_visible()
    }

    /// The sprite's global z order.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn z_order(&self, id: SpriteId) -> i32 {
        self.validate(id);
        self.nodes[id.idx as usize].z_order()
    }

    // -- Mutation API (auto-marks dirty) --

    /// Mutable access to the sprite.
    ///
    /// Marks the geometry channel unconditionally; the sprite's own state
    /// decides whether evaluation actually rebuilds. Visual state changes
    /// made through this reference are not reported; use
    /// [`set_state`](Self::set_state) for those.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn sprite_mut(&mut self, id: SpriteId) -> &mut Scale9Sprite {
        self.validate(id);
        self.dirty.mark(id.idx, dirty::GEOMETRY);
        self.nodes[id.idx as usize].drawable_mut()
    }

    /// Switches the sprite to a new frame.
    ///
    /// See [`Scale9Sprite::update_frame`]. On error nothing changes and no
    /// channel is marked.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn update_frame(
        &mut self,
        id: SpriteId,
        asset: FrameAsset,
        cap_insets: CapInsets,
    ) -> Result<(), Scale9Error> {
        self.validate(id);
        self.nodes[id.idx as usize]
            .drawable_mut()
            .update_frame(asset, cap_insets)?;
        self.dirty.mark(id.idx, dirty::GEOMETRY);
        Ok(())
    }

    /// Sets the explicit cap insets, in points.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_cap_insets(&mut self, id: SpriteId, cap_insets: CapInsets) {
        self.sprite_mut(id).set_cap_insets(cap_insets);
    }

    /// Sets the size the sprite stretches to, in points.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_preferred_size(&mut self, id: SpriteId, size: Size) {
        self.sprite_mut(id).set_preferred_size(size);
    }

    /// Switches between one stretched quad and the 3×3 grid.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_rendering_mode(&mut self, id: SpriteId, mode: RenderingMode) {
        self.sprite_mut(id).set_rendering_mode(mode);
    }

    /// Sets the vertex color.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_color(&mut self, id: SpriteId, color: Rgba8) {
        self.sprite_mut(id).set_color(color);
    }

    /// Sets the visual state. Only an actual change marks the material
    /// channel.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_state(&mut self, id: SpriteId, state: VisualState) {
        self.validate(id);
        if self.nodes[id.idx as usize].drawable_mut().set_state(state) {
            self.dirty.mark(id.idx, dirty::MATERIAL);
        }
    }

    /// Shows or hides the sprite.
    ///
    /// Hidden sprites keep their pending changes; showing one again marks
    /// the geometry channel so they are applied at the next evaluation.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_visible(&mut self, id: SpriteId, visible: bool) {
        self.validate(id);
        if self.nodes[id.idx as usize].set_visible(visible) {
            self.order_dirty = true;
            self.dirty.mark(id.idx, dirty::ORDER);
            if visible {
                self.dirty.mark(id.idx, dirty::GEOMETRY);
            }
        }
    }

    /// Sets the global z order; lower values draw first.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_z_order(&mut self, id: SpriteId, z_order: i32) {
        self.validate(id);
        if self.nodes[id.idx as usize].set_z_order(z_order) {
            self.order_dirty = true;
            self.dirty.mark(id.idx, dirty::ORDER);
        }
    }

    // -- Index-based access (for backends) --

    /// The sprite in slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    #[must_use]
    pub fn sprite_at(&self, idx: u32) -> &Scale9Sprite {
        assert!(
            idx < self.len,
            "index {idx} out of bounds (len {})",
            self.len
        );
        self.nodes[idx as usize].drawable()
    }

    /// The z order of slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    #[must_use]
    pub fn z_order_at(&self, idx: u32) -> i32 {
        assert!(
            idx < self.len,
            "index {idx} out of bounds (len {})",
            self.len
        );
        self.nodes[idx as usize].z_order()
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: SpriteId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale SpriteId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Size;

    use super::*;
    use crate::config::Scale9Config;
    use crate::frame::{Texture, TextureId};
    use crate::sprite::GeometryState;

    fn sprite() -> Scale9Sprite {
        Scale9Sprite::from_asset(
            FrameAsset::whole_texture(Texture::new(TextureId(1), 30, 30)),
            CapInsets::uniform(10.0),
            Scale9Config::standard(),
        )
        .unwrap()
    }

    fn drained(store: &mut SpriteStore, ch: understory_dirty::Channel) -> Vec<u32> {
        store.dirty.drain(ch).deterministic().run().collect()
    }

    #[test]
    fn create_and_destroy() {
        let mut store = SpriteStore::new();
        let id = store.create_sprite(sprite());
        assert!(store.is_alive(id));
        assert_eq!(store.live_count(), 1);
        let s = store.destroy_sprite(id);
        assert!(!store.is_alive(id));
        assert_eq!(store.live_count(), 0);
        assert_eq!(s.preferred_size(), Size::new(30.0, 30.0));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = SpriteStore::new();
        let id1 = store.create_sprite(sprite());
        store.destroy_sprite(id1);
        let id2 = store.create_sprite(sprite());
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
        assert_eq!(store.id_at(id2.idx), Some(id2));
    }

    #[test]
    fn freed_slot_has_no_id() {
        let mut store = SpriteStore::new();
        let id = store.create_sprite(sprite());
        store.destroy_sprite(id);
        assert_eq!(store.id_at(id.idx), None);
        assert_eq!(store.id_at(7), None);
    }

    #[test]
    #[should_panic(expected = "stale SpriteId")]
    fn destroyed_handle_panics_on_get() {
        let mut store = SpriteStore::new();
        let id = store.create_sprite(sprite());
        store.destroy_sprite(id);
        let _ = store.sprite(id);
    }

    #[test]
    #[should_panic(expected = "stale SpriteId")]
    fn destroyed_handle_panics_on_set() {
        let mut store = SpriteStore::new();
        let id = store.create_sprite(sprite());
        store.destroy_sprite(id);
        store.set_preferred_size(id, Size::new(10.0, 10.0));
    }

    #[test]
    fn create_marks_geometry_and_order() {
        let mut store = SpriteStore::new();
        let id = store.create_sprite(sprite());
        assert_eq!(drained(&mut store, dirty::GEOMETRY), [id.idx]);
        assert_eq!(drained(&mut store, dirty::ORDER), [id.idx]);
    }

    #[test]
    fn setters_mark_geometry() {
        let mut store = SpriteStore::new();
        let id = store.create_sprite(sprite());
        let _ = drained(&mut store, dirty::GEOMETRY);

        store.set_preferred_size(id, Size::new(90.0, 40.0));
        assert_eq!(drained(&mut store, dirty::GEOMETRY), [id.idx]);
        assert_eq!(
            store.sprite(id).geometry_state(),
            GeometryState::Dirty,
            "store setters forward to the sprite"
        );

        store.set_color(id, Rgba8::new(255, 0, 0, 255));
        store.set_cap_insets(id, CapInsets::uniform(5.0));
        assert_eq!(
            drained(&mut store, dirty::GEOMETRY),
            [id.idx],
            "repeated marks coalesce"
        );
    }

    #[test]
    fn set_state_marks_material_only_on_change() {
        let mut store = SpriteStore::new();
        let id = store.create_sprite(sprite());

        store.set_state(id, VisualState::Normal);
        assert!(drained(&mut store, dirty::MATERIAL).is_empty());

        store.set_state(id, VisualState::Gray);
        assert_eq!(drained(&mut store, dirty::MATERIAL), [id.idx]);
        assert_eq!(store.sprite(id).state(), VisualState::Gray);
    }

    #[test]
    fn visibility_and_z_order_mark_order() {
        let mut store = SpriteStore::new();
        let id = store.create_sprite(sprite());
        let _ = drained(&mut store, dirty::ORDER);
        let _ = drained(&mut store, dirty::GEOMETRY);

        store.set_z_order(id, 0);
        assert!(drained(&mut store, dirty::ORDER).is_empty());

        store.set_z_order(id, 3);
        assert_eq!(store.z_order(id), 3);
        assert_eq!(store.z_order_at(id.idx), 3);
        assert_eq!(drained(&mut store, dirty::ORDER), [id.idx]);

        store.set_visible(id, false);
        assert!(!store.is_visible(id));
        assert_eq!(drained(&mut store, dirty::ORDER), [id.idx]);
        assert!(drained(&mut store, dirty::GEOMETRY).is_empty());

        store.set_visible(id, true);
        assert_eq!(drained(&mut store, dirty::ORDER), [id.idx]);
        assert_eq!(drained(&mut store, dirty::GEOMETRY), [id.idx]);
    }

    #[test]
    fn failed_update_marks_nothing() {
        let mut store = SpriteStore::new();
        let id = store.create_sprite(sprite());
        let _ = drained(&mut store, dirty::GEOMETRY);

        let bad = FrameAsset {
            texture: None,
            frame: None,
            embedded_insets: None,
        };
        assert!(store.update_frame(id, bad, CapInsets::ZERO).is_err());
        assert!(drained(&mut store, dirty::GEOMETRY).is_empty());
        assert_eq!(store.sprite(id).preferred_size(), Size::new(30.0, 30.0));
    }

    #[test]
    fn sprite_at_reads_slots() {
        let mut store = SpriteStore::new();
        let a = store.create_sprite(sprite());
        let b = store.create_sprite(Scale9Sprite::default());
        assert!(store.sprite_at(a.idx).texture().is_some());
        assert!(store.sprite_at(b.idx).texture().is_none());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn sprite_at_panics_past_len() {
        let store = SpriteStore::new();
        let _ = store.sprite_at(0);
    }
}
