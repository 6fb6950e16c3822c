// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame evaluation, change tracking, and drawing.
//!
//! Evaluation follows a drain-process pattern for each dirty channel:
//!
//! 1. **ORDER**: If membership, visibility, or z order changed, rebuild the
//!    draw order (live sprites sorted by z order, then slot index).
//! 2. **GEOMETRY**: Drain dirty indices and prepare each live, visible
//!    sprite. Hidden sprites keep their pending state until shown again;
//!    failed rebuilds are marked again and retried on the next pass.
//! 3. **MATERIAL**: Drain dirty indices and report the new materials.
//! 4. **ORDER**: Drain and discard (the draw order was already rebuilt).
//!
//! [`SpriteChanges`] uses raw slot indices (`u32`) rather than
//! [`SpriteId`](super::SpriteId) handles so that backends can index directly
//! via [`sprite_at`](SpriteStore::sprite_at).

use alloc::vec::Vec;

use understory_dirty::DirtyTracker;

use super::store::SpriteStore;
use crate::dirty;
use crate::node::{Drawable, Node, PrepareOutcome};
use crate::submit::MeshSubmitter;
use crate::trace::{EvaluateSummary, StateChangeEvent, Tracer};

/// The set of changes produced by a single [`SpriteStore::evaluate`] call.
#[derive(Clone, Debug, Default)]
pub struct SpriteChanges {
    /// Sprites whose mesh was rebuilt.
    pub rebuilt: Vec<u32>,
    /// Sprites whose rebuild failed; they draw nothing until fixed.
    pub failed: Vec<u32>,
    /// Sprites whose visual state (and so material) changed.
    pub materials: Vec<u32>,
    /// Sprites added since the last evaluate.
    pub added: Vec<u32>,
    /// Sprites removed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the draw order was rebuilt.
    pub order_changed: bool,
}

impl SpriteChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.rebuilt.clear();
        self.failed.clear();
        self.materials.clear();
        self.added.clear();
        self.removed.clear();
        self.order_changed = false;
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rebuilt.is_empty()
            && self.failed.is_empty()
            && self.materials.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.order_changed
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl SpriteStore {
    /// Brings every visible sprite up to date and returns what changed.
    pub fn evaluate(&mut self, tracer: &mut Tracer<'_>) -> SpriteChanges {
        let mut changes = SpriteChanges::default();
        self.evaluate_into(&mut changes, tracer);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut SpriteChanges, tracer: &mut Tracer<'_>) {
        changes.clear();

        if self.order_dirty {
            self.rebuild_draw_order();
            changes.order_changed = true;
        }

        // Drain GEOMETRY channel and prepare what is due.
        let dirty_geometry: Vec<u32> = self
            .dirty
            .drain(dirty::GEOMETRY)
            .deterministic()
            .run()
            .collect();
        prepare_due(
            &mut self.nodes,
            &self.free_list,
            dirty_geometry,
            &mut self.dirty,
            changes,
            tracer,
        );

        // Drain MATERIAL channel.
        let dirty_materials: Vec<u32> = self
            .dirty
            .drain(dirty::MATERIAL)
            .deterministic()
            .run()
            .collect();
        for idx in dirty_materials {
            if self.free_list.contains(&idx) {
                continue;
            }
            let sprite = self.nodes[idx as usize].drawable();
            tracer.state_change(&StateChangeEvent {
                sprite: idx,
                state: sprite.state(),
                material: sprite.material(),
            });
            changes.materials.push(idx);
        }

        // Drain ORDER channel (just consume, handled above).
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::ORDER)
            .deterministic()
            .run()
            .collect();

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);

        tracer.evaluate_summary(&EvaluateSummary {
            frame_index: self.frame_index,
            live: count(self.live_count()),
            rebuilt: count(changes.rebuilt.len()),
            failed: count(changes.failed.len()),
            state_changes: count(changes.materials.len()),
            order_changed: changes.order_changed,
        });
        self.frame_index += 1;
    }

    /// Submits every visible sprite, in draw order, and returns how many
    /// sprites failed to rebuild on the way.
    ///
    /// Sprites that are still stale (mutated after the last evaluate, or
    /// whose last rebuild failed) are prepared on the way. A failure here
    /// stays marked, so the next [`evaluate`](Self::evaluate) retries it and
    /// lists it in [`SpriteChanges::failed`].
    pub fn draw(
        &mut self,
        submitter: &mut dyn MeshSubmitter,
        tracer: &mut Tracer<'_>,
    ) -> u32 {
        if self.order_dirty {
            self.rebuild_draw_order();
        }
        visit_in_order(
            &mut self.nodes,
            &self.draw_order,
            &mut self.dirty,
            submitter,
            tracer,
        )
    }

    /// Live sprite indices sorted by z order, then slot index.
    ///
    /// Hidden sprites are included; [`draw`](Self::draw) skips them.
    #[must_use]
    pub fn draw_order(&self) -> &[u32] {
        &self.draw_order
    }

    /// Number of completed evaluations.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    fn rebuild_draw_order(&mut self) {
        self.draw_order.clear();
        for idx in 0..self.len {
            if !self.free_list.contains(&idx) {
                self.draw_order.push(idx);
            }
        }
        let nodes = &self.nodes;
        self.draw_order
            .sort_by_key(|&idx| (nodes[idx as usize].z_order(), idx));
        self.order_dirty = false;
    }
}

/// Prepares every live, visible node in `due` and sorts the outcomes into
/// `changes`. Failed nodes are marked on [`dirty::GEOMETRY`] again so the
/// next evaluation retries and reports them.
fn prepare_due<D: Drawable>(
    nodes: &mut [Node<D>],
    free_list: &[u32],
    due: impl IntoIterator<Item = u32>,
    tracker: &mut DirtyTracker<u32>,
    changes: &mut SpriteChanges,
    tracer: &mut Tracer<'_>,
) {
    for idx in due {
        if free_list.contains(&idx) {
            continue;
        }
        let node = &mut nodes[idx as usize];
        if !node.is_visible() {
            continue;
        }
        match node.drawable_mut().prepare(idx, tracer) {
            PrepareOutcome::Rebuilt => changes.rebuilt.push(idx),
            PrepareOutcome::Failed(_) => changes.failed.push(idx),
            PrepareOutcome::Clean | PrepareOutcome::Inert => {}
        }
    }
    for &idx in &changes.failed {
        tracker.mark(idx, dirty::GEOMETRY);
    }
}

/// Visits `order` front to back. Returns the number of failed prepares,
/// each of which is marked on [`dirty::GEOMETRY`] again.
fn visit_in_order<D: Drawable>(
    nodes: &mut [Node<D>],
    order: &[u32],
    tracker: &mut DirtyTracker<u32>,
    submitter: &mut dyn MeshSubmitter,
    tracer: &mut Tracer<'_>,
) -> u32 {
    let mut failed = 0;
    for &idx in order {
        let outcome = nodes[idx as usize].visit(idx, submitter, tracer);
        if matches!(outcome, Some(PrepareOutcome::Failed(_))) {
            tracker.mark(idx, dirty::GEOMETRY);
            failed += 1;
        }
    }
    failed
}
