// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The sprite store uses multi-channel dirty tracking (via
//! [`understory_dirty`]) to know which sprites need attention at the next
//! evaluation. Each channel represents an independent category of change.
//! Sprites do not depend on each other, so every channel is local-only:
//! only the explicitly marked sprite appears in the drain output.
//!
//! - [`GEOMETRY`] is marked by any mutation that can affect the mesh. The
//!   sprite's own [`GeometryState`](crate::sprite::GeometryState) decides
//!   whether a rebuild is actually needed, so marking conservatively is
//!   cheap.
//! - [`MATERIAL`] is marked when a visual state changes.
//! - [`ORDER`] is marked on create, destroy, z-order, and visibility
//!   changes, and triggers a draw-order rebuild.
//!
//! # Consumption
//!
//! Callers never need to query dirty state directly. Each
//! [`SpriteStore::evaluate`](crate::sprites::SpriteStore::evaluate) call
//! drains all channels and surfaces the results as
//! [`SpriteChanges`](crate::sprites::SpriteChanges).

use understory_dirty::Channel;

/// Something that feeds the mesh changed.
pub const GEOMETRY: Channel = Channel::new(0);

/// Visual state changed; the material resolves differently.
pub const MATERIAL: Channel = Channel::new(1);

/// Membership, visibility, or z order changed.
pub const ORDER: Channel = Channel::new(2);
