// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite storage and per-frame evaluation.
//!
//! A [`SpriteStore`] owns any number of [`Scale9Sprite`]s, each wrapped in a
//! [`Node`] that carries visibility and a global z order. Sprites are
//! addressed by [`SpriteId`], a generational handle that becomes stale when
//! the sprite is destroyed.
//!
//! Store setters forward to the sprite and mark the matching dirty channel
//! (see [`dirty`](crate::dirty)). [`evaluate`](SpriteStore::evaluate)
//! drains the channels, rebuilds stale meshes of visible sprites, and
//! reports what changed as [`SpriteChanges`].
//! [`draw`](SpriteStore::draw) then submits every visible sprite in z order.
//!
//! [`Scale9Sprite`]: crate::sprite::Scale9Sprite
//! [`Node`]: crate::node::Node

mod evaluate;
mod id;
mod store;

pub use evaluate::SpriteChanges;
pub use id::SpriteId;
pub use store::SpriteStore;
