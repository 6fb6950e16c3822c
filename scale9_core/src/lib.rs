// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nine-slice sprite geometry.
//!
//! `scale9_core` turns a rectangular region of a texture atlas plus four cap
//! insets into a mesh that can be stretched to any size while the corners
//! keep their original pixels, the edges stretch along one axis, and the
//! center stretches along both. It is `no_std` compatible (with `alloc`) and
//! never talks to a graphics API: finished meshes are handed to a
//! [`MeshSubmitter`](submit::MeshSubmitter) that the renderer implements.
//!
//! # Architecture
//!
//! ```text
//!   FrameAsset + CapInsets
//!       │
//!       ▼
//!   Scale9Sprite (config, GeometryState)
//!       │  prepare()
//!       ▼
//!   resolve_cap_insets ──► compute_uv ────────┐
//!                     └──► compute_positions ─┴──► assemble ──► Mesh
//!                                                               │
//!   SpriteStore::evaluate() ──► SpriteChanges                   │
//!   SpriteStore::draw() ──► DrawRequest ──► MeshSubmitter ◄─────┘
//! ```
//!
//! **[`insets`]**: Cap insets and the rule that picks explicit, embedded,
//! or default (thirds) insets for a frame.
//!
//! **[`frame`]**: Textures, source frames (rect, rotation, trim), and the
//! [`FrameProvider`](frame::FrameProvider) lookup seam.
//!
//! **[`grid`]**, **[`uv`]**, **[`vertex`]**, **[`mesh`]**: The geometry
//! pipeline: boundary lists, texture coordinates, vertex positions, and the
//! final vertex/index buffers.
//!
//! **[`sprite`]**: [`Scale9Sprite`](sprite::Scale9Sprite), which owns the
//! configuration and lazily rebuilds its mesh.
//!
//! **[`node`]**: Scene nodes holding a [`Drawable`](node::Drawable)
//! component with visibility and z order.
//!
//! **[`sprites`]**: Generational sprite storage with per-frame evaluation
//! and z-ordered drawing.
//!
//! **[`dirty`]**: Dirty-tracking channels via `understory_dirty`.
//!
//! **[`state`]**: Visual states, materials, and blend functions.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! rebuild instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Coordinate conventions
//!
//! Frame rects are in atlas points with a top-left origin. Meshes are in
//! points with a bottom-left origin: vertex row 0 is the bottom of the
//! sprite. Texture coordinates are normalized to the atlas.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod dirty;
pub mod error;
pub mod frame;
pub mod grid;
pub mod insets;
pub mod mesh;
pub mod node;
pub mod sprite;
pub mod sprites;
pub mod state;
pub mod submit;
pub mod trace;
pub mod uv;
pub mod vertex;
