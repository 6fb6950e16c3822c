// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan for nine-slice sprites.
//!
//! This crate sits between [`scale9_core`]'s sprite store and a GPU backend.
//! [`RenderPlan`] implements [`MeshSubmitter`](scale9_core::submit::MeshSubmitter):
//! every submitted mesh is appended to one shared vertex buffer and one
//! shared `u32` index buffer, and consecutive draws that share texture,
//! material, and blend function are merged into a single [`DrawBatch`].
//!
//! A backend uploads [`RenderPlan::vertex_bytes`] and
//! [`RenderPlan::index_bytes`] once per frame and issues one indexed draw
//! per batch.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod plan;

pub use plan::{BatchKey, DrawBatch, RenderPlan};
