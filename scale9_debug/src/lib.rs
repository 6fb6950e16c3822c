// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for scale9 diagnostics.
//!
//! This crate provides [`TraceSink`](scale9_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`json::export`]: writes a JSON event list from recorded bytes.
//!
//! [`dump`] prints meshes and their wireframes as text.

pub mod dump;
pub mod json;
pub mod pretty;
pub mod recorder;
