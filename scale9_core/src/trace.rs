// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for geometry rebuilds.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! rebuild and evaluation code calls as it goes. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::error::Scale9Error;
use crate::grid::RenderingMode;
use crate::insets::InsetSource;
use crate::state::{MaterialId, VisualState};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a sprite's mesh was rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RebuildEvent {
    /// Diagnostic key of the sprite (store slot index).
    pub sprite: u32,
    /// Rendering mode used.
    pub mode: RenderingMode,
    /// Where the effective cap insets came from.
    pub inset_source: InsetSource,
    /// Whether the embedded-border sampling rules applied.
    pub embedded_border: bool,
    /// Whether the horizontal center collapsed.
    pub collapsed_x: bool,
    /// Whether the vertical center collapsed.
    pub collapsed_y: bool,
    /// Vertices in the new mesh.
    pub vertex_count: u32,
    /// Indices in the new mesh.
    pub index_count: u32,
}

/// Emitted when a rebuild failed and the sprite was left without a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RebuildFailedEvent {
    /// Diagnostic key of the sprite.
    pub sprite: u32,
    /// Why the rebuild failed.
    pub error: Scale9Error,
}

/// Emitted when a sprite's visual state changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateChangeEvent {
    /// Diagnostic key of the sprite.
    pub sprite: u32,
    /// New visual state.
    pub state: VisualState,
    /// Material the state resolves to.
    pub material: MaterialId,
}

/// Per-evaluation summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvaluateSummary {
    /// Evaluation counter.
    pub frame_index: u64,
    /// Live sprites in the store.
    pub live: u32,
    /// Meshes rebuilt.
    pub rebuilt: u32,
    /// Rebuilds that failed.
    pub failed: u32,
    /// Visual-state changes.
    pub state_changes: u32,
    /// Whether the draw order was recomputed.
    pub order_changed: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from sprites and the sprite store.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a successful rebuild.
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        _ = e;
    }

    /// Called after a failed rebuild.
    fn on_rebuild_failed(&mut self, e: &RebuildFailedEvent) {
        _ = e;
    }

    /// Called when a visual state changes.
    fn on_state_change(&mut self, e: &StateChangeEvent) {
        _ = e;
    }

    /// Called at the end of [`SpriteStore::evaluate`](crate::sprites::SpriteStore::evaluate).
    fn on_evaluate_summary(&mut self, s: &EvaluateSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`RebuildEvent`].
    #[inline]
    pub fn rebuild(&mut self, e: &RebuildEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rebuild(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RebuildFailedEvent`].
    #[inline]
    pub fn rebuild_failed(&mut self, e: &RebuildFailedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rebuild_failed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StateChangeEvent`].
    #[inline]
    pub fn state_change(&mut self, e: &StateChangeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_state_change(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`EvaluateSummary`].
    #[inline]
    pub fn evaluate_summary(&mut self, s: &EvaluateSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_evaluate_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
