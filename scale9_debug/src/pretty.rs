// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use scale9_core::grid::RenderingMode;
use scale9_core::insets::InsetSource;
use scale9_core::trace::{
    EvaluateSummary, RebuildEvent, RebuildFailedEvent, StateChangeEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn mode_name(mode: RenderingMode) -> &'static str {
    match mode {
        RenderingMode::Simple => "simple",
        RenderingMode::Slice => "slice",
    }
}

fn source_name(source: InsetSource) -> &'static str {
    match source {
        InsetSource::Explicit => "explicit",
        InsetSource::Embedded => "embedded",
        InsetSource::DefaultSplit => "thirds",
    }
}

fn collapsed(x: bool, y: bool) -> &'static str {
    match (x, y) {
        (false, false) => "-",
        (true, false) => "x",
        (false, true) => "y",
        (true, true) => "xy",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        let border = if e.embedded_border { " border" } else { "" };
        let _ = writeln!(
            self.writer,
            "[rebuild] sprite={} mode={} insets={}{border} collapsed={} verts={} idx={}",
            e.sprite,
            mode_name(e.mode),
            source_name(e.inset_source),
            collapsed(e.collapsed_x, e.collapsed_y),
            e.vertex_count,
            e.index_count,
        );
    }

    fn on_rebuild_failed(&mut self, e: &RebuildFailedEvent) {
        let _ = writeln!(
            self.writer,
            "[rebuild:FAILED] sprite={} error={}",
            e.sprite, e.error,
        );
    }

    fn on_state_change(&mut self, e: &StateChangeEvent) {
        let _ = writeln!(
            self.writer,
            "[state] sprite={} state={:?} material={:?}",
            e.sprite, e.state, e.material,
        );
    }

    fn on_evaluate_summary(&mut self, s: &EvaluateSummary) {
        let order = if s.order_changed { "resorted" } else { "kept" };
        let _ = writeln!(
            self.writer,
            "[summary] frame={} live={} rebuilt={} failed={} states={} order={order}",
            s.frame_index, s.live, s.rebuilt, s.failed, s.state_changes,
        );
    }
}
