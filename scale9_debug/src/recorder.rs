// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records, one tag byte each. [`decode`]
//! reads them back as an iterator of [`RecordedEvent`].

use scale9_core::error::{FrameField, Scale9Error};
use scale9_core::grid::RenderingMode;
use scale9_core::insets::InsetSource;
use scale9_core::state::{MaterialId, VisualState};
use scale9_core::trace::{
    EvaluateSummary, RebuildEvent, RebuildFailedEvent, StateChangeEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_REBUILD: u8 = 1;
const TAG_REBUILD_FAILED: u8 = 2;
const TAG_STATE_CHANGE: u8 = 3;
const TAG_EVALUATE_SUMMARY: u8 = 4;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_mode(&mut self, m: RenderingMode) {
        self.write_u8(match m {
            RenderingMode::Simple => 0,
            RenderingMode::Slice => 1,
        });
    }

    fn write_inset_source(&mut self, s: InsetSource) {
        self.write_u8(match s {
            InsetSource::Explicit => 0,
            InsetSource::Embedded => 1,
            InsetSource::DefaultSplit => 2,
        });
    }

    fn write_state(&mut self, s: VisualState) {
        self.write_u8(match s {
            VisualState::Normal => 0,
            VisualState::Gray => 1,
        });
    }

    /// Errors take two bytes: kind, then frame field (0 when unused).
    fn write_error(&mut self, e: Scale9Error) {
        let (kind, field) = match e {
            Scale9Error::MissingTexture => (0, 0),
            Scale9Error::InvalidFrame(field) => (
                1,
                match field {
                    FrameField::Frame => 0,
                    FrameField::Rect => 1,
                    FrameField::OriginalSize => 2,
                    FrameField::Offset => 3,
                    FrameField::AtlasSize => 4,
                },
            ),
            Scale9Error::Allocation => (2, 0),
        };
        self.write_u8(kind);
        self.write_u8(field);
    }
}

impl TraceSink for RecorderSink {
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        self.write_u8(TAG_REBUILD);
        self.write_u32(e.sprite);
        self.write_mode(e.mode);
        self.write_inset_source(e.inset_source);
        self.write_bool(e.embedded_border);
        self.write_bool(e.collapsed_x);
        self.write_bool(e.collapsed_y);
        self.write_u32(e.vertex_count);
        self.write_u32(e.index_count);
    }

    fn on_rebuild_failed(&mut self, e: &RebuildFailedEvent) {
        self.write_u8(TAG_REBUILD_FAILED);
        self.write_u32(e.sprite);
        self.write_error(e.error);
    }

    fn on_state_change(&mut self, e: &StateChangeEvent) {
        self.write_u8(TAG_STATE_CHANGE);
        self.write_u32(e.sprite);
        self.write_state(e.state);
        self.write_u32(e.material.0);
    }

    fn on_evaluate_summary(&mut self, s: &EvaluateSummary) {
        self.write_u8(TAG_EVALUATE_SUMMARY);
        self.write_u64(s.frame_index);
        self.write_u32(s.live);
        self.write_u32(s.rebuilt);
        self.write_u32(s.failed);
        self.write_u32(s.state_changes);
        self.write_bool(s.order_changed);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`RebuildEvent`].
    Rebuild(RebuildEvent),
    /// A [`RebuildFailedEvent`].
    RebuildFailed(RebuildFailedEvent),
    /// A [`StateChangeEvent`].
    StateChange(StateChangeEvent),
    /// An [`EvaluateSummary`].
    EvaluateSummary(EvaluateSummary),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        let [v] = self.take::<1>()?;
        Some(v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_mode(&mut self) -> Option<RenderingMode> {
        Some(match self.read_u8()? {
            0 => RenderingMode::Simple,
            _ => RenderingMode::Slice,
        })
    }

    fn read_inset_source(&mut self) -> Option<InsetSource> {
        Some(match self.read_u8()? {
            0 => InsetSource::Explicit,
            1 => InsetSource::Embedded,
            _ => InsetSource::DefaultSplit,
        })
    }

    fn read_state(&mut self) -> Option<VisualState> {
        Some(match self.read_u8()? {
            0 => VisualState::Normal,
            _ => VisualState::Gray,
        })
    }

    fn read_error(&mut self) -> Option<Scale9Error> {
        let kind = self.read_u8()?;
        let field = self.read_u8()?;
        Some(match kind {
            0 => Scale9Error::MissingTexture,
            1 => Scale9Error::InvalidFrame(match field {
                0 => FrameField::Frame,
                1 => FrameField::Rect,
                2 => FrameField::OriginalSize,
                3 => FrameField::Offset,
                _ => FrameField::AtlasSize,
            }),
            _ => Scale9Error::Allocation,
        })
    }

    fn decode_rebuild(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Rebuild(RebuildEvent {
            sprite: self.read_u32()?,
            mode: self.read_mode()?,
            inset_source: self.read_inset_source()?,
            embedded_border: self.read_bool()?,
            collapsed_x: self.read_bool()?,
            collapsed_y: self.read_bool()?,
            vertex_count: self.read_u32()?,
            index_count: self.read_u32()?,
        }))
    }

    fn decode_rebuild_failed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RebuildFailed(RebuildFailedEvent {
            sprite: self.read_u32()?,
            error: self.read_error()?,
        }))
    }

    fn decode_state_change(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::StateChange(StateChangeEvent {
            sprite: self.read_u32()?,
            state: self.read_state()?,
            material: MaterialId(self.read_u32()?),
        }))
    }

    fn decode_evaluate_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::EvaluateSummary(EvaluateSummary {
            frame_index: self.read_u64()?,
            live: self.read_u32()?,
            rebuilt: self.read_u32()?,
            failed: self.read_u32()?,
            state_changes: self.read_u32()?,
            order_changed: self.read_bool()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_REBUILD => self.decode_rebuild(),
            TAG_REBUILD_FAILED => self.decode_rebuild_failed(),
            TAG_STATE_CHANGE => self.decode_state_change(),
            TAG_EVALUATE_SUMMARY => self.decode_evaluate_summary(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
