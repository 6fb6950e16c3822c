// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter for recorded traces.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes a JSON array with one object per event. Rebuild, failure, and
//! state events carry the index of the evaluation they belong to, derived
//! from the next [`EvaluateSummary`](scale9_core::trace::EvaluateSummary) in
//! the stream.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a JSON array.
///
/// Events recorded before the first summary belong to frame 0; after a
/// summary for frame `n`, following events belong to frame `n + 1`.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut frame: u64 = 0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Rebuild(e) => {
                events.push(json!({
                    "event": "Rebuild",
                    "frame": frame,
                    "sprite": e.sprite,
                    "args": {
                        "mode": format!("{:?}", e.mode),
                        "inset_source": format!("{:?}", e.inset_source),
                        "embedded_border": e.embedded_border,
                        "collapsed_x": e.collapsed_x,
                        "collapsed_y": e.collapsed_y,
                        "vertex_count": e.vertex_count,
                        "index_count": e.index_count,
                    }
                }));
            }
            RecordedEvent::RebuildFailed(e) => {
                events.push(json!({
                    "event": "RebuildFailed",
                    "frame": frame,
                    "sprite": e.sprite,
                    "args": {
                        "error": e.error.to_string(),
                    }
                }));
            }
            RecordedEvent::StateChange(e) => {
                events.push(json!({
                    "event": "StateChange",
                    "frame": frame,
                    "sprite": e.sprite,
                    "args": {
                        "state": format!("{:?}", e.state),
                        "material": e.material.0,
                    }
                }));
            }
            RecordedEvent::EvaluateSummary(s) => {
                events.push(json!({
                    "event": "EvaluateSummary",
                    "frame": s.frame_index,
                    "args": {
                        "live": s.live,
                        "rebuilt": s.rebuilt,
                        "failed": s.failed,
                        "state_changes": s.state_changes,
                        "order_changed": s.order_changed,
                    }
                }));
                frame = s.frame_index + 1;
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}
