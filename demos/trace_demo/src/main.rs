// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated frame loop that exercises sprites, batching, and diagnostics.
//!
//! Builds a small UI out of frames from an in-memory atlas, animates it for
//! 60 frames, and records every evaluation to both a
//! [`PrettyPrintSink`](scale9_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](scale9_debug::recorder::RecorderSink). Finally it dumps
//! one mesh and exports the recording as JSON.

use std::fs::File;
use std::io::BufWriter;

use kurbo::{Rect, Size, Vec2};
use scale9_core::config::Scale9Config;
use scale9_core::frame::{FrameAsset, FrameProvider, SourceFrame, Texture, TextureId};
use scale9_core::insets::CapInsets;
use scale9_core::sprite::Scale9Sprite;
use scale9_core::sprites::SpriteStore;
use scale9_core::state::VisualState;
use scale9_core::trace::{
    EvaluateSummary, RebuildEvent, RebuildFailedEvent, StateChangeEvent, TraceSink, Tracer,
};
use scale9_debug::pretty::PrettyPrintSink;
use scale9_debug::recorder::RecorderSink;
use scale9_render::RenderPlan;

const FRAME_COUNT: u64 = 60;

/// A 256×256 atlas with a handful of named frames.
struct Atlas {
    texture: Texture,
}

impl FrameProvider for Atlas {
    fn frame_asset(&self, name: &str) -> Option<FrameAsset> {
        let asset = match name {
            "button" => FrameAsset::new(
                self.texture,
                SourceFrame::from_rect(Rect::new(0.0, 0.0, 48.0, 32.0)),
            ),
            // Packed with a 1px border and its own insets.
            "panel" => FrameAsset::new(
                self.texture,
                SourceFrame::from_rect(Rect::new(64.0, 0.0, 130.0, 66.0)),
            )
            .with_embedded_insets(CapInsets::uniform(12.0)),
            // Stored rotated and trimmed by the packer.
            "tab" => FrameAsset::new(
                self.texture,
                SourceFrame::from_rect(Rect::new(0.0, 64.0, 40.0, 120.0))
                    .with_rotation(true)
                    .with_trim(Vec2::new(1.0, -1.0), Size::new(44.0, 60.0)),
            ),
            _ => return None,
        };
        Some(asset)
    }
}

/// Forwards every event to two sinks.
struct Tee<'a> {
    pretty: &'a mut PrettyPrintSink,
    recorder: &'a mut RecorderSink,
}

impl TraceSink for Tee<'_> {
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        self.pretty.on_rebuild(e);
        self.recorder.on_rebuild(e);
    }

    fn on_rebuild_failed(&mut self, e: &RebuildFailedEvent) {
        self.pretty.on_rebuild_failed(e);
        self.recorder.on_rebuild_failed(e);
    }

    fn on_state_change(&mut self, e: &StateChangeEvent) {
        self.pretty.on_state_change(e);
        self.recorder.on_state_change(e);
    }

    fn on_evaluate_summary(&mut self, s: &EvaluateSummary) {
        self.pretty.on_evaluate_summary(s);
        self.recorder.on_evaluate_summary(s);
    }
}

fn load(atlas: &Atlas, name: &str, insets: CapInsets) -> Scale9Sprite {
    let mut sprite = Scale9Sprite::new(Scale9Config::standard());
    sprite
        .init_with_frame_name(atlas, name, insets)
        .unwrap_or_else(|e| panic!("frame {name:?}: {e}"));
    sprite
}

fn main() {
    let atlas = Atlas {
        texture: Texture::new(TextureId(1), 256, 256).with_premultiplied_alpha(true),
    };

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- scene -------------------------------------------------------------
    let mut store = SpriteStore::new();
    let panel = store.create_sprite(load(&atlas, "panel", CapInsets::ZERO));
    let button = store.create_sprite(load(&atlas, "button", CapInsets::uniform(8.0)));
    let tab = store.create_sprite(load(&atlas, "tab", CapInsets::new(6.0, 10.0, 6.0, 10.0)));
    store.set_z_order(panel, -1);
    store.set_preferred_size(panel, Size::new(320.0, 240.0));

    // Missing frames are reported, not fatal.
    let mut scratch = Scale9Sprite::default();
    if let Err(e) = scratch.init_with_frame_name(&atlas, "missing", CapInsets::ZERO) {
        println!("[demo] lookup of \"missing\" failed: {e}");
    }

    let mut plan = RenderPlan::new();

    // -- simulated loop ----------------------------------------------------
    for frame_index in 0..FRAME_COUNT {
        // Mutate.
        let t = frame_index as f64 / FRAME_COUNT as f64;
        store.set_preferred_size(button, Size::new(48.0 + 160.0 * t, 32.0));
        if frame_index % 20 == 10 {
            store.set_state(button, VisualState::Gray);
        } else if frame_index % 20 == 0 {
            store.set_state(button, VisualState::Normal);
        }
        if frame_index == 30 {
            store.set_visible(tab, false);
        }
        if frame_index == 45 {
            // Squeeze below the fixed caps so the center collapses.
            store.set_preferred_size(tab, Size::new(8.0, 8.0));
            store.set_visible(tab, true);
        }

        // Evaluate.
        let mut tee = Tee {
            pretty: &mut pretty,
            recorder: &mut recorder,
        };
        let changes = store.evaluate(&mut Tracer::new(&mut tee));
        debug_assert!(changes.failed.is_empty(), "atlas frames are valid");

        // Draw.
        plan.clear();
        let failed = store.draw(&mut plan, &mut Tracer::none());
        debug_assert_eq!(failed, 0, "atlas frames are valid");
    }

    // -- report ------------------------------------------------------------
    println!(
        "[demo] last frame: {} sprites in {} batches, {} vertices, {} bytes of vertex data",
        plan.sprite_count(),
        plan.batches().len(),
        plan.vertices().len(),
        plan.vertex_bytes().len(),
    );
    for batch in plan.batches() {
        println!(
            "[demo]   batch texture={:?} material={:?} blend={:?} indices={}..{}",
            batch.key.texture,
            batch.key.material,
            batch.key.blend,
            batch.first_index,
            batch.first_index + batch.index_count,
        );
    }

    if let Some(mesh) = store.sprite(tab).mesh() {
        println!("[demo] tab mesh:");
        scale9_debug::dump::write_mesh(mesh, &mut std::io::stdout())
            .expect("failed to write mesh dump");
    }

    // -- export JSON -------------------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    scale9_debug::json::export(recorder.as_bytes(), &mut writer)
        .expect("failed to write JSON trace");

    println!("Wrote {path} ({FRAME_COUNT} frames)");
}
