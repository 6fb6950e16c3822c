// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The nine-slice sprite component.
//!
//! [`Scale9Sprite`] owns its configuration (frame, cap insets, preferred
//! size, rendering mode, color) and a mesh derived from it. Mutations only
//! flip the [`GeometryState`] to [`Dirty`](GeometryState::Dirty); the mesh is
//! rebuilt lazily by [`Drawable::prepare`], so any number of mutations
//! between two draws cost a single rebuild.
//!
//! A rebuild runs the whole pipeline from scratch:
//!
//! ```text
//!   cap insets ─► resolve_cap_insets ─┬─► compute_uv ────────┐
//!                                     └─► compute_positions ─┴─► assemble ─► Mesh
//! ```
//!
//! Frame rects, insets, and sizes are given in points. The pipeline runs in
//! pixels using the configured content scale factor.

use kurbo::{Rect, Size, Vec2};

use crate::config::Scale9Config;
use crate::error::{FrameField, Scale9Error};
use crate::frame::{FrameAsset, FrameProvider, SourceFrame, Texture};
use crate::grid::RenderingMode;
use crate::insets::{CapInsets, ResolvedInsets, resolve_cap_insets};
use crate::mesh::{Mesh, Rgba8, assemble};
use crate::node::{Drawable, PrepareOutcome};
use crate::state::{BlendFunc, MaterialId, MaterialTable, VisualState};
use crate::submit::{DrawRequest, MeshSubmitter};
use crate::trace::{RebuildEvent, RebuildFailedEvent, Tracer};
use crate::uv::{UvParams, compute_uv};
use crate::vertex::{PositionGrid, PositionParams, compute_positions};

/// Whether a sprite's mesh matches its configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GeometryState {
    /// The mesh is current.
    Clean,
    /// Something changed since the last rebuild.
    #[default]
    Dirty,
}

/// A sprite that stretches its center and edges while keeping its corners.
#[derive(Clone, Debug)]
pub struct Scale9Sprite {
    config: Scale9Config,
    texture: Option<Texture>,
    frame: Option<SourceFrame>,
    embedded_insets: Option<CapInsets>,
    cap_insets: CapInsets,
    preferred_size: Size,
    mode: RenderingMode,
    color: Rgba8,
    state: VisualState,
    materials: MaterialTable,
    blend: BlendFunc,
    blend_overridden: bool,
    geometry: GeometryState,
    mesh: Option<Mesh>,
    resolved: Option<ResolvedInsets>,
}

impl Scale9Sprite {
    /// An inert sprite with no texture.
    #[must_use]
    pub fn new(config: Scale9Config) -> Self {
        Self {
            config,
            texture: None,
            frame: None,
            embedded_insets: None,
            cap_insets: CapInsets::ZERO,
            preferred_size: Size::ZERO,
            mode: RenderingMode::Slice,
            color: Rgba8::WHITE,
            state: VisualState::Normal,
            materials: MaterialTable::DEFAULT,
            blend: BlendFunc::AlphaPremultiplied,
            blend_overridden: false,
            geometry: GeometryState::Dirty,
            mesh: None,
            resolved: None,
        }
    }

    /// Creates a sprite showing `asset` with the given explicit insets.
    pub fn from_asset(
        asset: FrameAsset,
        cap_insets: CapInsets,
        config: Scale9Config,
    ) -> Result<Self, Scale9Error> {
        let mut sprite = Self::new(config);
        sprite.init(asset, cap_insets)?;
        Ok(sprite)
    }

    /// Attaches `asset` to the sprite.
    ///
    /// Fails with [`Scale9Error::MissingTexture`] if the asset has no
    /// texture; the sprite is left untouched.
    pub fn init(&mut self, asset: FrameAsset, cap_insets: CapInsets) -> Result<(), Scale9Error> {
        if asset.texture.is_none() {
            return Err(Scale9Error::MissingTexture);
        }
        self.update_frame(asset, cap_insets)
    }

    /// Looks up the frame called `name` and attaches it.
    pub fn init_with_frame_name(
        &mut self,
        provider: &dyn FrameProvider,
        name: &str,
        cap_insets: CapInsets,
    ) -> Result<(), Scale9Error> {
        let asset = provider
            .frame_asset(name)
            .ok_or(Scale9Error::InvalidFrame(FrameField::Frame))?;
        self.init(asset, cap_insets)
    }

    /// Switches to a new frame.
    ///
    /// An asset without a texture keeps the current one. The preferred size
    /// resets to the frame's original size (less the embedded border, if
    /// any) and the blend function follows the texture's alpha convention
    /// unless it was overridden. On error nothing changes.
    pub fn update_frame(
        &mut self,
        asset: FrameAsset,
        cap_insets: CapInsets,
    ) -> Result<(), Scale9Error> {
        let texture = asset
            .texture
            .or(self.texture)
            .ok_or(Scale9Error::MissingTexture)?;
        texture.validate()?;
        let frame = asset
            .frame
            .ok_or(Scale9Error::InvalidFrame(FrameField::Frame))?
            .normalized(&texture, self.config.scale_factor());
        frame.validate()?;

        self.texture = Some(texture);
        self.frame = Some(frame);
        self.embedded_insets = asset.embedded_insets.filter(|e| !e.is_zero());
        self.cap_insets = cap_insets.sanitized();
        if !self.blend_overridden {
            self.blend = BlendFunc::for_texture(texture.premultiplied_alpha);
        }
        self.preferred_size = self.natural_size();
        self.geometry = GeometryState::Dirty;
        Ok(())
    }

    /// A new sprite on the same frame with different insets.
    ///
    /// The trim offset is dropped, so the copy treats the frame as
    /// untrimmed. Color, visual state, and materials carry over.
    pub fn resizable_with_cap_insets(&self, cap_insets: CapInsets) -> Result<Self, Scale9Error> {
        let texture = self.texture.ok_or(Scale9Error::MissingTexture)?;
        let frame = self
            .frame
            .ok_or(Scale9Error::InvalidFrame(FrameField::Frame))?;
        let mut sprite = Self::new(self.config);
        sprite.color = self.color;
        sprite.state = self.state;
        sprite.materials = self.materials;
        sprite.mode = self.mode;
        sprite.init(
            FrameAsset {
                texture: Some(texture),
                frame: Some(SourceFrame {
                    offset: Vec2::ZERO,
                    ..frame
                }),
                embedded_insets: self.embedded_insets,
            },
            cap_insets,
        )?;
        Ok(sprite)
    }

    // -- Insets ----------------------------------------------------------

    /// Explicit cap insets, in points. All zero means "use the embedded or
    /// default insets".
    #[inline]
    #[must_use]
    pub fn cap_insets(&self) -> CapInsets {
        self.cap_insets
    }

    /// Sets explicit cap insets. The preferred size is kept. Non-finite
    /// sides become zero.
    pub fn set_cap_insets(&mut self, cap_insets: CapInsets) {
        let cap_insets = cap_insets.sanitized();
        if self.cap_insets != cap_insets {
            self.cap_insets = cap_insets;
            self.geometry = GeometryState::Dirty;
        }
    }

    /// The explicit insets as a center rectangle in the original image
    /// (top-left origin).
    #[must_use]
    pub fn cap_insets_rect(&self) -> Rect {
        self.cap_insets.center_rect(self.original_size())
    }

    /// Sets the explicit insets from a center rectangle in the original
    /// image (top-left origin).
    pub fn set_cap_insets_rect(&mut self, center: Rect) {
        self.set_cap_insets(CapInsets::from_center_rect(center, self.original_size()));
    }

    /// Left inset.
    #[must_use]
    pub fn inset_left(&self) -> f64 {
        self.cap_insets.left
    }

    /// Top inset.
    #[must_use]
    pub fn inset_top(&self) -> f64 {
        self.cap_insets.top
    }

    /// Right inset.
    #[must_use]
    pub fn inset_right(&self) -> f64 {
        self.cap_insets.right
    }

    /// Bottom inset.
    #[must_use]
    pub fn inset_bottom(&self) -> f64 {
        self.cap_insets.bottom
    }

    /// Sets the left inset, keeping the others.
    pub fn set_inset_left(&mut self, left: f64) {
        self.set_cap_insets(CapInsets {
            left,
            ..self.cap_insets
        });
    }

    /// Sets the top inset, keeping the others.
    pub fn set_inset_top(&mut self, top: f64) {
        self.set_cap_insets(CapInsets {
            top,
            ..self.cap_insets
        });
    }

    /// Sets the right inset, keeping the others.
    pub fn set_inset_right(&mut self, right: f64) {
        self.set_cap_insets(CapInsets {
            right,
            ..self.cap_insets
        });
    }

    /// Sets the bottom inset, keeping the others.
    pub fn set_inset_bottom(&mut self, bottom: f64) {
        self.set_cap_insets(CapInsets {
            bottom,
            ..self.cap_insets
        });
    }

    // -- Size and mode ---------------------------------------------------

    /// Size the mesh is built for, in points.
    #[inline]
    #[must_use]
    pub fn preferred_size(&self) -> Size {
        self.preferred_size
    }

    /// Sets the target size. Negative or non-finite components become zero.
    pub fn set_preferred_size(&mut self, size: Size) {
        let sanitize = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let size = Size::new(sanitize(size.width), sanitize(size.height));
        if self.preferred_size != size {
            self.preferred_size = size;
            self.geometry = GeometryState::Dirty;
        }
    }

    /// Untrimmed size of the current frame, in points, or zero when inert.
    #[must_use]
    pub fn original_size(&self) -> Size {
        self.frame.map_or(Size::ZERO, |f| f.original_size)
    }

    /// Rendering mode.
    #[inline]
    #[must_use]
    pub fn rendering_mode(&self) -> RenderingMode {
        self.mode
    }

    /// Sets the rendering mode. Explicit insets survive a round trip
    /// through [`RenderingMode::Simple`].
    pub fn set_rendering_mode(&mut self, mode: RenderingMode) {
        if self.mode != mode {
            self.mode = mode;
            self.geometry = GeometryState::Dirty;
        }
    }

    // -- Color -----------------------------------------------------------

    /// Display color; alpha is the opacity.
    #[inline]
    #[must_use]
    pub fn color(&self) -> Rgba8 {
        self.color
    }

    /// Sets the display color and opacity. Colors are baked into vertices,
    /// so a change dirties the geometry.
    pub fn set_color(&mut self, color: Rgba8) {
        if self.color != color {
            self.color = color;
            self.geometry = GeometryState::Dirty;
        }
    }

    /// Sets the opacity, keeping the color.
    pub fn set_opacity(&mut self, opacity: u8) {
        self.set_color(Rgba8 {
            a: opacity,
            ..self.color
        });
    }

    // -- Render state ----------------------------------------------------

    /// Visual state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> VisualState {
        self.state
    }

    /// Sets the visual state. Returns `true` if it changed. Geometry is not
    /// affected.
    pub fn set_state(&mut self, state: VisualState) -> bool {
        let changed = self.state != state;
        self.state = state;
        changed
    }

    /// Material for the current visual state.
    #[inline]
    #[must_use]
    pub fn material(&self) -> MaterialId {
        self.materials.resolve(self.state)
    }

    /// State-to-material table.
    #[inline]
    #[must_use]
    pub fn material_table(&self) -> MaterialTable {
        self.materials
    }

    /// Replaces the state-to-material table.
    pub fn set_material_table(&mut self, materials: MaterialTable) {
        self.materials = materials;
    }

    /// Blend function.
    #[inline]
    #[must_use]
    pub fn blend_func(&self) -> BlendFunc {
        self.blend
    }

    /// Overrides the blend function derived from the texture.
    pub fn set_blend_func(&mut self, blend: BlendFunc) {
        self.blend = blend;
        self.blend_overridden = true;
    }

    // -- Derived state ---------------------------------------------------

    /// Whether the mesh matches the configuration.
    #[inline]
    #[must_use]
    pub fn geometry_state(&self) -> GeometryState {
        self.geometry
    }

    /// The mesh from the last successful rebuild.
    #[inline]
    #[must_use]
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Whether there is a mesh to draw.
    #[inline]
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.mesh.is_some()
    }

    /// Insets used by the last successful rebuild, in pixels.
    #[inline]
    #[must_use]
    pub fn resolved_insets(&self) -> Option<ResolvedInsets> {
        self.resolved
    }

    /// Current texture.
    #[inline]
    #[must_use]
    pub fn texture(&self) -> Option<Texture> {
        self.texture
    }

    /// Current frame, after normalization.
    #[inline]
    #[must_use]
    pub fn frame(&self) -> Option<SourceFrame> {
        self.frame
    }

    /// Configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &Scale9Config {
        &self.config
    }

    fn natural_size(&self) -> Size {
        let original = self.original_size();
        if self.embedded_insets.is_some() {
            let border = 2.0 * self.config.embedded_border_px / self.config.scale_factor();
            Size::new(
                (original.width - border).max(0.0),
                (original.height - border).max(0.0),
            )
        } else {
            original
        }
    }

    fn build(
        &self,
        texture: &Texture,
        frame: &SourceFrame,
    ) -> Result<(Mesh, ResolvedInsets, PositionGrid), Scale9Error> {
        let csf = self.config.scale_factor();
        let resolved = resolve_cap_insets(
            self.cap_insets.scaled(csf),
            self.embedded_insets.map(|e| e.scaled(csf)),
            frame.original_size * csf,
            self.config.embedded_border_px,
        );
        let trim = frame.trim_offsets().scaled(csf);

        let uv = compute_uv(
            &UvParams {
                atlas_size: texture.pixel_size(),
                texture_rect: frame.rect.scale_from_origin(csf),
                rotated: frame.rotated,
                trim,
                original_size: resolved.original_size,
                insets: resolved.insets,
                embedded_border: resolved.embedded_border,
                mode: self.mode,
            },
            &self.config,
        );
        let positions = compute_positions(&PositionParams {
            target: self.preferred_size,
            original_size: resolved.original_size,
            insets: resolved.insets,
            trim,
            content_scale_factor: csf,
            mode: self.mode,
        });
        let color = if texture.premultiplied_alpha {
            self.color.premultiplied()
        } else {
            self.color
        };
        let mesh = assemble(&uv, &positions, frame.rotated, color)?;
        Ok((mesh, resolved, positions))
    }
}

impl Default for Scale9Sprite {
    fn default() -> Self {
        Self::new(Scale9Config::default())
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl Drawable for Scale9Sprite {
    fn prepare(&mut self, key: u32, tracer: &mut Tracer<'_>) -> PrepareOutcome {
        if self.geometry == GeometryState::Clean {
            return PrepareOutcome::Clean;
        }
        let (Some(texture), Some(frame)) = (self.texture, self.frame) else {
            return PrepareOutcome::Inert;
        };
        match self.build(&texture, &frame) {
            Ok((mesh, resolved, positions)) => {
                tracer.rebuild(&RebuildEvent {
                    sprite: key,
                    mode: self.mode,
                    inset_source: resolved.source,
                    embedded_border: resolved.embedded_border,
                    collapsed_x: positions.collapsed_x,
                    collapsed_y: positions.collapsed_y,
                    vertex_count: count(mesh.vertices().len()),
                    index_count: count(mesh.indices().len()),
                });
                self.mesh = Some(mesh);
                self.resolved = Some(resolved);
                self.geometry = GeometryState::Clean;
                PrepareOutcome::Rebuilt
            }
            Err(error) => {
                // Stays dirty so the next prepare retries.
                self.mesh = None;
                self.resolved = None;
                tracer.rebuild_failed(&RebuildFailedEvent { sprite: key, error });
                PrepareOutcome::Failed(error)
            }
        }
    }

    fn draw(&self, z_order: i32, submitter: &mut dyn MeshSubmitter) {
        let (Some(mesh), Some(texture)) = (&self.mesh, self.texture) else {
            return;
        };
        submitter.submit(&DrawRequest {
            mesh,
            texture: texture.id,
            material: self.material(),
            blend: self.blend,
            z_order,
        });
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::frame::TextureId;
    use crate::insets::InsetSource;

    const EPS: f32 = 1e-6;

    fn approx(a: f32, b: f32) -> bool {
        let d = a - b;
        d < EPS && d > -EPS
    }

    fn texture(w: u32, h: u32) -> Texture {
        Texture::new(TextureId(1), w, h)
    }

    fn whole(w: u32, h: u32) -> FrameAsset {
        FrameAsset::whole_texture(texture(w, h))
    }

    fn built(asset: FrameAsset, insets: CapInsets) -> Scale9Sprite {
        let mut s = Scale9Sprite::from_asset(asset, insets, Scale9Config::standard()).unwrap();
        assert_eq!(s.prepare(0, &mut Tracer::none()), PrepareOutcome::Rebuilt);
        s
    }

    fn xs(mesh: &Mesh) -> Vec<f32> {
        mesh.vertices()[..mesh.grid_size()]
            .iter()
            .map(|v| v.position[0])
            .collect()
    }

    fn ys(mesh: &Mesh) -> Vec<f32> {
        let n = mesh.grid_size();
        (0..n).map(|j| mesh.vertices()[j * n].position[1]).collect()
    }

    #[derive(Default)]
    struct Requests(Vec<(TextureId, MaterialId, BlendFunc, i32)>);

    impl MeshSubmitter for Requests {
        fn submit(&mut self, r: &DrawRequest<'_>) {
            self.0.push((r.texture, r.material, r.blend, r.z_order));
        }
    }

    #[test]
    fn new_sprite_is_inert() {
        let mut s = Scale9Sprite::default();
        assert_eq!(s.geometry_state(), GeometryState::Dirty);
        assert_eq!(s.prepare(0, &mut Tracer::none()), PrepareOutcome::Inert);
        assert!(!s.is_renderable());
        let mut out = Requests::default();
        s.draw(0, &mut out);
        assert!(out.0.is_empty());
    }

    #[test]
    fn init_without_texture_fails_and_stays_inert() {
        let mut s = Scale9Sprite::default();
        let asset = FrameAsset {
            texture: None,
            frame: Some(SourceFrame::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0))),
            embedded_insets: None,
        };
        assert_eq!(
            s.init(asset, CapInsets::ZERO),
            Err(Scale9Error::MissingTexture)
        );
        assert!(s.texture().is_none());
        assert_eq!(s.prepare(0, &mut Tracer::none()), PrepareOutcome::Inert);
    }

    #[test]
    fn stretched_corners_keep_their_size() {
        let mut s = Scale9Sprite::from_asset(
            whole(100, 100),
            CapInsets::uniform(25.0),
            Scale9Config::standard(),
        )
        .unwrap();
        s.set_preferred_size(Size::new(200.0, 200.0));
        s.prepare(0, &mut Tracer::none());
        let mesh = s.mesh().unwrap();
        assert_eq!(xs(mesh), [0.0, 25.0, 175.0, 200.0]);
        assert_eq!(ys(mesh), [0.0, 25.0, 175.0, 200.0]);
        // Center cell spans (25, 25)–(175, 175).
        assert_eq!(mesh.vertices()[5].position, [25.0, 25.0, 0.0]);
        assert_eq!(mesh.vertices()[10].position, [175.0, 175.0, 0.0]);
        assert_eq!(mesh.vertices()[5].tex_coords, [0.25, 0.75]);
    }

    #[test]
    fn simple_mode_is_one_stretched_quad() {
        let mut s = Scale9Sprite::from_asset(
            whole(100, 100),
            CapInsets::ZERO,
            Scale9Config::standard(),
        )
        .unwrap();
        s.set_rendering_mode(RenderingMode::Simple);
        s.set_preferred_size(Size::new(50.0, 50.0));
        s.prepare(0, &mut Tracer::none());
        let mesh = s.mesh().unwrap();
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.bounds(), Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(mesh.vertices()[0].tex_coords, [0.0, 1.0]);
        assert_eq!(mesh.vertices()[3].tex_coords, [1.0, 0.0]);
    }

    #[test]
    fn simple_round_trip_reproduces_frame() {
        let s = {
            let mut s = Scale9Sprite::from_asset(
                FrameAsset::new(
                    texture(128, 128),
                    SourceFrame::from_rect(Rect::new(8.0, 16.0, 72.0, 48.0)),
                ),
                CapInsets::ZERO,
                Scale9Config::standard(),
            )
            .unwrap();
            s.set_rendering_mode(RenderingMode::Simple);
            s.prepare(0, &mut Tracer::none());
            s
        };
        let mesh = s.mesh().unwrap();
        assert_eq!(mesh.bounds(), Rect::new(0.0, 0.0, 64.0, 32.0));
        let v = mesh.vertices();
        assert!(approx(v[0].tex_coords[0], 8.0 / 128.0));
        assert!(approx(v[0].tex_coords[1], 48.0 / 128.0));
        assert!(approx(v[3].tex_coords[0], 72.0 / 128.0));
        assert!(approx(v[3].tex_coords[1], 16.0 / 128.0));
    }

    #[test]
    fn rotated_frame_maps_insets_to_swapped_atlas_axes() {
        let frame = SourceFrame::from_rect(Rect::new(0.0, 0.0, 100.0, 60.0)).with_rotation(true);
        let s = built(
            FrameAsset::new(texture(200, 200), frame),
            CapInsets::new(10.0, 20.0, 10.0, 20.0),
        );
        let v = s.mesh().unwrap().vertices();
        // (i=1, j=0): horizontal inset 10 lands on atlas v.
        assert!(approx(v[1].tex_coords[0], 0.0));
        assert!(approx(v[1].tex_coords[1], 0.05));
        // (i=0, j=1): vertical inset 20 lands on atlas u.
        assert!(approx(v[4].tex_coords[0], 0.1));
        assert!(approx(v[4].tex_coords[1], 0.0));
        assert_eq!(xs(s.mesh().unwrap()), [0.0, 10.0, 90.0, 100.0]);
    }

    #[test]
    fn embedded_insets_used_when_explicit_zero() {
        let asset = FrameAsset::new(
            texture(64, 64),
            SourceFrame::from_rect(Rect::new(0.0, 0.0, 32.0, 32.0)),
        )
        .with_embedded_insets(CapInsets::uniform(4.0));
        let s = built(asset, CapInsets::ZERO);
        assert_eq!(s.preferred_size(), Size::new(30.0, 30.0));
        let r = s.resolved_insets().unwrap();
        assert_eq!(r.source, InsetSource::Embedded);
        assert!(r.embedded_border);
        assert_eq!(r.original_size, Size::new(30.0, 30.0));
        let mesh = s.mesh().unwrap();
        assert_eq!(xs(mesh), [0.0, 4.0, 26.0, 30.0]);
        assert!(approx(mesh.vertices()[0].tex_coords[0], 1.3 / 64.0));
    }

    #[test]
    fn rebuild_is_idempotent() {
        let mut s = built(whole(100, 80), CapInsets::new(10.0, 12.0, 14.0, 16.0));
        let first = s.mesh().unwrap().vertex_bytes().to_vec();
        let first_idx = s.mesh().unwrap().index_bytes().to_vec();
        s.set_preferred_size(Size::new(1.0, 1.0));
        s.set_preferred_size(Size::new(100.0, 80.0));
        assert_eq!(s.prepare(0, &mut Tracer::none()), PrepareOutcome::Rebuilt);
        assert_eq!(s.mesh().unwrap().vertex_bytes(), first.as_slice());
        assert_eq!(s.mesh().unwrap().index_bytes(), first_idx.as_slice());
    }

    #[test]
    fn mutations_coalesce_into_one_rebuild() {
        let mut s = built(whole(100, 100), CapInsets::ZERO);
        s.set_inset_left(5.0);
        s.set_inset_right(6.0);
        s.set_preferred_size(Size::new(300.0, 120.0));
        s.set_rendering_mode(RenderingMode::Simple);
        assert_eq!(s.geometry_state(), GeometryState::Dirty);
        assert_eq!(s.prepare(0, &mut Tracer::none()), PrepareOutcome::Rebuilt);
        assert_eq!(s.prepare(0, &mut Tracer::none()), PrepareOutcome::Clean);
    }

    #[test]
    fn unchanged_writes_do_not_dirty() {
        let mut s = built(whole(100, 100), CapInsets::uniform(10.0));
        s.set_cap_insets(CapInsets::uniform(10.0));
        s.set_inset_top(10.0);
        s.set_preferred_size(Size::new(100.0, 100.0));
        s.set_rendering_mode(RenderingMode::Slice);
        s.set_color(Rgba8::WHITE);
        assert_eq!(s.geometry_state(), GeometryState::Clean);
    }

    #[test]
    fn color_change_dirties_geometry() {
        let mut s = built(whole(10, 10), CapInsets::ZERO);
        s.set_opacity(128);
        assert_eq!(s.geometry_state(), GeometryState::Dirty);
        s.prepare(0, &mut Tracer::none());
        assert_eq!(s.mesh().unwrap().vertices()[0].color, [255, 255, 255, 128]);
    }

    #[test]
    fn premultiplied_texture_premultiplies_color() {
        let tex = texture(10, 10).with_premultiplied_alpha(true);
        let mut s = built(FrameAsset::whole_texture(tex), CapInsets::ZERO);
        assert_eq!(s.blend_func(), BlendFunc::AlphaPremultiplied);
        s.set_color(Rgba8::new(200, 100, 255, 128));
        s.prepare(0, &mut Tracer::none());
        assert_eq!(s.mesh().unwrap().vertices()[0].color, [100, 50, 128, 128]);

        let straight = built(whole(10, 10), CapInsets::ZERO);
        assert_eq!(straight.blend_func(), BlendFunc::AlphaNonPremultiplied);
    }

    #[test]
    fn blend_override_survives_frame_update() {
        let mut s = built(whole(10, 10), CapInsets::ZERO);
        s.set_blend_func(BlendFunc::Additive);
        s.update_frame(whole(20, 20), CapInsets::ZERO).unwrap();
        assert_eq!(s.blend_func(), BlendFunc::Additive);
    }

    #[test]
    fn invalid_update_keeps_previous_state() {
        let mut s = built(whole(100, 100), CapInsets::uniform(10.0));
        let before = s.mesh().unwrap().clone();
        let bad = FrameAsset {
            texture: None,
            frame: None,
            embedded_insets: None,
        };
        assert_eq!(
            s.update_frame(bad, CapInsets::ZERO),
            Err(Scale9Error::InvalidFrame(FrameField::Frame))
        );
        let bad_atlas = FrameAsset::whole_texture(texture(0, 10));
        assert_eq!(
            s.update_frame(bad_atlas, CapInsets::ZERO),
            Err(Scale9Error::InvalidFrame(FrameField::AtlasSize))
        );
        assert_eq!(s.geometry_state(), GeometryState::Clean);
        assert_eq!(s.cap_insets(), CapInsets::uniform(10.0));
        assert_eq!(s.mesh(), Some(&before));
    }

    #[test]
    fn update_without_texture_keeps_current_texture() {
        let mut s = built(whole(100, 100), CapInsets::ZERO);
        let asset = FrameAsset {
            texture: None,
            frame: Some(SourceFrame::from_rect(Rect::new(0.0, 0.0, 50.0, 40.0))),
            embedded_insets: None,
        };
        s.update_frame(asset, CapInsets::ZERO).unwrap();
        assert_eq!(s.texture().unwrap().pixels_wide, 100);
        assert_eq!(s.preferred_size(), Size::new(50.0, 40.0));
    }

    #[test]
    fn set_cap_insets_keeps_preferred_size() {
        let mut s = built(whole(100, 100), CapInsets::ZERO);
        s.set_preferred_size(Size::new(240.0, 60.0));
        s.set_cap_insets(CapInsets::uniform(12.0));
        assert_eq!(s.preferred_size(), Size::new(240.0, 60.0));
        s.update_frame(whole(64, 32), CapInsets::ZERO).unwrap();
        assert_eq!(s.preferred_size(), Size::new(64.0, 32.0));
    }

    #[test]
    fn scalar_setters_combine() {
        let mut s = built(whole(100, 100), CapInsets::ZERO);
        s.set_inset_left(1.0);
        s.set_inset_top(2.0);
        s.set_inset_right(3.0);
        s.set_inset_bottom(4.0);
        assert_eq!(s.cap_insets(), CapInsets::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(
            (
                s.inset_left(),
                s.inset_top(),
                s.inset_right(),
                s.inset_bottom()
            ),
            (1.0, 2.0, 3.0, 4.0)
        );
    }

    #[test]
    fn cap_insets_rect_form() {
        let mut s = built(whole(100, 60), CapInsets::new(10.0, 5.0, 20.0, 15.0));
        assert_eq!(s.cap_insets_rect(), Rect::new(10.0, 5.0, 80.0, 45.0));
        s.set_cap_insets_rect(Rect::new(30.0, 10.0, 70.0, 50.0));
        assert_eq!(s.cap_insets(), CapInsets::new(30.0, 10.0, 30.0, 10.0));
    }

    #[test]
    fn simple_mode_keeps_explicit_insets() {
        let mut s = built(whole(100, 100), CapInsets::uniform(20.0));
        s.set_rendering_mode(RenderingMode::Simple);
        s.prepare(0, &mut Tracer::none());
        s.set_rendering_mode(RenderingMode::Slice);
        s.prepare(0, &mut Tracer::none());
        assert_eq!(s.cap_insets(), CapInsets::uniform(20.0));
        assert_eq!(xs(s.mesh().unwrap()), [0.0, 20.0, 80.0, 100.0]);
    }

    #[test]
    fn state_change_swaps_material_only() {
        let mut s = built(whole(10, 10), CapInsets::ZERO);
        s.set_material_table(MaterialTable::new(MaterialId(5), MaterialId(6)));
        assert!(s.set_state(VisualState::Gray));
        assert!(!s.set_state(VisualState::Gray));
        assert_eq!(s.geometry_state(), GeometryState::Clean);
        let mut out = Requests::default();
        s.draw(3, &mut out);
        assert_eq!(
            out.0,
            [(
                TextureId(1),
                MaterialId(6),
                BlendFunc::AlphaNonPremultiplied,
                3
            )]
        );
    }

    #[test]
    fn resizable_copy_drops_trim() {
        let frame = SourceFrame::from_rect(Rect::new(0.0, 0.0, 80.0, 40.0))
            .with_trim(Vec2::new(4.0, 2.0), Size::new(100.0, 60.0));
        let mut s = built(FrameAsset::new(texture(128, 128), frame), CapInsets::ZERO);
        s.set_state(VisualState::Gray);
        let copy = s.resizable_with_cap_insets(CapInsets::uniform(8.0)).unwrap();
        assert_eq!(copy.frame().unwrap().offset, Vec2::ZERO);
        assert_eq!(copy.cap_insets(), CapInsets::uniform(8.0));
        assert_eq!(copy.state(), VisualState::Gray);
        assert_eq!(copy.preferred_size(), Size::new(100.0, 60.0));
        assert_eq!(
            Scale9Sprite::default()
                .resizable_with_cap_insets(CapInsets::ZERO)
                .err(),
            Some(Scale9Error::MissingTexture)
        );
    }

    #[test]
    fn frame_provider_lookup() {
        struct Sheet;
        impl FrameProvider for Sheet {
            fn frame_asset(&self, name: &str) -> Option<FrameAsset> {
                (name == "button.png").then(|| whole(48, 48))
            }
        }
        let mut s = Scale9Sprite::default();
        assert_eq!(
            s.init_with_frame_name(&Sheet, "missing.png", CapInsets::ZERO),
            Err(Scale9Error::InvalidFrame(FrameField::Frame))
        );
        s.init_with_frame_name(&Sheet, "button.png", CapInsets::ZERO)
            .unwrap();
        assert_eq!(s.preferred_size(), Size::new(48.0, 48.0));
        assert_eq!(s.prepare(0, &mut Tracer::none()), PrepareOutcome::Rebuilt);
    }

    #[test]
    fn content_scale_factor_converts_to_pixels() {
        let mut s = Scale9Sprite::from_asset(
            whole(200, 200),
            CapInsets::uniform(25.0),
            Scale9Config::high_density(),
        )
        .unwrap();
        // 200 px atlas is 100 points.
        assert_eq!(s.preferred_size(), Size::new(100.0, 100.0));
        s.set_preferred_size(Size::new(200.0, 200.0));
        s.prepare(0, &mut Tracer::none());
        let mesh = s.mesh().unwrap();
        assert_eq!(xs(mesh), [0.0, 25.0, 175.0, 200.0]);
        assert_eq!(mesh.vertices()[5].tex_coords, [0.25, 0.75]);
    }

    #[test]
    fn degenerate_target_collapses_center() {
        let mut s = built(whole(100, 100), CapInsets::new(40.0, 10.0, 40.0, 10.0));
        s.set_preferred_size(Size::new(50.0, 100.0));
        s.prepare(0, &mut Tracer::none());
        let x = xs(s.mesh().unwrap());
        assert_eq!(x, [0.0, 25.0, 25.0, 50.0]);
    }

    #[test]
    fn oversized_inset_pair_collapses_positions_and_uvs() {
        let s = built(whole(100, 100), CapInsets::new(60.0, 10.0, 60.0, 10.0));
        assert_eq!(s.preferred_size(), Size::new(100.0, 100.0));
        let mesh = s.mesh().unwrap();
        assert_eq!(xs(mesh), [0.0, 50.0, 50.0, 100.0]);
        let us: Vec<f32> = mesh.vertices()[..mesh.grid_size()]
            .iter()
            .map(|v| v.tex_coords[0])
            .collect();
        for (u, want) in us.iter().zip([0.0, 0.5, 0.5, 1.0]) {
            assert!(approx(*u, want), "u boundaries {us:?}");
        }
    }

    #[test]
    fn infinite_inset_is_ignored() {
        let mut s = built(whole(100, 100), CapInsets::uniform(10.0));
        s.set_inset_left(f64::INFINITY);
        assert_eq!(s.inset_left(), 0.0);
        assert_eq!(s.geometry_state(), GeometryState::Dirty);
        assert_eq!(s.prepare(0, &mut Tracer::none()), PrepareOutcome::Rebuilt);
        let mesh = s.mesh().unwrap();
        assert!(
            mesh.vertices()
                .iter()
                .all(|v| v.position.iter().chain(&v.tex_coords).all(|c| c.is_finite())),
            "mesh has non-finite coordinates"
        );
        assert_eq!(xs(mesh), [0.0, 0.0, 90.0, 100.0]);
    }

    #[test]
    fn non_finite_init_insets_are_zeroed() {
        let s = built(
            whole(90, 90),
            CapInsets::new(f64::NAN, f64::NAN, f64::INFINITY, f64::NAN),
        );
        assert_eq!(s.cap_insets(), CapInsets::ZERO);
        assert_eq!(s.resolved_insets().unwrap().source, InsetSource::DefaultSplit);
    }
}
