// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mesh assembly.
//!
//! A mesh is the cross product of the position and texture-coordinate
//! boundary grids: `n × n` vertices (`n` = 2 or 4) and `6·(n−1)²` indices.
//! Vertex `(i, j)` sits at index `i + j·n` with position `(x[i], y[j])`.
//!
//! Every triangle winds counter-clockwise in content space (y up). The
//! index pattern depends only on the grid size, never on the data.

use alloc::vec::Vec;

use bytemuck::{Pod, Zeroable};
use kurbo::{Line, Point, Rect};

use crate::error::Scale9Error;
use crate::uv::UvGrid;
use crate::vertex::PositionGrid;

/// Index pattern for the single quad of a simple mesh.
pub const SIMPLE_QUAD_INDICES: [u16; 6] = [0, 1, 2, 3, 2, 1];

/// Index pattern for the bottom-left cell of a sliced mesh. Cell
/// `(col, row)` adds `row·4 + col` to each entry.
pub const SLICE_CELL_INDICES: [u16; 6] = [4, 0, 5, 1, 5, 0];

/// An 8-bit-per-channel color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (opacity).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Creates a color from its channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiplies the color channels by `a / 255`, rounding to nearest.
    #[must_use]
    pub fn premultiplied(self) -> Self {
        let k = f32::from(self.a) / 255.0;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "rounded product of a u8 and a factor in 0..=1 fits in u8"
        )]
        let mul = |c: u8| (f32::from(c) * k + 0.5) as u8;
        Self::new(mul(self.r), mul(self.g), mul(self.b), self.a)
    }

    /// Channels as `[r, g, b, a]`.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

/// One mesh vertex, laid out for direct upload to a vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Content-space position; `z` is always zero.
    pub position: [f32; 3],
    /// Vertex color.
    pub color: [u8; 4],
    /// Normalized texture coordinates.
    pub tex_coords: [f32; 2],
}

/// Vertex and index buffers for one sprite.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<MeshVertex>,
    indices: Vec<u16>,
    grid_size: usize,
}

impl Mesh {
    /// The vertices, row by row from the bottom.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    /// Triangle-list indices into [`vertices`](Self::vertices).
    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Boundaries per axis (2 or 4).
    #[inline]
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// The vertex buffer as raw bytes.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer as raw bytes.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Iterates the triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Smallest rectangle containing every vertex position.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let mut points = self.vertices.iter().map(position);
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        points.fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
    }

    /// Every distinct triangle edge, for debug overlays.
    #[must_use]
    pub fn wireframe_edges(&self) -> Vec<Line> {
        let mut seen: Vec<(u16, u16)> = Vec::new();
        let mut lines = Vec::new();
        for [a, b, c] in self.triangles() {
            for (p, q) in [(a, b), (b, c), (c, a)] {
                let key = (p.min(q), p.max(q));
                if seen.contains(&key) {
                    continue;
                }
                seen.push(key);
                if let (Some(p0), Some(p1)) = (
                    self.vertices.get(usize::from(key.0)),
                    self.vertices.get(usize::from(key.1)),
                ) {
                    lines.push(Line::new(position(p0), position(p1)));
                }
            }
        }
        lines
    }
}

fn position(v: &MeshVertex) -> Point {
    Point::new(f64::from(v.position[0]), f64::from(v.position[1]))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "vertex buffers store single-precision floats"
)]
fn narrow(v: f64) -> f32 {
    v as f32
}

/// Builds a mesh from position and texture-coordinate boundaries.
///
/// Rotated frames map content `x` onto atlas `v` and content `y` onto atlas
/// `u`. Otherwise content `x` follows atlas `u` and content `y` runs against
/// atlas `v` (atlas rows grow downward).
pub fn assemble(
    uv: &UvGrid,
    positions: &PositionGrid,
    rotated: bool,
    color: Rgba8,
) -> Result<Mesh, Scale9Error> {
    let n = positions.x.len();
    debug_assert!(
        positions.y.len() == n && uv.u.len() == n && uv.v.len() == n,
        "boundary grids must share one grid size"
    );

    let mut vertices = Vec::new();
    vertices
        .try_reserve_exact(n * n)
        .map_err(|_| Scale9Error::Allocation)?;
    let color = color.to_array();
    for j in 0..n {
        for i in 0..n {
            let (u, v) = if rotated {
                (uv.u[j], uv.v[i])
            } else {
                (uv.u[i], uv.v[n - 1 - j])
            };
            vertices.push(MeshVertex {
                position: [narrow(positions.x[i]), narrow(positions.y[j]), 0.0],
                color,
                tex_coords: [narrow(u), narrow(v)],
            });
        }
    }

    let cells = n - 1;
    let mut indices = Vec::new();
    indices
        .try_reserve_exact(6 * cells * cells)
        .map_err(|_| Scale9Error::Allocation)?;
    if n == 2 {
        indices.extend_from_slice(&SIMPLE_QUAD_INDICES);
    } else {
        for row in 0..cells {
            for col in 0..cells {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "grid has at most 16 vertices"
                )]
                let base = (row * n + col) as u16;
                indices.extend(SLICE_CELL_INDICES.iter().map(|k| k + base));
            }
        }
    }

    Ok(Mesh {
        vertices,
        indices,
        grid_size: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Boundaries;

    fn slice_grids() -> (UvGrid, PositionGrid) {
        let uv = UvGrid {
            u: Boundaries::quad(0.0, 0.25, 0.75, 1.0),
            v: Boundaries::quad(0.0, 0.125, 0.5, 1.0),
        };
        let pos = PositionGrid {
            x: Boundaries::quad(0.0, 25.0, 175.0, 200.0),
            y: Boundaries::quad(0.0, 50.0, 150.0, 200.0),
            collapsed_x: false,
            collapsed_y: false,
        };
        (uv, pos)
    }

    fn signed_area(mesh: &Mesh, [a, b, c]: [u16; 3]) -> f64 {
        let p = |k: u16| position(&mesh.vertices()[usize::from(k)]);
        let (a, b, c) = (p(a), p(b), p(c));
        (b - a).cross(c - a)
    }

    #[test]
    fn slice_mesh_has_sixteen_vertices() {
        let (uv, pos) = slice_grids();
        let mesh = assemble(&uv, &pos, false, Rgba8::WHITE).unwrap();
        assert_eq!(mesh.vertices().len(), 16);
        assert_eq!(mesh.indices().len(), 54);
        assert_eq!(mesh.grid_size(), 4);
        assert_eq!(&mesh.indices()[..6], &[4, 0, 5, 1, 5, 0]);
        // Last cell (2, 2).
        assert_eq!(&mesh.indices()[48..], &[14, 10, 15, 11, 15, 10]);
    }

    #[test]
    fn vertex_layout_is_row_major_from_bottom() {
        let (uv, pos) = slice_grids();
        let mesh = assemble(&uv, &pos, false, Rgba8::WHITE).unwrap();
        let v = mesh.vertices();
        assert_eq!(v[1].position, [25.0, 0.0, 0.0]);
        assert_eq!(v[4].position, [0.0, 50.0, 0.0]);
        // Bottom row samples the bottom of the atlas region.
        assert_eq!(v[0].tex_coords, [0.0, 1.0]);
        assert_eq!(v[5].tex_coords, [0.25, 0.5]);
        assert_eq!(v[15].tex_coords, [1.0, 0.0]);
    }

    #[test]
    fn rotated_mesh_swaps_uv_axes() {
        let (uv, pos) = slice_grids();
        let mesh = assemble(&uv, &pos, true, Rgba8::WHITE).unwrap();
        let v = mesh.vertices();
        // Vertex (i=1, j=0): u from row, v from column.
        assert_eq!(v[1].tex_coords, [0.0, 0.125]);
        // Vertex (i=0, j=1).
        assert_eq!(v[4].tex_coords, [0.25, 0.0]);
    }

    #[test]
    fn simple_mesh_is_one_quad() {
        let uv = UvGrid {
            u: Boundaries::pair(0.0, 1.0),
            v: Boundaries::pair(0.0, 1.0),
        };
        let pos = PositionGrid {
            x: Boundaries::pair(0.0, 50.0),
            y: Boundaries::pair(0.0, 50.0),
            collapsed_x: false,
            collapsed_y: false,
        };
        let mesh = assemble(&uv, &pos, false, Rgba8::WHITE).unwrap();
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.indices(), &SIMPLE_QUAD_INDICES);
        assert_eq!(mesh.bounds(), Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(mesh.vertices()[0].tex_coords, [0.0, 1.0]);
        assert_eq!(mesh.vertices()[3].tex_coords, [1.0, 0.0]);
    }

    #[test]
    fn all_triangles_wind_counter_clockwise() {
        let (uv, pos) = slice_grids();
        let mesh = assemble(&uv, &pos, false, Rgba8::WHITE).unwrap();
        for t in mesh.triangles() {
            assert!(signed_area(&mesh, t) > 0.0, "triangle {t:?} is clockwise");
        }
    }

    #[test]
    fn premultiplied_color_scales_rgb() {
        let c = Rgba8::new(255, 200, 100, 128).premultiplied();
        assert_eq!(c, Rgba8::new(128, 100, 50, 128));
        assert_eq!(Rgba8::WHITE.premultiplied(), Rgba8::WHITE);
        // 1 · 128/255 ≈ 0.502 rounds up rather than truncating to zero.
        assert_eq!(
            Rgba8::new(1, 1, 1, 128).premultiplied(),
            Rgba8::new(1, 1, 1, 128)
        );
    }

    #[test]
    fn color_is_baked_into_every_vertex() {
        let (uv, pos) = slice_grids();
        let color = Rgba8::new(10, 20, 30, 40);
        let mesh = assemble(&uv, &pos, false, color).unwrap();
        assert!(mesh.vertices().iter().all(|v| v.color == [10, 20, 30, 40]));
    }

    #[test]
    fn byte_views_match_layout() {
        let (uv, pos) = slice_grids();
        let mesh = assemble(&uv, &pos, false, Rgba8::WHITE).unwrap();
        assert_eq!(core::mem::size_of::<MeshVertex>(), 24);
        assert_eq!(mesh.vertex_bytes().len(), 16 * 24);
        assert_eq!(mesh.index_bytes().len(), 54 * 2);
    }

    #[test]
    fn wireframe_has_each_edge_once() {
        let (uv, pos) = slice_grids();
        let mesh = assemble(&uv, &pos, false, Rgba8::WHITE).unwrap();
        // 3×3 cells: 12 horizontal + 12 vertical grid edges + 9 diagonals.
        assert_eq!(mesh.wireframe_edges().len(), 33);
    }
}
