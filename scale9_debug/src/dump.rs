// Copyright 2026 the Scale9 Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Textual mesh dumps.
//!
//! [`write_mesh`] prints a mesh's vertex grid row by row (bottom row first)
//! followed by its triangles, for eyeballing insets and texture coordinates
//! in logs and test failures.

use std::io::{self, Write};

use scale9_core::mesh::Mesh;

/// Writes a human-readable dump of `mesh`.
///
/// ```text
/// mesh 4x4 verts=16 tris=18 bounds=(0, 0)-(200, 200)
/// row 0: (0, 0 | 0, 1) (25, 0 | 0.25, 1) ...
/// tri 0: 4 0 5
/// ```
pub fn write_mesh(mesh: &Mesh, writer: &mut dyn Write) -> io::Result<()> {
    let n = mesh.grid_size();
    let bounds = mesh.bounds();
    writeln!(
        writer,
        "mesh {n}x{n} verts={} tris={} bounds=({}, {})-({}, {})",
        mesh.vertices().len(),
        mesh.indices().len() / 3,
        bounds.x0,
        bounds.y0,
        bounds.x1,
        bounds.y1,
    )?;
    if n > 0 {
        for (row, verts) in mesh.vertices().chunks(n).enumerate() {
            write!(writer, "row {row}:")?;
            for v in verts {
                write!(
                    writer,
                    " ({}, {} | {}, {})",
                    v.position[0], v.position[1], v.tex_coords[0], v.tex_coords[1],
                )?;
            }
            writeln!(writer)?;
        }
    }
    for (i, [a, b, c]) in mesh.triangles().enumerate() {
        writeln!(writer, "tri {i}: {a} {b} {c}")?;
    }
    Ok(())
}

/// Writes every distinct triangle edge as `x0,y0 -> x1,y1`, one per line.
pub fn write_wireframe(mesh: &Mesh, writer: &mut dyn Write) -> io::Result<()> {
    for line in mesh.wireframe_edges() {
        writeln!(
            writer,
            "{},{} -> {},{}",
            line.p0.x, line.p0.y, line.p1.x, line.p1.y
        )?;
    }
    Ok(())
}
