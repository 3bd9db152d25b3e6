//! Wavefront OBJ export

use std::io::{self, Write};

use crate::mesh::{MeshBuffers, Topology};

/// Write mesh buffers as a Wavefront OBJ object
///
/// Emits `v`/`vt`/`vn` records followed by `f` records with 1-based
/// `v/vt/vn` references (or `v//vn` when the mesh has no UVs). Indexed
/// meshes emit their triangle list; non-indexed meshes emit sequential
/// faces, one per topology run when runs are present.
pub fn write_obj<W: Write>(mesh: &MeshBuffers, name: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "o {name}")?;

    for p in mesh.positions.chunks(3) {
        writeln!(out, "v {} {} {}", p[0], p[1], p[2])?;
    }
    for uv in mesh.uvs.chunks(2) {
        writeln!(out, "vt {} {}", uv[0], uv[1])?;
    }
    for n in mesh.normals.chunks(3) {
        writeln!(out, "vn {} {} {}", n[0], n[1], n[2])?;
    }

    let has_uvs = !mesh.uvs.is_empty();
    if !mesh.indices.is_empty() {
        for tri in mesh.indices.chunks(3) {
            write_face(out, tri, has_uvs)?;
        }
    } else if !mesh.runs.is_empty() {
        let mut first = 0u32;
        for run in &mesh.runs {
            let corners = match run.topology {
                Topology::Quads => 4,
                _ => 3,
            };
            let mut vertex = first;
            while vertex + corners <= run.vertex_end {
                let face: Vec<u32> = (vertex..vertex + corners).collect();
                write_face(out, &face, has_uvs)?;
                vertex += corners;
            }
            first = run.vertex_end;
        }
    } else {
        let indices: Vec<u32> = (0..mesh.vertex_count() as u32).collect();
        for tri in indices.chunks_exact(3) {
            write_face(out, tri, has_uvs)?;
        }
    }

    Ok(())
}

fn write_face<W: Write>(out: &mut W, corners: &[u32], has_uvs: bool) -> io::Result<()> {
    write!(out, "f")?;
    for &corner in corners {
        let i = corner + 1; // OBJ indices are 1-based
        if has_uvs {
            write!(out, " {i}/{i}/{i}")?;
        } else {
            write!(out, " {i}//{i}")?;
        }
    }
    writeln!(out)
}
