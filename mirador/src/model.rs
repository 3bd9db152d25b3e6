//! Wavefront OBJ model loading
//!
//! A deliberately small reader for the `v`/`vt`/`vn`/`f` subset. Faces are
//! triangles or quads with full `v/vt/vn` corners; anything else is a hard
//! parse failure. Mixed topology within one file is legal: run boundaries
//! are recorded so render can issue one bulk call per contiguous run.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::mesh::{DereferenceMethod, MeshBuffers, Topology, TopologyRun};
use crate::scene::Node;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: face must have 3 or 4 v/vt/vn corners")]
    MalformedFace { line: usize },

    #[error("line {line}: malformed {kind} entry")]
    MalformedEntry { line: usize, kind: &'static str },

    #[error("line {line}: face index {index} out of range")]
    IndexOutOfRange { line: usize, index: usize },
}

struct Corner {
    position: usize,
    uv: usize,
    normal: usize,
    line: usize,
}

/// Load and parse an OBJ file
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshBuffers, ModelError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_obj(&text)
}

/// Parse OBJ text into unrolled, non-indexed mesh buffers
pub fn parse_obj(text: &str) -> Result<MeshBuffers, ModelError> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut corners: Vec<Corner> = Vec::new();

    let mut runs: Vec<TopologyRun> = Vec::new();
    let mut current_topology: Option<Topology> = None;
    let mut vertex_counter: u32 = 0;

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let mut fields = raw_line.split_whitespace();
        match fields.next() {
            Some("v") => positions.push(parse_vec3(fields, line, "v")?),
            Some("vt") => uvs.push(parse_vec2(fields, line, "vt")?),
            Some("vn") => normals.push(parse_vec3(fields, line, "vn")?),
            Some("f") => {
                let tokens: Vec<&str> = fields.collect();
                let topology = match tokens.len() {
                    3 => Topology::Triangles,
                    4 => Topology::Quads,
                    _ => return Err(ModelError::MalformedFace { line }),
                };

                for token in &tokens {
                    corners.push(parse_corner(token, line)?);
                }

                // close the previous run when the face topology changes
                if current_topology != Some(topology) {
                    if let Some(previous) = current_topology {
                        runs.push(TopologyRun {
                            topology: previous,
                            vertex_end: vertex_counter,
                        });
                    }
                    current_topology = Some(topology);
                }
                vertex_counter += tokens.len() as u32;
            }
            _ => {} // comments and unsupported directives
        }
    }

    if let Some(topology) = current_topology {
        runs.push(TopologyRun {
            topology,
            vertex_end: vertex_counter,
        });
    }

    // unroll the face corners into render-ready order
    let mut mesh = MeshBuffers::with_capacity(corners.len(), 0);
    for corner in corners {
        let position = positions
            .get(corner.position)
            .ok_or(ModelError::IndexOutOfRange {
                line: corner.line,
                index: corner.position + 1,
            })?;
        let uv = uvs.get(corner.uv).ok_or(ModelError::IndexOutOfRange {
            line: corner.line,
            index: corner.uv + 1,
        })?;
        let normal = normals
            .get(corner.normal)
            .ok_or(ModelError::IndexOutOfRange {
                line: corner.line,
                index: corner.normal + 1,
            })?;
        mesh.positions.extend_from_slice(position);
        mesh.uvs.extend_from_slice(uv);
        mesh.normals.extend_from_slice(normal);
    }

    mesh.runs = runs;
    Ok(mesh)
}

/// Wrap loaded buffers in a node configured for per-run bulk draws
pub fn model_node(mesh: MeshBuffers) -> Node {
    let topology = mesh
        .runs
        .first()
        .map(|run| run.topology)
        .unwrap_or(Topology::Triangles);
    let mut node = Node::new(mesh);
    node.topology = topology;
    node.dereference = DereferenceMethod::BulkArrays;
    node
}

fn parse_corner(token: &str, line: usize) -> Result<Corner, ModelError> {
    let mut parts = token.split('/');
    let mut next_index = || -> Result<usize, ModelError> {
        let piece = parts
            .next()
            .filter(|piece| !piece.is_empty())
            .ok_or(ModelError::MalformedFace { line })?;
        let value: usize = piece
            .parse()
            .map_err(|_| ModelError::MalformedFace { line })?;
        if value == 0 {
            return Err(ModelError::IndexOutOfRange { line, index: 0 });
        }
        Ok(value - 1) // OBJ indices are 1-based
    };

    let position = next_index()?;
    let uv = next_index()?;
    let normal = next_index()?;
    Ok(Corner {
        position,
        uv,
        normal,
        line,
    })
}

fn parse_vec3<'a>(
    mut fields: impl Iterator<Item = &'a str>,
    line: usize,
    kind: &'static str,
) -> Result<[f32; 3], ModelError> {
    let mut out = [0.0; 3];
    for slot in &mut out {
        *slot = fields
            .next()
            .and_then(|field| field.parse().ok())
            .ok_or(ModelError::MalformedEntry { line, kind })?;
    }
    Ok(out)
}

fn parse_vec2<'a>(
    mut fields: impl Iterator<Item = &'a str>,
    line: usize,
    kind: &'static str,
) -> Result<[f32; 2], ModelError> {
    let mut out = [0.0; 2];
    for slot in &mut out {
        *slot = fields
            .next()
            .and_then(|field| field.parse().ok())
            .ok_or(ModelError::MalformedEntry { line, kind })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TRIANGLE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn test_parse_single_triangle() {
        let mesh = parse_obj(TRIANGLE_OBJ).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert!(mesh.indices.is_empty());
        assert_eq!(
            mesh.runs,
            vec![TopologyRun {
                topology: Topology::Triangles,
                vertex_end: 3
            }]
        );
        // 1-based indices resolved to the right data
        assert_eq!(mesh.position(0), glam::Vec3::ZERO);
        assert_eq!(mesh.position(1), glam::Vec3::X);
        assert_eq!(mesh.normal(2), glam::Vec3::Z);
    }

    #[test]
    fn test_parse_quads() {
        let obj = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1 4/1/1
";
        let mesh = parse_obj(obj).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(
            mesh.runs,
            vec![TopologyRun {
                topology: Topology::Quads,
                vertex_end: 4
            }]
        );
    }

    #[test]
    fn test_mixed_topology_records_run_boundaries() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1
f 1/1/1 2/1/1 3/1/1 4/1/1
f 1/1/1 2/1/1 3/1/1
";
        let mesh = parse_obj(obj).unwrap();
        assert_eq!(
            mesh.runs,
            vec![
                TopologyRun {
                    topology: Topology::Triangles,
                    vertex_end: 3
                },
                TopologyRun {
                    topology: Topology::Quads,
                    vertex_end: 7
                },
                TopologyRun {
                    topology: Topology::Triangles,
                    vertex_end: 10
                },
            ]
        );
        assert_eq!(mesh.vertex_count(), 10);
    }

    #[test]
    fn test_malformed_arity_is_hard_failure() {
        let obj = "\
v 0 0 0
v 1 0 0
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1
";
        assert!(matches!(
            parse_obj(obj),
            Err(ModelError::MalformedFace { line: 5 })
        ));
    }

    #[test]
    fn test_missing_corner_fields_fail() {
        let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";
        assert!(matches!(
            parse_obj(obj),
            Err(ModelError::MalformedFace { .. })
        ));
    }

    #[test]
    fn test_out_of_range_index_fails() {
        let obj = "\
v 0 0 0
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 1/1/1
";
        assert!(matches!(
            parse_obj(obj),
            Err(ModelError::IndexOutOfRange { index: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_directives_are_skipped() {
        let obj = format!("# comment\nmtllib scene.mtl\no triangle\ns off\n{TRIANGLE_OBJ}");
        let mesh = parse_obj(&obj).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_load_obj_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TRIANGLE_OBJ.as_bytes()).unwrap();
        let mesh = load_obj(file.path()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_load_obj_missing_file() {
        assert!(matches!(
            load_obj("models/does_not_exist.obj"),
            Err(ModelError::Io { .. })
        ));
    }

    #[test]
    fn test_model_node_uses_bulk_arrays() {
        let mesh = parse_obj(TRIANGLE_OBJ).unwrap();
        let node = model_node(mesh);
        assert_eq!(node.dereference, DereferenceMethod::BulkArrays);
        assert_eq!(node.topology, Topology::Triangles);
    }
}
