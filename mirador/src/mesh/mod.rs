//! Mesh buffers and procedural generation
//!
//! [`MeshBuffers`] is the single geometry value type: generators fill it,
//! nodes own it, the renderer reads it. Generators are free functions, one
//! per shape family.

mod export;
pub mod primitives;
mod types;

pub use export::write_obj;
pub use primitives::{
    RectangleBehaviour, UvRect, cone, disc, rectangle, rectangle_corners, rectangle_uvs, sphere,
    torus,
};
pub use types::{DereferenceMethod, GeometryError, MeshBuffers, Topology, TopologyRun};
