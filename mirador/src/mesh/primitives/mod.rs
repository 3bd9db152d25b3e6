//! Procedural mesh primitives
//!
//! Free generator functions producing indexed triangle meshes with outward
//! normals and texture coordinates. Shape-specific behaviour lives here;
//! nodes own the resulting [`MeshBuffers`](crate::mesh::MeshBuffers) by value.

mod cone;
mod disc;
mod rectangle;
mod sphere;
mod torus;

pub use cone::cone;
pub use disc::disc;
pub use rectangle::{
    RectangleBehaviour, UvRect, rectangle, rectangle_corners, rectangle_uvs,
};
pub use sphere::sphere;
pub use torus::torus;
