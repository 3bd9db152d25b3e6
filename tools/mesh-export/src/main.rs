//! Generate mirador primitives and write them as Wavefront OBJ files

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use mirador::mesh::{self, RectangleBehaviour};

#[derive(Parser)]
#[command(name = "mesh-export", about = "Generate procedural meshes as OBJ files")]
struct Cli {
    /// Output OBJ path
    #[arg(short, long, default_value = "mesh.obj")]
    output: PathBuf,

    #[command(subcommand)]
    shape: Shape,
}

#[derive(Subcommand)]
enum Shape {
    /// UV sphere with equirectangular mapping
    Sphere {
        #[arg(long, default_value_t = 1.0)]
        radius: f32,
        #[arg(long, default_value_t = 32)]
        long_segs: u32,
        #[arg(long, default_value_t = 32)]
        lat_segs: u32,
    },
    /// Flat disc fan
    Disc {
        #[arg(long, default_value_t = 1.0)]
        radius: f32,
        #[arg(long, default_value_t = 32)]
        triangles: u32,
    },
    /// Cone/cylinder/prism side wall
    Cone {
        #[arg(long, default_value_t = 1.0)]
        base_radius: f32,
        #[arg(long, default_value_t = 0.0)]
        top_radius: f32,
        #[arg(long, default_value_t = 2.0)]
        height: f32,
        #[arg(long, default_value_t = 8)]
        long_segs: u32,
        #[arg(long, default_value_t = 32)]
        lat_segs: u32,
    },
    /// Torus
    Torus {
        #[arg(long, default_value_t = 0.5)]
        minor_radius: f32,
        #[arg(long, default_value_t = 1.5)]
        major_radius: f32,
        #[arg(long, default_value_t = 32)]
        ring_segs: u32,
        #[arg(long, default_value_t = 16)]
        tube_segs: u32,
    },
    /// Diamond-tessellated rectangle sheet
    Rectangle {
        #[arg(long, default_value_t = 4)]
        height: u32,
        #[arg(long, default_value_t = 4)]
        width: u32,
        /// Tile the texture per cell instead of stretching it once
        #[arg(long)]
        split: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let (name, buffers) = match cli.shape {
        Shape::Sphere {
            radius,
            long_segs,
            lat_segs,
        } => ("sphere", mesh::sphere(radius, long_segs, lat_segs)?),
        Shape::Disc { radius, triangles } => ("disc", mesh::disc(radius, triangles)?),
        Shape::Cone {
            base_radius,
            top_radius,
            height,
            long_segs,
            lat_segs,
        } => (
            "cone",
            mesh::cone(base_radius, top_radius, height, long_segs, lat_segs)?,
        ),
        Shape::Torus {
            minor_radius,
            major_radius,
            ring_segs,
            tube_segs,
        } => (
            "torus",
            mesh::torus(minor_radius, major_radius, ring_segs, tube_segs)?,
        ),
        Shape::Rectangle {
            height,
            width,
            split,
        } => {
            let behaviour = if split {
                RectangleBehaviour::Split
            } else {
                RectangleBehaviour::Unit
            };
            ("rectangle", mesh::rectangle(height, width, behaviour)?)
        }
    };

    let file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    let mut writer = BufWriter::new(file);
    mesh::write_obj(&buffers, name, &mut writer)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    info!(
        path = %cli.output.display(),
        vertices = buffers.vertex_count(),
        triangles = buffers.triangle_count(),
        "wrote OBJ"
    );
    Ok(())
}
