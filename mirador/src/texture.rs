//! Texture table
//!
//! The scene-level [`TextureTable`] is the sole owner of texture images;
//! nodes hold copyable [`TextureId`] handles. The table outlives every node
//! referencing it and is torn down last.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Handle to a texture owned by the [`TextureTable`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

impl TextureId {
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// Texture coordinate wrap mode, configured post-load
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapMode {
    #[default]
    Clamp,
    Repeat,
}

/// Whether an image is a plain texture or an atlas of sub-regions
///
/// Atlas textures make composite spawners (the cube) pick fixed per-face
/// sub-rectangles instead of the full image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextureCoordsKind {
    #[default]
    Full,
    Atlas,
}

/// A decoded RGBA8 texture image
#[derive(Clone, Debug)]
pub struct Texture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub coords: TextureCoordsKind,
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load texture {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Owner of every texture in a scene
#[derive(Default)]
pub struct TextureTable {
    entries: Vec<Texture>,
}

impl TextureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an image file into the table
    ///
    /// `flip_vertical` flips the rows for images authored top-down.
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        coords: TextureCoordsKind,
        flip_vertical: bool,
    ) -> Result<TextureId, TextureError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| TextureError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let decoded = if flip_vertical { decoded.flipv() } else { decoded };
        let rgba = decoded.into_rgba8();

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(self.insert(Texture {
            name,
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
            wrap_s: WrapMode::Clamp,
            wrap_t: WrapMode::Clamp,
            coords,
        }))
    }

    /// Insert an already-decoded texture (embedded data, tests)
    pub fn insert(&mut self, texture: Texture) -> TextureId {
        let id = TextureId(self.entries.len() as u32);
        self.entries.push(texture);
        id
    }

    pub fn get(&self, id: TextureId) -> Option<&Texture> {
        self.entries.get(id.0 as usize)
    }

    pub fn set_wrap(&mut self, id: TextureId, wrap_s: WrapMode, wrap_t: WrapMode) {
        if let Some(texture) = self.entries.get_mut(id.0 as usize) {
            texture.wrap_s = wrap_s;
            texture.wrap_t = wrap_t;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
