//! Asset loading for the shadelab projects: OBJ meshes with their MTL
//! materials, texture images with mip chains, and cubemap faces.
//!
//! Parsing and decoding are delegated to `tobj` and `image`; this crate only
//! reshapes their output into what the renderer uploads.
//!
//! # Invariants
//! - Meshes come out as flat triangle lists, three vertices per face.
//! - Every draw range refers to a valid material index or to none.
//! - Texture paths are resolved against the OBJ file's directory.

mod cubemap;
mod material;
mod mesh;
mod texture;

pub use cubemap::{CubeFaces, FACE_NAMES, face_direction};
pub use image::{Rgba, RgbaImage};
pub use material::MaterialDesc;
pub use mesh::{Aabb, DrawRange, LoadedMesh, MeshStats, MeshVertex, load_obj};
pub use texture::{load_rgba, mip_chain, mip_level_count, normalize_lexically, resolve_texture_path};

use std::path::PathBuf;

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load OBJ {}: {source}", path.display())]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
    #[error("OBJ {} contains no vertices", .0.display())]
    EmptyMesh(PathBuf),
    #[error("failed to decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("cubemap face {} is {width}x{height}, expected {expected}x{expected}", path.display())]
    CubemapFace {
        path: PathBuf,
        width: u32,
        height: u32,
        expected: u32,
    },
    #[error("cubemap in {} does not have six faces", .0.display())]
    CubemapIncomplete(PathBuf),
}

pub fn crate_info() -> &'static str {
    "shadelab-assets v0.1.0"
}
