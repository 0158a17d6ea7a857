//! # W3D Mesher
//!
//! Convert legacy 3D scenes into a compact packed mesh format for web rendering.
//!
//! ## Overview
//!
//! Input is an Autodesk 3DS file or a Wavefront OBJ file. Each mesh is
//! decoded into a [`Scene`], given area-weighted vertex normals, and packed
//! into a single little-endian buffer (face indices, then interleaved
//! position/normal/UV records). The buffers are base64-encoded into a JSON
//! document that is written as a one-line JavaScript module.
//!
//! ## Quick Start
//!
//! ```ignore
//! use w3d_mesher::{convert_file, ConvertConfig};
//!
//! let summary = convert_file("scene.3ds", "scene.js", &ConvertConfig::default())?;
//! println!("{} meshes", summary.mesh_count);
//! ```
//!
//! ## Working with the pieces
//!
//! ```ignore
//! use w3d_mesher::{f3ds, pack_mesh};
//!
//! let scene = f3ds::decode(&std::fs::read("scene.3ds")?)?;
//! for mesh in &scene.meshes {
//!     let packed = pack_mesh(mesh)?;
//!     upload(&packed.buffer);
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod f3ds;
pub mod normals;
pub mod obj;
pub mod types;

// Re-export main types for convenience
pub use config::{ConvertConfig, IndexBase};
pub use error::{MesherError, Result};
pub use export::{pack_mesh, PackedMesh, UnpackedMesh, W3dDocument, W3dMesh};
pub use normals::generate_normals;
pub use types::{Color24, Face, Material, Mesh, Scene};

use std::path::Path;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Autodesk 3DS binary chunks.
    F3ds,
    /// Wavefront OBJ text.
    Obj,
}

impl SourceFormat {
    /// Pick the format from the last three characters of a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_string_lossy();
        let unsupported = || MesherError::UnsupportedSource(path.to_string());

        // Require at least one character before the extension.
        if path.len() < 4 || !path.is_char_boundary(path.len() - 3) {
            return Err(unsupported());
        }
        let ext = &path[path.len() - 3..];
        if ext.eq_ignore_ascii_case("3ds") {
            Ok(SourceFormat::F3ds)
        } else if ext.eq_ignore_ascii_case("obj") {
            Ok(SourceFormat::Obj)
        } else {
            Err(unsupported())
        }
    }
}

/// Decode a scene from bytes, with normals on every mesh.
///
/// 3DS meshes always get generated normals. OBJ meshes keep per-vertex
/// `vn` data when present and otherwise get generated normals if
/// [`ConvertConfig::generate_obj_normals`] is set.
pub fn load_scene(data: &[u8], format: SourceFormat, config: &ConvertConfig) -> Result<Scene> {
    match format {
        SourceFormat::F3ds => f3ds::decode(data),
        SourceFormat::Obj => {
            let text = String::from_utf8_lossy(data);
            let mut scene = obj::decode(&text, config.obj_index_base)?;
            if config.generate_obj_normals {
                for mesh in scene.meshes.iter_mut().filter(|m| !m.has_normals()) {
                    generate_normals(mesh);
                }
            }
            Ok(scene)
        }
    }
}

/// Decode and pack a scene into an output document.
pub fn convert_bytes(
    data: &[u8],
    format: SourceFormat,
    config: &ConvertConfig,
) -> Result<W3dDocument> {
    let scene = load_scene(data, format, config)?;
    W3dDocument::from_scene(&scene)
}

/// What a [`convert_file`] run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub format: SourceFormat,
    pub mesh_count: usize,
    pub vertex_count: usize,
    pub face_count: usize,
    /// Bytes written to the destination.
    pub bytes_written: usize,
}

/// Convert `source` and write the module text to `destination`.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
    config: &ConvertConfig,
) -> Result<ConvertSummary> {
    let format = SourceFormat::from_path(&source)?;
    let data = std::fs::read(source.as_ref())?;
    let document = convert_bytes(&data, format, config)?;
    let module = document.to_module(&config.export_name)?;
    std::fs::write(destination.as_ref(), &module)?;

    Ok(ConvertSummary {
        format,
        mesh_count: document.meshes.len(),
        vertex_count: document.total_vertices(),
        face_count: document.total_faces(),
        bytes_written: module.len(),
    })
}

#[cfg(feature = "wasm")]
pub mod wasm;
