//! Mesh export formats.
//!
//! [`packed`] turns one mesh into a flat binary buffer; [`w3d`] wraps a
//! scene's packed meshes into the text envelope consumed by the web viewer.

pub mod packed;
pub mod w3d;

pub use packed::{pack_mesh, PackedMesh, UnpackedMesh};
pub use w3d::{W3dDocument, W3dMesh};
