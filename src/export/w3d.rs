//! W3D envelope: packed meshes as base64 inside a JSON document, wrapped
//! in a one-line JavaScript module export.

use super::packed::{pack_mesh, PackedMesh};
use crate::error::{MesherError, Result};
use crate::types::Scene;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Default identifier used by [`W3dDocument::to_module`].
pub const DEFAULT_EXPORT_NAME: &str = "w3d";

/// One mesh record in the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct W3dMesh {
    pub name: String,
    pub has_normals: bool,
    pub has_coords: bool,
    pub face_count: usize,
    pub vertex_count: usize,
    /// Standard base64 of the packed buffer.
    pub buffer: String,
}

impl W3dMesh {
    pub fn from_packed(packed: &PackedMesh) -> Self {
        Self {
            name: packed.name.clone(),
            has_normals: packed.has_normals,
            has_coords: packed.has_coords,
            face_count: packed.face_count,
            vertex_count: packed.vertex_count,
            buffer: base64::engine::general_purpose::STANDARD.encode(&packed.buffer),
        }
    }

    /// Decode the base64 buffer back into a [`PackedMesh`].
    pub fn to_packed(&self) -> Result<PackedMesh> {
        let buffer = base64::engine::general_purpose::STANDARD.decode(&self.buffer)?;
        Ok(PackedMesh {
            name: self.name.clone(),
            has_normals: self.has_normals,
            has_coords: self.has_coords,
            face_count: self.face_count,
            vertex_count: self.vertex_count,
            buffer,
        })
    }
}

/// The output document: every mesh of a scene, in order. Materials are not
/// part of the format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct W3dDocument {
    pub meshes: Vec<W3dMesh>,
}

impl W3dDocument {
    /// Pack every mesh of a scene.
    pub fn from_scene(scene: &Scene) -> Result<Self> {
        let meshes = scene
            .meshes
            .iter()
            .map(|mesh| pack_mesh(mesh).map(|packed| W3dMesh::from_packed(&packed)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { meshes })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as `export const <name> = '<json>';`.
    ///
    /// The JSON is escaped so the single-quoted literal evaluates to it exactly.
    /// `export_name` must match `[A-Za-z_$][A-Za-z0-9_$]*`.
    pub fn to_module(&self, export_name: &str) -> Result<String> {
        if !is_identifier(export_name) {
            return Err(MesherError::InvalidExportName(export_name.to_string()));
        }
        let json = self.to_json()?;
        let mut out = String::with_capacity(json.len() + export_name.len() + 20);
        out.push_str("export const ");
        out.push_str(export_name);
        out.push_str(" = '");
        for c in json.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '\u{2028}' => out.push_str("\\u2028"),
                '\u{2029}' => out.push_str("\\u2029"),
                c => out.push(c),
            }
        }
        out.push_str("';");
        Ok(out)
    }

    pub fn total_vertices(&self) -> usize {
        self.meshes.iter().map(|m| m.vertex_count).sum()
    }

    pub fn total_faces(&self) -> usize {
        self.meshes.iter().map(|m| m.face_count).sum()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
