//! Wavefront OBJ text decoding.
//!
//! Only the subset needed for a single triangulated mesh is read: `v`, `vt`,
//! `vn`, `f`, and the first `o`/`g` name. Everything else is skipped.

use crate::config::IndexBase;
use crate::error::{MesherError, Result};
use crate::types::{Face, Mesh, Scene};
use glam::{Vec2, Vec3};
use std::str::SplitWhitespace;

/// Decode OBJ text into a scene holding one mesh. Normals are taken from
/// `vn` lines only when there is exactly one per vertex.
pub fn decode(text: &str, index_base: IndexBase) -> Result<Scene> {
    let mut name: Option<String> = None;
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut coords = Vec::new();
    let mut faces = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let trimmed = raw.trim();
        if trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };

        match keyword {
            "v" => vertices.push(Vec3::from_array(parse_floats(&mut tokens, line, keyword)?)),
            "vn" => normals.push(Vec3::from_array(parse_floats(&mut tokens, line, keyword)?)),
            "vt" => coords.push(Vec2::from_array(parse_floats(&mut tokens, line, keyword)?)),
            "f" => faces.push(parse_face(tokens, line, index_base)?),
            "o" | "g" if name.is_none() => {
                name = Some(tokens.collect::<Vec<_>>().join(" "));
            }
            _ => {}
        }
    }

    let mut mesh = Mesh::new(name.unwrap_or_default());
    mesh.vertices = vertices;
    mesh.faces = faces;
    mesh.tex_coords = per_vertex(coords, mesh.vertices.len(), "vt");
    mesh.normals = per_vertex(normals, mesh.vertices.len(), "vn");
    mesh.validate_indices()?;

    log::debug!(
        "obj mesh '{}': {} vertices, {} faces, normals: {}, coords: {}",
        mesh.name,
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.has_normals(),
        mesh.has_coords()
    );

    Ok(Scene {
        meshes: vec![mesh],
        materials: Vec::new(),
    })
}

fn parse_floats<const N: usize>(
    tokens: &mut SplitWhitespace<'_>,
    line: usize,
    keyword: &str,
) -> Result<[f32; N]> {
    let mut out = [0.0f32; N];
    for slot in out.iter_mut() {
        let token = tokens.next().ok_or_else(|| {
            MesherError::parse(line, format!("'{}' needs {} components", keyword, N))
        })?;
        *slot = token.parse().map_err(|_| {
            MesherError::parse(line, format!("malformed '{}' component '{}'", keyword, token))
        })?;
    }
    Ok(out)
}

/// Parse `f a b c`, where each entry is `v`, `v/t`, `v//n` or `v/t/n`.
fn parse_face(tokens: SplitWhitespace<'_>, line: usize, index_base: IndexBase) -> Result<Face> {
    let entries: Vec<&str> = tokens.collect();
    if entries.len() != 3 {
        return Err(MesherError::UnsupportedFace {
            line,
            vertices: entries.len(),
        });
    }

    let mut indices = [0u16; 3];
    for (slot, entry) in indices.iter_mut().zip(&entries) {
        let vertex = entry.split('/').next().unwrap_or_default();
        let index: u16 = vertex.parse().map_err(|_| {
            MesherError::parse(line, format!("malformed face index '{}'", entry))
        })?;
        *slot = index_base.rebase(index).ok_or_else(|| {
            MesherError::parse(line, "face index 0 is invalid for 1-based indices")
        })?;
    }

    Ok(Face::new(indices[0], indices[1], indices[2]))
}

/// Keep an attribute list only if it lines up with the vertices.
fn per_vertex<T>(values: Vec<T>, vertex_count: usize, keyword: &str) -> Vec<T> {
    if values.is_empty() || values.len() == vertex_count {
        return values;
    }
    log::warn!(
        "dropping {} '{}' entries: packed output needs one per vertex ({} vertices)",
        values.len(),
        keyword,
        vertex_count
    );
    Vec::new()
}
