//! Object and triangle mesh chunks.

use super::chunk::{read_cstr, ByteCursor, Chunk, ChunkReader, ObjectChunk, TriMeshChunk};
use crate::error::{MesherError, Result};
use crate::types::{Face, Mesh};
use glam::{Vec2, Vec3};

const VERTEX_RECORD: usize = 12;
const FACE_RECORD: usize = 8;
const COORD_RECORD: usize = 8;

/// Decode an object chunk body: a name followed by child chunks.
///
/// Yields one mesh per triangle mesh child. Objects without geometry
/// (lights, cameras) yield nothing.
pub(super) fn decode_object(body: &[u8]) -> Result<Vec<Mesh>> {
    let (name, rest) = read_cstr(body, "object name")?;
    let mut meshes = Vec::new();

    for child in ChunkReader::new(rest) {
        let child = child?;
        match child.kind::<ObjectChunk>() {
            ObjectChunk::TriMesh => meshes.push(decode_trimesh(&name, &child)?),
            ObjectChunk::Unknown(id) => {
                log::debug!("skipping chunk 0x{:04X} in object '{}'", id, name)
            }
        }
    }

    if meshes.is_empty() {
        log::debug!("object '{}' has no triangle mesh", name);
    }
    Ok(meshes)
}

fn decode_trimesh(name: &str, trimesh: &Chunk<'_>) -> Result<Mesh> {
    let mut mesh = Mesh::new(name);

    for child in trimesh.children() {
        let child = child?;
        match child.kind::<TriMeshChunk>() {
            TriMeshChunk::VertexList => mesh.vertices = read_vertices(child.body)?,
            TriMeshChunk::FaceList => mesh.faces = read_faces(child.body)?,
            TriMeshChunk::MappingCoords => mesh.tex_coords = read_coords(child.body)?,
            TriMeshChunk::LocalAxes => log::debug!("skipping local axes of '{}'", name),
            TriMeshChunk::Unknown(id) => {
                log::debug!("skipping chunk 0x{:04X} in mesh '{}'", id, name)
            }
        }
    }

    mesh.validate_indices()?;
    if mesh.has_coords() && mesh.tex_coords.len() != mesh.vertices.len() {
        return Err(MesherError::AttributeMismatch {
            mesh: mesh.name,
            attribute: "texture coordinate",
            expected: mesh.vertices.len(),
            found: mesh.tex_coords.len(),
        });
    }

    log::debug!(
        "mesh '{}': {} vertices, {} faces, {} coords",
        mesh.name,
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.tex_coords.len()
    );
    Ok(mesh)
}

/// Read a `u16` count and check that that many records follow.
///
/// Bytes after the last record belong to nested chunks and are ignored.
fn read_records<'a>(
    body: &'a [u8],
    record_len: usize,
    what: &str,
) -> Result<(usize, ByteCursor<'a>)> {
    let mut cursor = ByteCursor::new(body);
    let count = cursor.read_u16(&format!("{} count", what))? as usize;
    let needed = count * record_len;
    if cursor.remaining() < needed {
        return Err(MesherError::truncated(
            format!("{} {}", count, what),
            needed,
            cursor.remaining(),
        ));
    }
    Ok((count, cursor))
}

fn read_vertices(body: &[u8]) -> Result<Vec<Vec3>> {
    let (count, mut cursor) = read_records(body, VERTEX_RECORD, "vertices")?;
    let mut vertices = Vec::with_capacity(count);
    for _ in 0..count {
        let x = cursor.read_f32("vertex")?;
        let y = cursor.read_f32("vertex")?;
        let z = cursor.read_f32("vertex")?;
        vertices.push(Vec3::new(x, y, z));
    }
    Ok(vertices)
}

fn read_faces(body: &[u8]) -> Result<Vec<Face>> {
    let (count, mut cursor) = read_records(body, FACE_RECORD, "faces")?;
    let mut faces = Vec::with_capacity(count);
    for _ in 0..count {
        let v1 = cursor.read_u16("face")?;
        let v2 = cursor.read_u16("face")?;
        let v3 = cursor.read_u16("face")?;
        let info = cursor.read_u16("face")?;
        faces.push(Face::new(v1, v2, v3).with_info(info));
    }
    if cursor.remaining() > 0 {
        log::debug!("ignoring {} bytes of face sub-chunks", cursor.remaining());
    }
    Ok(faces)
}

fn read_coords(body: &[u8]) -> Result<Vec<Vec2>> {
    let (count, mut cursor) = read_records(body, COORD_RECORD, "texture coordinates")?;
    let mut coords = Vec::with_capacity(count);
    for _ in 0..count {
        let u = cursor.read_f32("texture coordinate")?;
        let v = cursor.read_f32("texture coordinate")?;
        coords.push(Vec2::new(u, v));
    }
    Ok(coords)
}
