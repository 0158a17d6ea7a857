//! Flat binary packing of a mesh.
//!
//! Buffer layout, all values little-endian:
//! ```text
//! [face_count × 6 bytes]     v1, v2, v3 as u16 per face
//! [vertex_count × record]    per vertex:
//!     position  3 × f32  (always)
//!     normal    3 × f32  (if has_normals)
//!     uv        2 × f32  (if has_coords)
//! ```
//! There is no header. A reader needs the two flags plus the face and
//! vertex counts to find its way around.

use crate::error::{MesherError, Result};
use crate::types::Mesh;
use glam::{Vec2, Vec3};

/// Bytes per face in the index block.
pub const FACE_STRIDE: usize = 6;
const POSITION_SIZE: usize = 12;
const NORMAL_SIZE: usize = 12;
const COORD_SIZE: usize = 8;

/// Size in bytes of one interleaved vertex record.
pub fn vertex_stride(has_normals: bool, has_coords: bool) -> usize {
    let mut size = POSITION_SIZE;
    if has_normals {
        size += NORMAL_SIZE;
    }
    if has_coords {
        size += COORD_SIZE;
    }
    size
}

/// Exact buffer length for a mesh with the given counts and attributes.
///
/// `None` when the length does not fit in `usize`.
pub fn packed_len(
    face_count: usize,
    vertex_count: usize,
    has_normals: bool,
    has_coords: bool,
) -> Option<usize> {
    let index_len = FACE_STRIDE.checked_mul(face_count)?;
    let vertex_len = vertex_count.checked_mul(vertex_stride(has_normals, has_coords))?;
    index_len.checked_add(vertex_len)
}

/// A mesh serialized into one wire-ready buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedMesh {
    pub name: String,
    pub has_normals: bool,
    pub has_coords: bool,
    pub face_count: usize,
    pub vertex_count: usize,
    pub buffer: Vec<u8>,
}

/// Attribute data recovered from a [`PackedMesh`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnpackedMesh {
    pub indices: Vec<[u16; 3]>,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
}

/// Pack a mesh's faces and vertex attributes into a single buffer.
///
/// Normals and texture coordinates are included when present and must
/// then have one entry per vertex.
pub fn pack_mesh(mesh: &Mesh) -> Result<PackedMesh> {
    let has_normals = mesh.has_normals();
    let has_coords = mesh.has_coords();
    let vertex_count = mesh.vertex_count();

    check_attribute(mesh, "normal", mesh.normals.len())?;
    check_attribute(mesh, "texture coordinate", mesh.tex_coords.len())?;

    let expected = packed_len(mesh.face_count(), vertex_count, has_normals, has_coords);
    let mut buffer = Vec::with_capacity(expected.unwrap_or_default());

    for face in &mesh.faces {
        for index in face.indices() {
            buffer.extend_from_slice(&index.to_le_bytes());
        }
    }

    for (i, position) in mesh.vertices.iter().enumerate() {
        write_floats(&mut buffer, &position.to_array());
        if has_normals {
            write_floats(&mut buffer, &mesh.normals[i].to_array());
        }
        if has_coords {
            write_floats(&mut buffer, &mesh.tex_coords[i].to_array());
        }
    }

    debug_assert_eq!(Some(buffer.len()), expected);

    Ok(PackedMesh {
        name: mesh.name.clone(),
        has_normals,
        has_coords,
        face_count: mesh.face_count(),
        vertex_count,
        buffer,
    })
}

fn check_attribute(mesh: &Mesh, attribute: &'static str, found: usize) -> Result<()> {
    if found != 0 && found != mesh.vertex_count() {
        return Err(MesherError::AttributeMismatch {
            mesh: mesh.name.clone(),
            attribute,
            expected: mesh.vertex_count(),
            found,
        });
    }
    Ok(())
}

fn write_floats(buffer: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        buffer.extend_from_slice(&v.to_le_bytes());
    }
}

impl PackedMesh {
    /// Size in bytes of one vertex record in this buffer.
    pub fn vertex_stride(&self) -> usize {
        vertex_stride(self.has_normals, self.has_coords)
    }

    /// Split the buffer back into indices and attributes using only the
    /// flags and counts.
    pub fn unpack(&self) -> Result<UnpackedMesh> {
        let expected = packed_len(
            self.face_count,
            self.vertex_count,
            self.has_normals,
            self.has_coords,
        );
        // Counts too large to address are reported as an unsatisfiable length.
        let needed = expected.unwrap_or(usize::MAX);
        if expected != Some(self.buffer.len()) {
            return Err(MesherError::truncated(
                format!("packed mesh '{}'", self.name),
                needed,
                self.buffer.len(),
            ));
        }

        let (index_block, vertex_block) = self.buffer.split_at(FACE_STRIDE * self.face_count);

        let indices = index_block
            .chunks_exact(FACE_STRIDE)
            .map(|f| {
                [
                    u16::from_le_bytes([f[0], f[1]]),
                    u16::from_le_bytes([f[2], f[3]]),
                    u16::from_le_bytes([f[4], f[5]]),
                ]
            })
            .collect();

        let mut out = UnpackedMesh {
            indices,
            ..UnpackedMesh::default()
        };

        for record in vertex_block.chunks_exact(self.vertex_stride()) {
            let mut floats = record
                .chunks_exact(4)
                .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]));
            let mut next = || floats.next().unwrap_or_default();

            out.positions.push(Vec3::new(next(), next(), next()));
            if self.has_normals {
                out.normals.push(Vec3::new(next(), next(), next()));
            }
            if self.has_coords {
                out.tex_coords.push(Vec2::new(next(), next()));
            }
        }

        Ok(out)
    }
}
