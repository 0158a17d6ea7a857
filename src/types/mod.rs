//! Shared types used throughout the library.

mod material;

pub use material::{Color24, Material};

use crate::error::{MesherError, Result};
use glam::{Vec2, Vec3};

/// One triangle, referencing three vertex indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Face {
    pub v1: u16,
    pub v2: u16,
    pub v3: u16,
    /// Edge/visibility flags from the source file. Carried through, never interpreted.
    pub info: u16,
}

impl Face {
    pub fn new(v1: u16, v2: u16, v3: u16) -> Self {
        Self { v1, v2, v3, info: 0 }
    }

    pub fn with_info(mut self, info: u16) -> Self {
        self.info = info;
        self
    }

    /// The three vertex indices in winding order.
    pub fn indices(&self) -> [u16; 3] {
        [self.v1, self.v2, self.v3]
    }
}

/// One named triangulated surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
    /// Texture coordinates, one per vertex when present.
    pub tex_coords: Vec<Vec2>,
    /// Vertex normals, one per vertex once generated.
    pub normals: Vec<Vec3>,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_coords(&self) -> bool {
        !self.tex_coords.is_empty()
    }

    /// Check that every face index addresses an existing vertex.
    pub fn validate_indices(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        for face in &self.faces {
            for index in face.indices() {
                if usize::from(index) >= vertex_count {
                    return Err(MesherError::IndexOutOfRange {
                        mesh: self.name.clone(),
                        index,
                        vertex_count,
                    });
                }
            }
        }
        Ok(())
    }
}

/// A decoded scene: meshes and materials in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total vertex count across all meshes.
    pub fn total_vertices(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }

    /// Total triangle count across all meshes.
    pub fn total_faces(&self) -> usize {
        self.meshes.iter().map(Mesh::face_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_indices_accepts_in_range_faces() {
        let mut mesh = Mesh::new("tri");
        mesh.vertices = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        mesh.faces = vec![Face::new(0, 1, 2)];
        assert!(mesh.validate_indices().is_ok());
    }

    #[test]
    fn test_validate_indices_rejects_out_of_range() {
        let mut mesh = Mesh::new("broken");
        mesh.vertices = vec![Vec3::ZERO, Vec3::X];
        mesh.faces = vec![Face::new(0, 1, 2)];

        match mesh.validate_indices() {
            Err(MesherError::IndexOutOfRange {
                index, vertex_count, ..
            }) => {
                assert_eq!(index, 2);
                assert_eq!(vertex_count, 2);
            }
            other => panic!("expected IndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_scene_totals() {
        let mut a = Mesh::new("a");
        a.vertices = vec![Vec3::ZERO; 3];
        a.faces = vec![Face::new(0, 1, 2)];
        let mut b = Mesh::new("b");
        b.vertices = vec![Vec3::ZERO; 4];
        b.faces = vec![Face::new(0, 1, 2), Face::new(0, 2, 3)];

        let scene = Scene {
            meshes: vec![a, b],
            materials: Vec::new(),
        };
        assert_eq!(scene.total_vertices(), 7);
        assert_eq!(scene.total_faces(), 3);
    }
}
