//! Area-weighted vertex normal generation.

use crate::types::{Face, Mesh};
use glam::Vec3;

/// Unnormalized normal of a triangle. Its length is twice the triangle's area.
pub fn face_normal(vertices: &[Vec3], face: &Face) -> Option<Vec3> {
    let a = *vertices.get(face.v1 as usize)?;
    let b = *vertices.get(face.v2 as usize)?;
    let c = *vertices.get(face.v3 as usize)?;
    Some((b - a).cross(c - a))
}

/// Replace `mesh.normals` with one area-weighted unit normal per vertex.
///
/// Each face adds its unnormalized normal to its three vertices, so larger
/// faces weigh more. Vertices whose sum is zero (unreferenced vertices,
/// degenerate or cancelling faces) get a zero normal instead of NaN.
/// Any other finite sum becomes unit length whatever the mesh's scale.
pub fn generate_normals(mesh: &mut Mesh) {
    let mut normals = vec![Vec3::ZERO; mesh.vertices.len()];

    for face in &mesh.faces {
        // Meshes from the decoders are validated; anything else is skipped.
        let Some(n) = face_normal(&mesh.vertices, face) else {
            continue;
        };
        for index in face.indices() {
            normals[index as usize] += n;
        }
    }

    for n in &mut normals {
        // Squared lengths of tiny or huge f32 sums under- or overflow in f32.
        *n = n.as_dvec3().normalize_or_zero().as_vec3();
    }

    mesh.normals = normals;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new("tri");
        mesh.vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        mesh.faces = vec![Face::new(0, 1, 2)];
        mesh
    }

    #[test]
    fn test_single_triangle() {
        let mut mesh = triangle();
        assert_eq!(
            face_normal(&mesh.vertices, &mesh.faces[0]),
            Some(Vec3::new(0.0, 0.0, 1.0))
        );

        generate_normals(&mut mesh);
        assert_eq!(mesh.normals, vec![Vec3::new(0.0, 0.0, 1.0); 3]);
    }

    #[test]
    fn test_face_normal_is_area_weighted() {
        let vertices = [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0)];
        let n = face_normal(&vertices, &Face::new(0, 1, 2)).unwrap();
        assert_eq!(n, Vec3::new(0.0, 0.0, 6.0));
    }

    #[test]
    fn test_larger_face_dominates_shared_vertex() {
        // Two faces share vertex 0: a small one facing +Z and a large one facing +Y.
        let mut mesh = Mesh::new("hinge");
        mesh.vertices = vec![
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -10.0),
        ];
        mesh.faces = vec![Face::new(0, 1, 2), Face::new(0, 3, 4)];
        generate_normals(&mut mesh);

        let shared = mesh.normals[0];
        assert!((shared.length() - 1.0).abs() < 1e-6);
        assert!(shared.y > shared.z * 50.0);
    }

    #[test]
    fn test_isolated_and_degenerate_vertices_get_zero() {
        let mut mesh = Mesh::new("degenerate");
        mesh.vertices = vec![
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
            Vec3::new(5.0, 5.0, 5.0),
        ];
        // Collinear face; vertex 3 is unreferenced.
        mesh.faces = vec![Face::new(0, 1, 2)];
        generate_normals(&mut mesh);

        assert_eq!(mesh.normals.len(), 4);
        for n in &mesh.normals {
            assert_eq!(*n, Vec3::ZERO);
        }
    }

    #[test]
    fn test_opposite_faces_cancel_to_zero() {
        let mut mesh = triangle();
        mesh.faces.push(Face::new(0, 2, 1));
        generate_normals(&mut mesh);
        assert!(mesh.normals.iter().all(|n| *n == Vec3::ZERO));
    }

    #[test]
    fn test_overwrites_existing_normals() {
        let mut mesh = triangle();
        mesh.normals = vec![Vec3::X];
        generate_normals(&mut mesh);
        assert_eq!(mesh.normals.len(), 3);
    }

    #[test]
    fn test_out_of_range_face_is_skipped() {
        let mut mesh = triangle();
        mesh.faces.push(Face::new(0, 1, 9));
        generate_normals(&mut mesh);
        assert_eq!(mesh.normals, vec![Vec3::Z; 3]);
    }

    #[test]
    fn test_unit_normals_at_extreme_scales() {
        for scale in [1e-12f32, 1e-20, 1e10, 1e18] {
            let mut mesh = triangle();
            for v in &mut mesh.vertices {
                *v *= scale;
            }
            let face = face_normal(&mesh.vertices, &mesh.faces[0]).unwrap();
            assert_ne!(face, Vec3::ZERO, "scale {}", scale);

            generate_normals(&mut mesh);
            for n in &mesh.normals {
                assert!(n.abs_diff_eq(Vec3::Z, 1e-6), "scale {}: {:?}", scale, n);
            }
        }
    }

    #[test]
    fn test_normals_are_unit_or_zero() {
        let mut mesh = Mesh::new("fan");
        mesh.vertices = vec![
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.2),
            Vec3::new(0.3, 1.0, 0.0),
            Vec3::new(-1.0, 0.4, 0.1),
            Vec3::new(-0.2, -1.0, 0.5),
            Vec3::new(7.0, 7.0, 7.0),
        ];
        mesh.faces = vec![Face::new(0, 1, 2), Face::new(0, 2, 3), Face::new(0, 3, 4)];
        generate_normals(&mut mesh);

        for n in &mesh.normals {
            assert!(n.is_finite());
            let len = n.length();
            assert!(len == 0.0 || (len - 1.0).abs() < 1e-5, "length {}", len);
        }
        assert_eq!(mesh.normals[5], Vec3::ZERO);
    }
}
