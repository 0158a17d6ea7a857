//! Autodesk 3DS scene decoding.
//!
//! The file is a tree of [chunks](chunk). Decoding walks it top-down with
//! one [`ChunkReader`] per level, each scoped to its parent's body:
//!
//! ```text
//! Main (0x4D4D)
//! └── Editor (0x3D3D)
//!     ├── Object (0x4000): name\0, then
//!     │   └── TriMesh (0x4100)
//!     │       ├── VertexList (0x4110)
//!     │       ├── FaceList (0x4120)
//!     │       └── MappingCoords (0x4140)
//!     └── Material (0xAFFF)
//!         ├── Name (0xA000)
//!         ├── Ambient / Diffuse / Specular (0xA0n0) → Color24 (0x0011)
//!         └── TextureMap (0xA200) → MapName (0xA300)
//! ```
//!
//! Any malformed chunk aborts the whole decode. Unknown ids are skipped
//! wherever siblings are allowed.

pub mod chunk;
mod material;
mod trimesh;

pub use chunk::{Chunk, ChunkReader};

use crate::error::{MesherError, Result};
use crate::normals::generate_normals;
use crate::types::Scene;
use chunk::{EditorChunk, MainChunk, RootChunk};

/// Decode a complete 3DS file and generate vertex normals for every mesh.
pub fn decode(data: &[u8]) -> Result<Scene> {
    let mut scene = decode_without_normals(data)?;
    for mesh in &mut scene.meshes {
        generate_normals(mesh);
    }
    Ok(scene)
}

/// Decode a 3DS file, leaving `normals` empty on every mesh.
pub fn decode_without_normals(data: &[u8]) -> Result<Scene> {
    // Check the id before trusting the length field of an unknown file.
    if data.len() >= 2 {
        let id = u16::from_le_bytes([data[0], data[1]]);
        if RootChunk::from(id) != RootChunk::Main {
            return Err(MesherError::InvalidFormat { found: id });
        }
    }

    let mut reader = ChunkReader::new(data);
    let root = reader
        .read_chunk()?
        .ok_or_else(|| MesherError::truncated("root chunk header", chunk::HEADER_LEN, 0))?;
    if reader.remaining() > 0 {
        log::debug!("ignoring {} bytes after the root chunk", reader.remaining());
    }

    let editor = find_editor(&root)?;
    decode_editor(&editor)
}

fn find_editor<'a>(root: &Chunk<'a>) -> Result<Chunk<'a>> {
    for child in root.children() {
        let child = child?;
        match child.kind::<MainChunk>() {
            MainChunk::Editor => return Ok(child),
            MainChunk::Keyframer => log::debug!("skipping keyframer section"),
            MainChunk::Unknown(id) => log::debug!("skipping root chunk 0x{:04X}", id),
        }
    }
    Err(MesherError::MissingSection("3D editor chunk (0x3D3D)"))
}

fn decode_editor(editor: &Chunk<'_>) -> Result<Scene> {
    let mut scene = Scene::new();

    for child in editor.children() {
        let child = child?;
        match child.kind::<EditorChunk>() {
            EditorChunk::Object => {
                scene.meshes.extend(trimesh::decode_object(child.body)?);
            }
            EditorChunk::Material => {
                scene.materials.push(material::decode_material(child.body)?);
            }
            EditorChunk::Unknown(id) => log::debug!("skipping editor chunk 0x{:04X}", id),
        }
    }

    log::debug!(
        "decoded {} meshes ({} vertices, {} faces) and {} materials",
        scene.meshes.len(),
        scene.total_vertices(),
        scene.total_faces(),
        scene.materials.len()
    );
    Ok(scene)
}


#[cfg(test)]
mod tests {
    use super::chunk::encode_chunk;
    use super::fixtures::*;
    use super::*;
    use crate::types::{Color24, Face};
    use glam::{Vec2, Vec3};

    #[test]
    fn test_decode_triangle_with_normals() {
        let scene = decode(&triangle_file()).unwrap();

        assert_eq!(scene.meshes.len(), 1);
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.name, "Tri");
        assert_eq!(mesh.vertices, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(mesh.faces, vec![Face::new(0, 1, 2).with_info(7)]);
        assert!(mesh.tex_coords.is_empty());
        assert_eq!(mesh.normals, vec![Vec3::Z; 3]);
    }

    #[test]
    fn test_decode_without_normals_leaves_them_empty() {
        let scene = decode_without_normals(&triangle_file()).unwrap();
        assert!(scene.meshes[0].normals.is_empty());
    }

    #[test]
    fn test_wrong_root_id_is_invalid_format() {
        let data = encode_chunk(0x1234, &[]);
        assert!(matches!(
            decode(&data),
            Err(MesherError::InvalidFormat { found: 0x1234 })
        ));
    }

    #[test]
    fn test_missing_editor_section() {
        let keyframer = encode_chunk(0xB000, &[0; 8]);
        let data = encode_chunk(0x4D4D, &keyframer);
        assert!(matches!(
            decode(&data),
            Err(MesherError::MissingSection(_))
        ));
    }

    #[test]
    fn test_empty_input_is_truncated() {
        assert!(matches!(
            decode(&[]),
            Err(MesherError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_truncated_root_chunk() {
        let mut data = triangle_file();
        data.truncate(data.len() - 5);
        assert!(matches!(
            decode(&data),
            Err(MesherError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_skips_unknown_chunks_and_finds_editor() {
        let version = encode_chunk(0x0002, &3u32.to_le_bytes());
        let mesh_version = encode_chunk(0x3D3E, &3u32.to_le_bytes());
        let editor = encode_chunk(
            0x3D3D,
            &[
                mesh_version,
                object(
                    "Tri",
                    &[
                        vertex_list(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
                        face_list(&[[0, 1, 2, 0]]),
                    ],
                ),
            ]
            .concat(),
        );
        let data = encode_chunk(0x4D4D, &[version, editor].concat());

        let scene = decode(&data).unwrap();
        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(scene.meshes[0].face_count(), 1);
    }

    #[test]
    fn test_decode_meshes_and_materials_in_order() {
        let material = encode_chunk(
            0xAFFF,
            &[
                cstr_chunk(0xA000, "Brick"),
                color(0xA010, [10, 20, 30]),
                color(0xA020, [200, 100, 50]),
                color(0xA030, [255, 255, 255]),
                encode_chunk(0xA200, &cstr_chunk(0xA300, "BRICK.JPG")),
            ]
            .concat(),
        );
        let a = object(
            "A",
            &[
                vertex_list(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
                face_list(&[[0, 1, 2, 0]]),
                mapping_coords(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
            ],
        );
        let b = object("B", &[vertex_list(&[[2.0, 2.0, 2.0]])]);

        let scene = decode(&file(&[a, material, b])).unwrap();

        let names: Vec<&str> = scene.meshes.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(scene.meshes[0].tex_coords[1], Vec2::new(1.0, 0.0));
        // An isolated vertex gets a zero normal.
        assert_eq!(scene.meshes[1].normals, vec![Vec3::ZERO]);

        assert_eq!(scene.materials.len(), 1);
        let mat = &scene.materials[0];
        assert_eq!(mat.name, "Brick");
        assert_eq!(mat.ambient, Color24::new(10, 20, 30));
        assert_eq!(mat.diffuse, Color24::new(200, 100, 50));
        assert_eq!(mat.specular, Color24::new(255, 255, 255));
        assert_eq!(mat.texture_file.as_deref(), Some("BRICK.JPG"));
    }

    #[test]
    fn test_malformed_mesh_aborts_decode() {
        let good = object("Good", &[vertex_list(&[[0.0, 0.0, 0.0]])]);
        let bad = object(
            "Bad",
            &[vertex_list(&[[0.0, 0.0, 0.0]]), face_list(&[[0, 1, 2, 0]])],
        );
        assert!(matches!(
            decode(&file(&[good, bad])),
            Err(MesherError::IndexOutOfRange { .. })
        ));
    }
}
