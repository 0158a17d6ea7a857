//! WASM bindings for w3d-mesher.
//!
//! This module provides JavaScript-friendly APIs for use in the browser.

use crate::{ConvertConfig, IndexBase, PackedMesh, SourceFormat};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
    // Ignore the error if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// One packed mesh.
#[wasm_bindgen]
#[derive(Clone)]
pub struct PackedMeshResult {
    inner: PackedMesh,
}

#[wasm_bindgen]
impl PackedMeshResult {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn has_normals(&self) -> bool {
        self.inner.has_normals
    }

    #[wasm_bindgen(getter)]
    pub fn has_coords(&self) -> bool {
        self.inner.has_coords
    }

    #[wasm_bindgen(getter)]
    pub fn face_count(&self) -> usize {
        self.inner.face_count
    }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.inner.vertex_count
    }

    /// Bytes per interleaved vertex record.
    #[wasm_bindgen(getter)]
    pub fn vertex_stride(&self) -> usize {
        self.inner.vertex_stride()
    }

    /// The packed buffer: indices, then vertex records.
    #[wasm_bindgen(getter)]
    pub fn buffer(&self) -> Vec<u8> {
        self.inner.buffer.clone()
    }
}

/// Result of converting one scene.
#[wasm_bindgen]
pub struct ConvertResult {
    json: String,
    meshes: Vec<PackedMesh>,
}

#[wasm_bindgen]
impl ConvertResult {
    /// The envelope JSON, as it appears inside the module file.
    #[wasm_bindgen(getter)]
    pub fn json(&self) -> String {
        self.json.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// All packed meshes as an array of `PackedMeshResult`.
    #[wasm_bindgen(getter)]
    pub fn meshes(&self) -> js_sys::Array {
        self.meshes
            .iter()
            .map(|m| JsValue::from(PackedMeshResult { inner: m.clone() }))
            .collect()
    }
}

fn convert(
    data: &[u8],
    format: SourceFormat,
    config: &ConvertConfig,
) -> Result<ConvertResult, JsError> {
    let scene = crate::load_scene(data, format, config).map_err(|e| JsError::new(&e.to_string()))?;
    let meshes = scene
        .meshes
        .iter()
        .map(crate::pack_mesh)
        .collect::<crate::Result<Vec<_>>>()
        .map_err(|e| JsError::new(&e.to_string()))?;

    let document = crate::W3dDocument {
        meshes: meshes.iter().map(crate::W3dMesh::from_packed).collect(),
    };
    let json = document.to_json().map_err(|e| JsError::new(&e.to_string()))?;

    Ok(ConvertResult { json, meshes })
}

/// Convert the bytes of a 3DS file.
#[wasm_bindgen]
pub fn convert_3ds(data: &[u8]) -> Result<ConvertResult, JsError> {
    convert(data, SourceFormat::F3ds, &ConvertConfig::default())
}

/// Convert OBJ text. Set `indices_as_written` for files with 0-based faces.
#[wasm_bindgen]
pub fn convert_obj(text: &str, indices_as_written: Option<bool>) -> Result<ConvertResult, JsError> {
    let base = if indices_as_written.unwrap_or(false) {
        IndexBase::AsWritten
    } else {
        IndexBase::OneBased
    };
    let config = ConvertConfig::default().with_index_base(base);
    convert(text.as_bytes(), SourceFormat::Obj, &config)
}
