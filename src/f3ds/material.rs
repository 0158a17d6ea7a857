//! Material chunks.

use super::chunk::{read_cstr, ChunkReader, ColorChunk, MaterialChunk, TextureMapChunk};
use crate::error::{MesherError, Result};
use crate::types::{Color24, Material};

pub(super) fn decode_material(body: &[u8]) -> Result<Material> {
    let mut material = Material::default();

    for child in ChunkReader::new(body) {
        let child = child?;
        match child.kind::<MaterialChunk>() {
            MaterialChunk::Name => material.name = read_cstr(child.body, "material name")?.0,
            MaterialChunk::Ambient => material.ambient = read_color(child.body, "ambient color")?,
            MaterialChunk::Diffuse => material.diffuse = read_color(child.body, "diffuse color")?,
            MaterialChunk::Specular => {
                material.specular = read_color(child.body, "specular color")?
            }
            MaterialChunk::TextureMap => {
                material.texture_file = Some(read_texture_map(child.body)?)
            }
            MaterialChunk::Unknown(id) => log::debug!("skipping material chunk 0x{:04X}", id),
        }
    }

    log::debug!("material '{}' (texture: {:?})", material.name, material.texture_file);
    Ok(material)
}

/// A color property wraps exactly one 24-bit color chunk.
fn read_color(body: &[u8], context: &'static str) -> Result<Color24> {
    let chunk = ChunkReader::new(body)
        .read_chunk()?
        .ok_or_else(|| MesherError::truncated(context, super::chunk::HEADER_LEN, 0))?;

    if chunk.kind::<ColorChunk>() != ColorChunk::Rgb24 {
        return Err(MesherError::UnexpectedChunk {
            expected: ColorChunk::Rgb24.id(),
            found: chunk.id,
            context,
        });
    }

    match chunk.body {
        [r, g, b, ..] => Ok(Color24::from([*r, *g, *b])),
        short => Err(MesherError::truncated(context, 3, short.len())),
    }
}

fn read_texture_map(body: &[u8]) -> Result<String> {
    for child in ChunkReader::new(body) {
        let child = child?;
        match child.kind::<TextureMapChunk>() {
            TextureMapChunk::MapName => return Ok(read_cstr(child.body, "texture file name")?.0),
            TextureMapChunk::Unknown(id) => log::debug!("skipping texture map chunk 0x{:04X}", id),
        }
    }
    Err(MesherError::MissingSection("texture map file name (0xA300)"))
}
