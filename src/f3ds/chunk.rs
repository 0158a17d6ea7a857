//! Tagged-length-value chunks, the building block of the 3DS format.
//!
//! Every chunk starts with a 6-byte little-endian header:
//! ```text
//! [2 bytes]  id
//! [4 bytes]  length (header + body)
//! [length - 6 bytes]  body
//! ```
//! A body is either a sequence of child chunks or a fixed record layout,
//! depending on the id. Each nesting level gets its own id enum so that
//! unknown ids stay representable without falling back to raw integers.

use crate::error::{MesherError, Result};

/// Size of a chunk header in bytes.
pub const HEADER_LEN: usize = 6;

macro_rules! chunk_ids {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// An id this level does not interpret.
            Unknown(u16),
        }

        impl From<u16> for $name {
            fn from(id: u16) -> Self {
                match id {
                    $($value => $name::$variant,)+
                    other => $name::Unknown(other),
                }
            }
        }

        impl $name {
            /// The raw chunk id.
            pub fn id(self) -> u16 {
                match self {
                    $($name::$variant => $value,)+
                    $name::Unknown(id) => id,
                }
            }
        }
    };
}

chunk_ids! {
    /// Ids valid at the top of the file.
    RootChunk {
        Main = 0x4D4D,
    }
}

chunk_ids! {
    /// Children of the root chunk.
    MainChunk {
        /// The 3D editor section holding objects and materials.
        Editor = 0x3D3D,
        /// Keyframer (animation) section. Not decoded.
        Keyframer = 0xB000,
    }
}

chunk_ids! {
    /// Children of the editor section.
    EditorChunk {
        Object = 0x4000,
        Material = 0xAFFF,
    }
}

chunk_ids! {
    /// Children of an object chunk, after its name.
    ObjectChunk {
        TriMesh = 0x4100,
    }
}

chunk_ids! {
    /// Children of a triangle mesh.
    TriMeshChunk {
        VertexList = 0x4110,
        FaceList = 0x4120,
        MappingCoords = 0x4140,
        /// Local coordinate system matrix. Not decoded.
        LocalAxes = 0x4160,
    }
}

chunk_ids! {
    /// Children of a material chunk.
    MaterialChunk {
        Name = 0xA000,
        Ambient = 0xA010,
        Diffuse = 0xA020,
        Specular = 0xA030,
        TextureMap = 0xA200,
    }
}

chunk_ids! {
    /// Children of a texture map chunk.
    TextureMapChunk {
        MapName = 0xA300,
    }
}

chunk_ids! {
    /// The record wrapped by a material color chunk.
    ColorChunk {
        Rgb24 = 0x0011,
    }
}

/// A single chunk whose body borrows from the enclosing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub id: u16,
    /// Length as declared in the header, header included.
    pub length: u32,
    pub body: &'a [u8],
}

impl<'a> Chunk<'a> {
    /// Interpret the id at a given nesting level.
    pub fn kind<K: From<u16>>(&self) -> K {
        K::from(self.id)
    }

    /// Iterate the body as a sequence of child chunks.
    pub fn children(&self) -> ChunkReader<'a> {
        ChunkReader::new(self.body)
    }
}

/// Reads sibling chunks from one level of the tree.
///
/// Running out of input exactly at a chunk boundary ends the sequence;
/// running out inside a header or body is [`MesherError::TruncatedInput`].
/// After the first error the reader yields nothing more.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ChunkReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed at this level.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Read the next chunk, or `None` at a clean end of input.
    pub fn read_chunk(&mut self) -> Result<Option<Chunk<'a>>> {
        let rest = &self.data[self.pos..];
        if rest.is_empty() {
            return Ok(None);
        }
        if rest.len() < HEADER_LEN {
            return Err(MesherError::truncated("chunk header", HEADER_LEN, rest.len()));
        }

        let id = u16::from_le_bytes([rest[0], rest[1]]);
        let length = u32::from_le_bytes([rest[2], rest[3], rest[4], rest[5]]);
        let total = length as usize;
        if total < HEADER_LEN {
            return Err(MesherError::InvalidChunkLength { id, length });
        }

        let body = rest.get(HEADER_LEN..total).ok_or_else(|| {
            MesherError::truncated(
                format!("body of chunk 0x{:04X}", id),
                total - HEADER_LEN,
                rest.len() - HEADER_LEN,
            )
        })?;

        self.pos += total;
        Ok(Some(Chunk { id, length, body }))
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<Chunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_chunk() {
            Ok(chunk) => chunk.map(Ok),
            Err(e) => {
                self.pos = self.data.len();
                Some(Err(e))
            }
        }
    }
}

/// Cursor over a fixed-layout chunk body.
#[derive(Debug, Clone)]
pub(crate) struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub(crate) fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(MesherError::truncated(what, len, self.remaining()));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub(crate) fn read_u16(&mut self, what: &str) -> Result<u16> {
        let b = self.take(2, what)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub(crate) fn read_f32(&mut self, what: &str) -> Result<f32> {
        let b = self.take(4, what)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Split a NUL-terminated string off the front of `data`.
///
/// Returns the string and the bytes following the terminator.
pub(crate) fn read_cstr<'a>(data: &'a [u8], what: &'static str) -> Result<(String, &'a [u8])> {
    let end = data
        .iter()
        .position(|&b| b == 0)
        .ok_or(MesherError::UnterminatedString(what))?;
    let name = String::from_utf8_lossy(&data[..end]).into_owned();
    Ok((name, &data[end + 1..]))
}

/// Encode a chunk. Used to build fixtures in tests.
#[cfg(test)]
pub(crate) fn encode_chunk(id: u16, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(&id.to_le_bytes());
    out.extend_from_slice(&((HEADER_LEN + body.len()) as u32).to_le_bytes());
    out.extend_from_slice(body);
    out
}
