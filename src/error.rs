//! Error types for the mesh converter.

use thiserror::Error;

/// Result type alias using MesherError.
pub type Result<T> = std::result::Result<T, MesherError>;

/// Main error type for scene decoding and packing.
#[derive(Error, Debug)]
pub enum MesherError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or parse the JSON envelope.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A packed buffer in an envelope is not valid base64.
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Fewer bytes remain than a declared length or count requires.
    #[error("truncated input while reading {what}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        what: String,
        needed: usize,
        available: usize,
    },

    /// The file does not start with the 3DS root chunk.
    #[error("invalid 3DS file: expected root chunk 0x4D4D, found 0x{found:04X}")]
    InvalidFormat { found: u16 },

    /// A chunk header declares a length shorter than the header itself.
    #[error("chunk 0x{id:04X} declares length {length}, shorter than its 6-byte header")]
    InvalidChunkLength { id: u16, length: u32 },

    /// A required chunk was not found among its siblings.
    #[error("missing section: {0}")]
    MissingSection(&'static str),

    /// A child chunk does not carry the structurally required id.
    #[error("unexpected chunk 0x{found:04X} in {context} (expected 0x{expected:04X})")]
    UnexpectedChunk {
        expected: u16,
        found: u16,
        context: &'static str,
    },

    /// A string field is missing its NUL terminator.
    #[error("unterminated string in {0}")]
    UnterminatedString(&'static str),

    /// A face references a vertex the mesh does not have.
    #[error("mesh '{mesh}': face index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        mesh: String,
        index: u16,
        vertex_count: usize,
    },

    /// A per-vertex attribute list does not match the vertex count.
    #[error("mesh '{mesh}': {attribute} count {found} does not match vertex count {expected}")]
    AttributeMismatch {
        mesh: String,
        attribute: &'static str,
        expected: usize,
        found: usize,
    },

    /// The text format contains a face that is not a triangle.
    #[error("line {line}: only triangular faces are supported, found {vertices} vertices")]
    UnsupportedFace { line: usize, vertices: usize },

    /// The text format contains a malformed statement.
    #[error("line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// The module export name is not a plain JavaScript identifier.
    #[error("invalid export name '{0}': expected an ASCII JavaScript identifier")]
    InvalidExportName(String),

    /// The source path does not name a supported format.
    #[error("unsupported source '{0}': extension should be .3ds or .obj")]
    UnsupportedSource(String),
}

impl MesherError {
    pub(crate) fn truncated(what: impl Into<String>, needed: usize, available: usize) -> Self {
        MesherError::TruncatedInput {
            what: what.into(),
            needed,
            available,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        MesherError::ParseError {
            line,
            message: message.into(),
        }
    }
}
