//! Conversion configuration.

use crate::export::w3d::DEFAULT_EXPORT_NAME;

/// How face indices in OBJ text are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexBase {
    /// Indices start at 1, as the OBJ format defines. They are rebased to 0.
    #[default]
    OneBased,
    /// Indices are used exactly as written, without rebasing.
    AsWritten,
}

impl IndexBase {
    /// Convert a parsed index to a 0-based vertex index.
    pub fn rebase(self, index: u16) -> Option<u16> {
        match self {
            IndexBase::OneBased => index.checked_sub(1),
            IndexBase::AsWritten => Some(index),
        }
    }
}

/// Options for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Index base for OBJ faces.
    pub obj_index_base: IndexBase,
    /// Generate normals for OBJ meshes without usable `vn` data.
    pub generate_obj_normals: bool,
    /// Identifier of the exported constant in the output module.
    pub export_name: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            obj_index_base: IndexBase::OneBased,
            generate_obj_normals: true,
            export_name: DEFAULT_EXPORT_NAME.to_string(),
        }
    }
}

impl ConvertConfig {
    pub fn with_index_base(mut self, base: IndexBase) -> Self {
        self.obj_index_base = base;
        self
    }

    pub fn with_obj_normals(mut self, generate: bool) -> Self {
        self.generate_obj_normals = generate;
        self
    }

    pub fn with_export_name(mut self, name: impl Into<String>) -> Self {
        self.export_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebase() {
        assert_eq!(IndexBase::OneBased.rebase(1), Some(0));
        assert_eq!(IndexBase::OneBased.rebase(0), None);
        assert_eq!(IndexBase::AsWritten.rebase(0), Some(0));
        assert_eq!(IndexBase::AsWritten.rebase(7), Some(7));
    }

    #[test]
    fn test_defaults() {
        let config = ConvertConfig::default();
        assert_eq!(config.obj_index_base, IndexBase::OneBased);
        assert!(config.generate_obj_normals);
        assert_eq!(config.export_name, "w3d");
    }
}
