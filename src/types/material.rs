//! Surface material data decoded from the 3DS editor section.

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color24 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color24 {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Color24 {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

/// A named material. Decoded in full, but not part of the packed output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    pub name: String,
    /// Diffuse texture map file name, if the material has one.
    pub texture_file: Option<String>,
    pub ambient: Color24,
    pub diffuse: Color24,
    pub specular: Color24,
}

impl Material {
    pub fn has_texture(&self) -> bool {
        self.texture_file.is_some()
    }
}
