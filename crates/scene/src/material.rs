/// Classification label for one voxel cell, consumed by the raymarch
/// shader to decide visibility and opacity. Encoded as a single byte
/// in the 3D texture.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    /// Empty air; rays pass through.
    Void = 0,
    /// Transparent pane; tints rays that cross it.
    Glass = 1,
    /// Opaque wall; rays stop here.
    Solid = 2,
    /// Translucent emissive core at the scene center.
    SemiSolid = 3,
}

impl Material {
    /// Wire encoding for the single-channel byte texture.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Decode a texture byte. Bytes outside the material set are
    /// rejected rather than aliased.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Material::Void),
            1 => Some(Material::Glass),
            2 => Some(Material::Solid),
            3 => Some(Material::SemiSolid),
            _ => None,
        }
    }
}
