//! BxDF Type

use bitflags::bitflags;

bitflags! {
    /// Stores combinations of scattering lobes.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct BxDFType: u8 {
        const BSDF_REFLECTION = 0b00000001;
        const BSDF_TRANSMISSION = 0b00000010;
        const BSDF_DIFFUSE = 0b00000100;
        const BSDF_GLOSSY = 0b00001000;
        const BSDF_SPECULAR = 0b00010000;
        const BSDF_ALL = 0b00011111;
    }
}

impl BxDFType {
    /// Tests whether any of the given lobes are set.
    ///
    /// * `other` - Lobes to match.
    pub fn matches(&self, other: Self) -> bool {
        self.intersects(other)
    }

    /// Returns true if only specular lobes are set.
    pub fn is_pure_specular(&self) -> bool {
        self.contains(Self::BSDF_SPECULAR) && !self.intersects(Self::BSDF_DIFFUSE | Self::BSDF_GLOSSY)
    }
}
