//! World materials.
//!
//! A material is what occupies one cell of the block grid. Each one is a
//! type id plus a variant (`meta`), stored as two `u16`s.

use serde::{Deserialize, Serialize};

/// Material type identifier.
pub type MaterialId = u16;

/// The contents of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Material {
    /// Material type ID.
    pub id: MaterialId,
    /// Variant (color, rotation, wood type...).
    pub meta: u16,
}

impl Material {
    /// Empty space.
    pub const AIR: Self = Self { id: 0, meta: 0 };

    /// Creates a material with variant 0.
    #[inline]
    #[must_use]
    pub const fn new(id: MaterialId) -> Self {
        Self { id, meta: 0 }
    }

    /// Creates a material with an explicit variant.
    #[inline]
    #[must_use]
    pub const fn with_meta(id: MaterialId, meta: u16) -> Self {
        Self { id, meta }
    }

    /// Returns true if this cell is empty.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        self.id == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_ignores_meta() {
        assert!(Material::AIR.is_air());
        assert!(Material::with_meta(0, 3).is_air());
        assert!(!Material::new(1).is_air());
        assert_ne!(Material::with_meta(5, 1), Material::new(5));
    }
}
