//! Closed catalog of material and light sub-features.
//!
//! Every axis is an enum; a variant's feature code is what names generated
//! modules, its payload only matters when parameters are bound at runtime.

pub mod light;
pub mod material;
pub mod texture;

pub use light::{LightCase, LightContribution, LightKind, ShadowMap};
pub use material::{Albedo, Alpha, Depth, Emissive, Environment, Normal, Refractive, Specular};
pub use texture::TextureRef;

/// Properties shared by every sub-feature variant.
pub trait Feature {
    /// Short token identifying the variant's configuration. Empty for "none"
    /// variants, which contribute nothing to a module name.
    fn code(&self) -> &'static str;

    /// True if the variant samples a texture at the mesh UV coordinates.
    fn requires_uv(&self) -> bool {
        false
    }
}

/// Join the non-empty codes of `features` with `_`, preserving order.
pub fn join_codes(features: &[&dyn Feature]) -> String {
    features
        .iter()
        .map(|f| f.code())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
