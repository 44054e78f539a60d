//! Equirectangular environment maps: storage, direction-to-UV mapping,
//! filtered sampling, image loading.
//!
//! # Invariants
//! - Maps are immutable once constructed; sampling never mutates.
//! - Texels are linear RGB. sRGB decode happens once, at load time.
//! - Longitude wraps and latitude clamps — fixed by the equirectangular
//!   parameterization, not a sampler option.

mod loader;
mod map;
mod sampler;

pub use map::{EnvironmentMap, dir_to_equirect};
pub use sampler::{FilterMode, Sampler};

/// Errors from environment map construction and loading.
#[derive(Debug, thiserror::Error)]
pub enum EnvMapError {
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("environment map dimensions must be nonzero (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },
    #[error("texel count mismatch: {width}x{height} needs {expected} texels, got {actual}")]
    TexelCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub fn crate_info() -> &'static str {
    "glaze-envmap v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("envmap"));
    }
}
