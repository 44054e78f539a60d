//! The glass material: Fresnel-weighted reflection and refraction of an
//! environment map, tinted by a view-dependent glow.
//!
//! # Invariants
//! - Shading is a pure, total function: clamps stand in for error paths and
//!   every invocation produces one output color.
//! - The CPU path here and the WGSL path in `glaze-render-wgpu` implement
//!   the same math; parameters flow to the GPU through uniforms so the two
//!   cannot silently diverge.

mod glass;
mod optics;
mod preset;

pub use glass::{GlassMaterial, ShadingBreakdown};
pub use optics::{reflect, refract};
pub use preset::PresetError;

pub fn crate_info() -> &'static str {
    "glaze-material v0.1.0"
}
