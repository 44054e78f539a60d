//! wgpu render backend for the glaze material.
//!
//! Draws the environment map as a fullscreen background and a glass sphere
//! shaded by the WGSL port of the material. Camera is an orbit model
//! (drag to rotate, scroll to zoom).
//!
//! # Invariants
//! - The WGSL fragment math mirrors `glaze-material` exactly; material
//!   parameters reach the GPU through the uniform buffer every frame.
//! - The environment texture binds at group 1 (binding 0 = texture,
//!   binding 1 = sampler) and is immutable for the duration of a draw.

mod camera;
mod gpu;
mod shaders;

pub use camera::OrbitCamera;
pub use gpu::WgpuRenderer;
