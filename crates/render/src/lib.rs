//! Rendering adapter: renderer-agnostic interface plus the CPU reference
//! renderer.
//!
//! # Invariants
//! - Renderers never mutate the scene; output derives from scene and view.
//! - Per-pixel shading is pure and order-independent — invocations share
//!   only the read-only environment, sampler, and view state.

mod cpu;
mod framebuffer;
mod renderer;

pub use cpu::CpuRenderer;
pub use framebuffer::Framebuffer;
pub use renderer::{RenderView, Renderer, SphereScene};

pub fn crate_info() -> &'static str {
    "glaze-render v0.1.0"
}
