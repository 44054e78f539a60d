//! Shared types for the glaze material pipeline.
//!
//! # Invariants
//! - `FragmentInput` is transient: one value per shader invocation, consumed once.
//! - Tone-map operators are pure and never reinterpret alpha.

mod color;
mod tonemap;
mod types;

pub use color::{linear_to_srgb, srgb_to_linear};
pub use tonemap::{PassThrough, ReinhardLuminance, ToneMap, luminance};
pub use types::{FragmentInput, ViewState};

pub fn crate_info() -> &'static str {
    "glaze-common v0.1.0"
}
