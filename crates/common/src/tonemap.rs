use glam::{Vec3, Vec4};

/// Rec. 709 luma weights.
const LUMA: Vec3 = Vec3::new(0.2126, 0.7152, 0.0722);

/// Compression of high-dynamic-range color into a displayable range.
///
/// The material treats the operator as an opaque host contract: it hands
/// over its HDR composite (RGB + unused alpha) and returns the display-mapped
/// color with alpha untouched.
pub trait ToneMap {
    fn tone_map(&self, color: Vec4) -> Vec4;
}

/// Reinhard luminance operator: scales RGB by `1 / (1 + luminance)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReinhardLuminance;

impl ToneMap for ReinhardLuminance {
    fn tone_map(&self, color: Vec4) -> Vec4 {
        let rgb = color.truncate();
        let mapped = rgb / (1.0 + luminance(rgb));
        mapped.extend(color.w)
    }
}

/// Identity operator for tests and term inspection.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl ToneMap for PassThrough {
    fn tone_map(&self, color: Vec4) -> Vec4 {
        color
    }
}

/// Relative luminance of a linear RGB color.
pub fn luminance(rgb: Vec3) -> f32 {
    rgb.dot(LUMA)
}
