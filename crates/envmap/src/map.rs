use crate::{EnvMapError, FilterMode, Sampler};
use glam::{Vec2, Vec3};
use std::f32::consts::PI;

/// Map a unit direction onto the equirectangular [0,1]² UV square.
///
/// Longitude: `x = atan2(z, x) / 2π + 0.5`. Latitude: `y = acos(y) / π`,
/// so +Y maps to the top row and -Y to the bottom. The cosine is clamped
/// before `acos` to absorb normalization drift.
pub fn dir_to_equirect(direction: Vec3) -> Vec2 {
    let x = direction.z.atan2(direction.x) / (2.0 * PI) + 0.5;
    let y = direction.y.clamp(-1.0, 1.0).acos() / PI;
    Vec2::new(x, y)
}

/// A 2D image addressed through the equirectangular mapping.
///
/// Bound read-only for the lifetime of a draw; every shading invocation
/// samples it through a shared [`Sampler`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentMap {
    width: u32,
    height: u32,
    texels: Vec<Vec3>,
}

impl EnvironmentMap {
    /// Build a map from row-major linear-RGB texels.
    pub fn from_texels(width: u32, height: u32, texels: Vec<Vec3>) -> Result<Self, EnvMapError> {
        if width == 0 || height == 0 {
            return Err(EnvMapError::ZeroDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if texels.len() != expected {
            return Err(EnvMapError::TexelCountMismatch {
                width,
                height,
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// A 1x1 map returning the same color for every direction.
    pub fn constant(color: Vec3) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    /// Procedural sky: zenith-to-horizon-to-ground gradient, uniform in
    /// longitude. Used as the fallback environment when no map is loaded.
    pub fn sky_gradient(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let zenith = Vec3::new(0.35, 0.55, 0.95);
        let horizon = Vec3::new(0.92, 0.87, 0.78);
        let ground = Vec3::new(0.24, 0.21, 0.18);

        let mut texels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            // Row latitude: elevation is +1 at the zenith row, -1 at the nadir.
            let theta = (y as f32 + 0.5) / height as f32 * PI;
            let elevation = theta.cos();
            let color = if elevation >= 0.0 {
                horizon.lerp(zenith, elevation)
            } else {
                horizon.lerp(ground, -elevation)
            };
            for _ in 0..width {
                texels.push(color);
            }
        }
        Self {
            width,
            height,
            texels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major texel storage, for GPU upload.
    pub fn texels(&self) -> &[Vec3] {
        &self.texels
    }

    /// Sample the map along a direction. The direction is normalized here,
    /// establishing the mapping's unit-input precondition; degenerate
    /// directions fall back to the map center rather than erroring.
    pub fn sample(&self, sampler: &Sampler, direction: Vec3) -> Vec3 {
        let uv = dir_to_equirect(direction.normalize_or_zero());
        match sampler.filter {
            FilterMode::Nearest => self.sample_nearest(uv),
            FilterMode::Bilinear => self.sample_bilinear(uv),
        }
    }

    fn sample_nearest(&self, uv: Vec2) -> Vec3 {
        let x = (uv.x * self.width as f32).floor() as i64;
        let y = (uv.y * self.height as f32).floor() as i64;
        self.fetch(x, y)
    }

    fn sample_bilinear(&self, uv: Vec2) -> Vec3 {
        let x = uv.x * self.width as f32 - 0.5;
        let y = uv.y * self.height as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let tx = x - x0;
        let ty = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = self.fetch(x0, y0).lerp(self.fetch(x0 + 1, y0), tx);
        let bottom = self.fetch(x0, y0 + 1).lerp(self.fetch(x0 + 1, y0 + 1), tx);
        top.lerp(bottom, ty)
    }

    fn fetch(&self, x: i64, y: i64) -> Vec3 {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.texels[y * self.width as usize + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec2_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn equirect_cardinal_directions() {
        assert_vec2_close(dir_to_equirect(Vec3::X), Vec2::new(0.5, 0.5));
        assert_vec2_close(dir_to_equirect(Vec3::Z), Vec2::new(0.75, 0.5));
        assert_eq!(dir_to_equirect(Vec3::Y).y, 0.0);
        assert_eq!(dir_to_equirect(Vec3::NEG_Y).y, 1.0);
    }

    #[test]
    fn equirect_stays_in_unit_square() {
        let dirs = [
            Vec3::new(1.0, 2.0, -3.0).normalize(),
            Vec3::new(-0.3, 0.9, 0.1).normalize(),
            Vec3::NEG_X,
            Vec3::NEG_Z,
            Vec3::new(0.0, 1.0, 1e-8).normalize(),
        ];
        for dir in dirs {
            let uv = dir_to_equirect(dir);
            assert!((0.0..=1.0).contains(&uv.x), "u out of range for {dir}: {uv}");
            assert!((0.0..=1.0).contains(&uv.y), "v out of range for {dir}: {uv}");
        }
    }

    #[test]
    fn constant_map_is_filter_invariant() {
        let map = EnvironmentMap::constant(Vec3::new(0.2, 0.4, 0.8));
        let dir = Vec3::new(0.3, -0.5, 0.8).normalize();
        let nearest = map.sample(&Sampler::nearest(), dir);
        let bilinear = map.sample(&Sampler::bilinear(), dir);
        assert_eq!(nearest, Vec3::new(0.2, 0.4, 0.8));
        assert_eq!(bilinear, Vec3::new(0.2, 0.4, 0.8));
    }

    #[test]
    fn bilinear_at_texel_center_returns_texel() {
        let texels = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ];
        let map = EnvironmentMap::from_texels(2, 2, texels).unwrap();
        // (0.25, 0.25) is the center of texel (0, 0).
        assert_eq!(map.sample_bilinear(Vec2::new(0.25, 0.25)), Vec3::X);
        assert_eq!(map.sample_bilinear(Vec2::new(0.75, 0.75)), Vec3::ONE);
    }

    #[test]
    fn longitude_seam_wraps() {
        let map = EnvironmentMap::from_texels(2, 1, vec![Vec3::X, Vec3::Y]).unwrap();
        // Just left of u=1 the bilinear kernel straddles the seam and must
        // blend column 1 with column 0, not clamp.
        let color = map.sample_bilinear(Vec2::new(0.999, 0.5));
        assert!(color.x > 0.4, "seam did not wrap: {color}");
        assert!(color.y > 0.4, "seam did not wrap: {color}");
    }

    #[test]
    fn latitude_clamps_at_poles() {
        let map = EnvironmentMap::from_texels(1, 2, vec![Vec3::X, Vec3::Y]).unwrap();
        assert_eq!(map.sample(&Sampler::bilinear(), Vec3::Y), Vec3::X);
        assert_eq!(map.sample(&Sampler::bilinear(), Vec3::NEG_Y), Vec3::Y);
    }

    #[test]
    fn degenerate_direction_is_tolerated() {
        let map = EnvironmentMap::sky_gradient(8, 4);
        let color = map.sample(&Sampler::bilinear(), Vec3::ZERO);
        assert!(color.is_finite());
    }

    #[test]
    fn from_texels_rejects_bad_dimensions() {
        assert!(matches!(
            EnvironmentMap::from_texels(0, 4, vec![]),
            Err(EnvMapError::ZeroDimension { .. })
        ));
        assert!(matches!(
            EnvironmentMap::from_texels(2, 2, vec![Vec3::ZERO; 3]),
            Err(EnvMapError::TexelCountMismatch { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn sky_gradient_brighter_up_than_down() {
        let map = EnvironmentMap::sky_gradient(16, 8);
        let up = map.sample(&Sampler::bilinear(), Vec3::Y);
        let down = map.sample(&Sampler::bilinear(), Vec3::NEG_Y);
        assert!(up.z > down.z);
    }
}
