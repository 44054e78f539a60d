use crate::{EnvMapError, EnvironmentMap};
use glam::Vec3;
use glaze_common::srgb_to_linear;
use std::path::Path;

impl EnvironmentMap {
    /// Load an equirectangular map from an image file (PNG/JPEG/HDR/...).
    ///
    /// Float formats are taken as already-linear radiance; integer formats
    /// are sRGB-decoded so that all sampling happens in linear light.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EnvMapError> {
        let path = path.as_ref();
        let image = image::open(path)?;
        let already_linear = matches!(
            image.color(),
            image::ColorType::Rgb32F | image::ColorType::Rgba32F
        );
        let width = image.width();
        let height = image.height();
        let rgb = image.into_rgb32f();

        let texels: Vec<Vec3> = rgb
            .pixels()
            .map(|p| {
                if already_linear {
                    Vec3::new(p.0[0], p.0[1], p.0[2])
                } else {
                    Vec3::new(
                        srgb_to_linear(p.0[0]),
                        srgb_to_linear(p.0[1]),
                        srgb_to_linear(p.0[2]),
                    )
                }
            })
            .collect();

        let map = Self::from_texels(width, height, texels)?;
        tracing::info!("loaded environment map {path:?} ({width}x{height})");
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sampler;

    #[test]
    fn load_png_decodes_srgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.png");
        // Mid-gray sRGB: must decode below 0.25 in linear light.
        let img = image::RgbImage::from_pixel(4, 2, image::Rgb([128, 128, 128]));
        img.save(&path).unwrap();

        let map = EnvironmentMap::from_path(&path).unwrap();
        assert_eq!(map.width(), 4);
        assert_eq!(map.height(), 2);
        let color = map.sample(&Sampler::bilinear(), Vec3::X);
        assert!(color.x > 0.15 && color.x < 0.25, "got {color}");
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = EnvironmentMap::from_path(dir.path().join("missing.png"));
        assert!(matches!(result, Err(EnvMapError::Image(_))));
    }
}
