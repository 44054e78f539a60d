use glam::Vec4;
use glaze_common::linear_to_srgb;

/// Linear-light render target: one `Vec4` per pixel, row-major.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Vec4>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Vec4) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    /// Encode to 8-bit sRGB RGBA bytes.
    ///
    /// Channels are clamped to [0,1] before the transfer curve. Alpha is
    /// forced opaque: the material's alpha-0 output is a blend-state input,
    /// not an image property.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| {
                let encode = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u8;
                [encode(p.x), encode(p.y), encode(p.z), 255]
            })
            .collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y * self.width + x) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let mut fb = Framebuffer::new(4, 2);
        fb.set(3, 1, Vec4::new(1.0, 0.5, 0.0, 0.0));
        assert_eq!(fb.get(3, 1), Vec4::new(1.0, 0.5, 0.0, 0.0));
        assert_eq!(fb.get(0, 0), Vec4::ZERO);
    }

    #[test]
    fn rgba8_has_four_bytes_per_pixel_and_opaque_alpha() {
        let mut fb = Framebuffer::new(2, 2);
        fb.set(0, 0, Vec4::new(1.0, 0.0, 0.0, 0.0));
        let bytes = fb.to_rgba8();
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[0], 255);
        assert!(bytes.iter().skip(3).step_by(4).all(|&a| a == 255));
    }

    #[test]
    fn rgba8_clamps_hdr_values() {
        let mut fb = Framebuffer::new(1, 1);
        fb.set(0, 0, Vec4::new(25.0, -1.0, 0.5, 0.0));
        let bytes = fb.to_rgba8();
        assert_eq!(bytes[0], 255);
        assert_eq!(bytes[1], 0);
        assert!(bytes[2] > 128); // sRGB encode brightens mid grays
    }
}
