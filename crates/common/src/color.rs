/// sRGB transfer functions, used when crossing the 8-bit image boundary.
/// All shading happens in linear space.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_preserved() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn roundtrip_within_tolerance() {
        for i in 0..=16 {
            let c = i as f32 / 16.0;
            let back = linear_to_srgb(srgb_to_linear(c));
            assert!((back - c).abs() < 1e-5, "roundtrip failed at {c}: {back}");
        }
    }

    #[test]
    fn middle_gray_decodes_darker() {
        // 0.5 in sRGB is well below 0.5 in linear light.
        assert!(srgb_to_linear(0.5) < 0.25);
    }
}
