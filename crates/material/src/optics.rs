use glam::Vec3;

/// Reflect an incident vector across a unit normal.
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

/// Refraction across a medium boundary with ratio `eta`.
///
/// Under total internal reflection `k` goes negative; it is clamped to zero
/// so the result degrades to a finite grazing vector. This is deliberately
/// NOT the GLSL/WGSL builtin, which returns the zero vector there.
pub fn refract(incident: Vec3, normal: Vec3, eta: f32) -> Vec3 {
    let cos_i = normal.dot(incident);
    let k = (1.0 - eta * eta * (1.0 - cos_i * cos_i)).max(0.0);
    eta * incident - (eta * cos_i + k.sqrt()) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn reflect_mirrors_across_normal() {
        let incident = Vec3::new(1.0, -1.0, 0.0).normalize();
        let reflected = reflect(incident, Vec3::Y);
        assert_vec_close(reflected, Vec3::new(1.0, 1.0, 0.0).normalize());
    }

    #[test]
    fn reflect_normal_incidence_reverses() {
        assert_vec_close(reflect(Vec3::NEG_Y, Vec3::Y), Vec3::Y);
    }

    #[test]
    fn refract_matched_index_passes_straight_through() {
        // eta = 1: no bending, whatever the incidence angle.
        assert_vec_close(refract(Vec3::NEG_Y, Vec3::Y, 1.0), Vec3::NEG_Y);
        let oblique = Vec3::new(0.6, -0.8, 0.0);
        assert_vec_close(refract(oblique, Vec3::Y, 1.0), oblique);
    }

    #[test]
    fn refract_normal_incidence_does_not_bend() {
        let out = refract(Vec3::NEG_Y, Vec3::Y, 1.0 / 1.52);
        assert_vec_close(out.normalize(), Vec3::NEG_Y);
    }

    #[test]
    fn refract_total_internal_reflection_stays_finite() {
        // Dense-to-rare at 45 degrees: past the critical angle, k < 0
        // before the clamp. The result must be a finite grazing vector.
        let incident = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(incident, Vec3::Y, 1.52);
        assert!(out.is_finite(), "TIR produced {out}");
        assert!(out.y.abs() < 1e-5, "expected grazing vector, got {out}");
    }
}
