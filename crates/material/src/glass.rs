use crate::optics::{reflect, refract};
use glam::{Vec3, Vec4};
use glaze_common::{FragmentInput, ToneMap, ViewState};
use glaze_envmap::{EnvironmentMap, Sampler};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Floor for n·v, keeping the pow terms away from the grazing singularity.
const MIN_N_DOT_V: f32 = 0.0001;

/// Stylized glass material parameters.
///
/// `Default` is the canonical look; every field can be tuned live and the
/// whole struct round-trips through JSON presets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlassMaterial {
    /// Exponent of the Schlick-like edge-brightening term.
    pub fresnel_exponent: f32,
    /// Scale applied after the fresnel power.
    pub fresnel_scale: f32,
    /// Exponent of the face-on glow term.
    pub glow_exponent: f32,
    /// Scale applied after the glow power.
    pub glow_scale: f32,
    /// Color the glow drives the refraction tint toward.
    pub glow_tint: Vec3,
    /// Index-of-refraction ratio. 1/1.52 approximates glass in air.
    pub eta: f32,
    /// Constant floor added to the fresnel reflection weight.
    pub reflection_bias: f32,
}

impl Default for GlassMaterial {
    fn default() -> Self {
        Self {
            fresnel_exponent: 5.0,
            fresnel_scale: 2.0,
            glow_exponent: 10.0,
            glow_scale: 50.0,
            glow_tint: Vec3::new(0.5, 0.1, 0.0),
            eta: 1.0 / 1.52,
            reflection_bias: 0.05,
        }
    }
}

impl GlassMaterial {
    /// Evaluate every intermediate term of the shading function, without
    /// tone mapping. [`GlassMaterial::shade`] composites this; the CLI
    /// probe prints it.
    pub fn evaluate(
        &self,
        frag: &FragmentInput,
        view: &ViewState,
        env: &EnvironmentMap,
        sampler: &Sampler,
    ) -> ShadingBreakdown {
        let n = frag.world_normal.normalize_or_zero();
        let v = (view.camera_position - frag.world_position).normalize_or_zero();
        let n_dot_v = n.dot(v).max(MIN_N_DOT_V);

        let fresnel =
            (1.0 - n_dot_v).clamp(0.0, 1.0).powf(self.fresnel_exponent) * self.fresnel_scale;
        let glow = n_dot_v.powf(self.glow_exponent) * self.glow_scale;
        // Unclamped on purpose: glow far above 1 drives the tint well past
        // the tint color itself, which is the saturated face-on look.
        let tint = Vec3::ZERO.lerp(self.glow_tint, glow);

        let reflection = env.sample(sampler, reflect(-v, n));
        let refraction = env.sample(sampler, refract(-v, n, self.eta));

        let total = tint * refraction + reflection * (fresnel + self.reflection_bias);

        ShadingBreakdown {
            n_dot_v,
            fresnel,
            glow,
            tint,
            reflection,
            refraction,
            total,
        }
    }

    /// The shading entry point: one RGBA color per covered pixel.
    ///
    /// Alpha is fixed at 0; the host's blend state decides what that means.
    /// Branch-free by construction — degenerate inputs are clamped, never
    /// rejected.
    pub fn shade(
        &self,
        frag: &FragmentInput,
        view: &ViewState,
        env: &EnvironmentMap,
        sampler: &Sampler,
        tone_map: &impl ToneMap,
    ) -> Vec4 {
        let breakdown = self.evaluate(frag, view, env, sampler);
        tone_map.tone_map(breakdown.total.extend(0.0))
    }
}

/// Intermediate terms of one shading evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingBreakdown {
    pub n_dot_v: f32,
    pub fresnel: f32,
    pub glow: f32,
    pub tint: Vec3,
    pub reflection: Vec3,
    pub refraction: Vec3,
    /// HDR composite before tone mapping.
    pub total: Vec3,
}

impl fmt::Display for ShadingBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "n_dot_v    = {:.4}", self.n_dot_v)?;
        writeln!(f, "fresnel    = {:.4}", self.fresnel)?;
        writeln!(f, "glow       = {:.4}", self.glow)?;
        writeln!(
            f,
            "tint       = ({:.3}, {:.3}, {:.3})",
            self.tint.x, self.tint.y, self.tint.z
        )?;
        writeln!(
            f,
            "reflection = ({:.3}, {:.3}, {:.3})",
            self.reflection.x, self.reflection.y, self.reflection.z
        )?;
        writeln!(
            f,
            "refraction = ({:.3}, {:.3}, {:.3})",
            self.refraction.x, self.refraction.y, self.refraction.z
        )?;
        write!(
            f,
            "total      = ({:.3}, {:.3}, {:.3})",
            self.total.x, self.total.y, self.total.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glaze_common::PassThrough;

    fn white_env() -> EnvironmentMap {
        EnvironmentMap::constant(Vec3::ONE)
    }

    fn face_on_fragment() -> (FragmentInput, ViewState) {
        // Camera on +Z looking at a surface point whose normal points back
        // at it: n == v exactly.
        let frag = FragmentInput {
            front_facing: true,
            screen_position: Vec4::new(64.0, 64.0, 3.0, 1.0),
            world_position: Vec3::new(0.0, 0.0, 1.0),
            world_normal: Vec3::Z,
        };
        let view = ViewState::new(Vec3::new(0.0, 0.0, 4.0));
        (frag, view)
    }

    #[test]
    fn defaults_are_the_canonical_constants() {
        let mat = GlassMaterial::default();
        assert_eq!(mat.fresnel_exponent, 5.0);
        assert_eq!(mat.fresnel_scale, 2.0);
        assert_eq!(mat.glow_exponent, 10.0);
        assert_eq!(mat.glow_scale, 50.0);
        assert_eq!(mat.glow_tint, Vec3::new(0.5, 0.1, 0.0));
        assert!((mat.eta - 1.0 / 1.52).abs() < 1e-6);
        assert_eq!(mat.reflection_bias, 0.05);
    }

    #[test]
    fn face_on_is_tint_dominated() {
        let (frag, view) = face_on_fragment();
        let mat = GlassMaterial::default();
        let b = mat.evaluate(&frag, &view, &white_env(), &Sampler::bilinear());

        assert!((b.n_dot_v - 1.0).abs() < 1e-6);
        assert!(b.fresnel.abs() < 1e-6);
        assert!((b.glow - 50.0).abs() < 1e-3);
        // The glow lerp overshoots far past the tint color itself.
        assert!(b.tint.x > 20.0);
        // White environment: total = tint + bias on every channel.
        assert!((b.total.x - 25.05).abs() < 1e-2);
        assert!((b.total.y - 5.05).abs() < 1e-2);
        assert!((b.total.z - 0.05).abs() < 1e-2);
        assert!(b.total.x > b.total.y && b.total.y > b.total.z);
    }

    #[test]
    fn grazing_is_reflection_dominated() {
        // Normal perpendicular to the view direction: n·v floors at 1e-4.
        let frag = FragmentInput {
            front_facing: true,
            screen_position: Vec4::new(0.0, 0.0, 5.0, 1.0),
            world_position: Vec3::ZERO,
            world_normal: Vec3::Y,
        };
        let view = ViewState::new(Vec3::new(0.0, 0.0, 5.0));
        let mat = GlassMaterial::default();
        let b = mat.evaluate(&frag, &view, &white_env(), &Sampler::bilinear());

        assert!((b.n_dot_v - 1e-4).abs() < 1e-7);
        assert!((b.fresnel - 2.0).abs() < 1e-2);
        assert!(b.glow < 1e-6);
        assert!(b.tint.length() < 1e-6);
        // White environment: composite is the reflection weight alone.
        assert!((b.total.x - 2.049).abs() < 2e-2);
    }

    #[test]
    fn shade_fixes_alpha_at_zero() {
        let (frag, view) = face_on_fragment();
        let out = GlassMaterial::default().shade(
            &frag,
            &view,
            &white_env(),
            &Sampler::bilinear(),
            &PassThrough,
        );
        assert_eq!(out.w, 0.0);
    }

    #[test]
    fn shade_is_deterministic() {
        let (frag, view) = face_on_fragment();
        let mat = GlassMaterial::default();
        let env = white_env();
        let sampler = Sampler::bilinear();
        let a = mat.shade(&frag, &view, &env, &sampler, &PassThrough);
        let b = mat.shade(&frag, &view, &env, &sampler, &PassThrough);
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_normal_is_clamped_not_nan() {
        let frag = FragmentInput {
            front_facing: true,
            screen_position: Vec4::ZERO,
            world_position: Vec3::ZERO,
            world_normal: Vec3::ZERO,
        };
        let view = ViewState::default();
        let b = GlassMaterial::default().evaluate(
            &frag,
            &view,
            &white_env(),
            &Sampler::bilinear(),
        );
        assert!(b.total.is_finite());
    }

    #[test]
    fn breakdown_display_lists_every_term() {
        let (frag, view) = face_on_fragment();
        let b = GlassMaterial::default().evaluate(
            &frag,
            &view,
            &white_env(),
            &Sampler::bilinear(),
        );
        let text = format!("{b}");
        for label in ["n_dot_v", "fresnel", "glow", "tint", "reflection", "refraction", "total"] {
            assert!(text.contains(label), "missing {label} in {text}");
        }
    }
}
