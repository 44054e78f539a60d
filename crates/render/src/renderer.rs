use glam::Vec3;
use glaze_envmap::{EnvironmentMap, Sampler};
use glaze_material::GlassMaterial;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 4.0),
            target: Vec3::ZERO,
            fov_degrees: 45.0,
        }
    }
}

/// What the material pipeline draws: one glass sphere at the origin inside
/// an environment map.
#[derive(Debug, Clone)]
pub struct SphereScene {
    pub material: GlassMaterial,
    pub environment: EnvironmentMap,
    pub sampler: Sampler,
    pub radius: f32,
}

impl SphereScene {
    pub fn new(material: GlassMaterial, environment: EnvironmentMap) -> Self {
        Self {
            material,
            environment,
            sampler: Sampler::default(),
            radius: 1.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the scene and a view configuration and produces output.
/// It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &SphereScene, view: &RenderView) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.target, Vec3::ZERO);
        assert_eq!(view.fov_degrees, 45.0);
        assert!(view.eye.z > 0.0);
    }

    #[test]
    fn scene_defaults_to_unit_sphere() {
        let scene = SphereScene::new(
            GlassMaterial::default(),
            EnvironmentMap::constant(Vec3::ONE),
        );
        assert_eq!(scene.radius, 1.0);
    }
}
