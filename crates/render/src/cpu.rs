use crate::{Framebuffer, RenderView, Renderer, SphereScene};
use glam::{Vec3, Vec4};
use glaze_common::{FragmentInput, ReinhardLuminance, ToneMap, ViewState};
use std::time::Instant;

/// CPU reference renderer.
///
/// Ray-casts the scene's sphere through every pixel and invokes the material
/// once per covered pixel, exactly as a GPU rasterizer would per fragment.
/// Misses show the environment itself (host-owned background).
#[derive(Debug, Clone, Copy)]
pub struct CpuRenderer {
    pub width: u32,
    pub height: u32,
}

impl CpuRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

impl Renderer for CpuRenderer {
    type Output = Framebuffer;

    fn render(&self, scene: &SphereScene, view: &RenderView) -> Framebuffer {
        let start = Instant::now();
        let tone_map = ReinhardLuminance;
        let view_state = ViewState::new(view.eye);
        let camera = CameraBasis::from_view(view, self.width as f32 / self.height as f32);

        let mut fb = Framebuffer::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let dir = camera.ray_direction(x, y, self.width, self.height);
                let color = match intersect_sphere(view.eye, dir, scene.radius) {
                    Some(t) => {
                        let world_position = view.eye + dir * t;
                        let world_normal = world_position / scene.radius;
                        let frag = FragmentInput {
                            front_facing: dir.dot(world_normal) < 0.0,
                            screen_position: Vec4::new(
                                x as f32 + 0.5,
                                y as f32 + 0.5,
                                t,
                                1.0,
                            ),
                            world_position,
                            world_normal,
                        };
                        scene.material.shade(
                            &frag,
                            &view_state,
                            &scene.environment,
                            &scene.sampler,
                            &tone_map,
                        )
                    }
                    None => {
                        let rgb = scene.environment.sample(&scene.sampler, dir);
                        tone_map.tone_map(rgb.extend(1.0))
                    }
                };
                fb.set(x, y, color);
            }
        }

        tracing::debug!(
            width = self.width,
            height = self.height,
            elapsed = ?start.elapsed(),
            "cpu render complete"
        );
        fb
    }
}

/// Orthonormal camera frame plus the half-extents of the image plane.
struct CameraBasis {
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    half_width: f32,
    half_height: f32,
}

impl CameraBasis {
    fn from_view(view: &RenderView, aspect: f32) -> Self {
        let forward = (view.target - view.eye).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward);
        let half_height = (view.fov_degrees.to_radians() * 0.5).tan();
        Self {
            forward,
            right,
            up,
            half_width: half_height * aspect,
            half_height,
        }
    }

    fn ray_direction(&self, x: u32, y: u32, width: u32, height: u32) -> Vec3 {
        let ndc_x = (x as f32 + 0.5) / width as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - (y as f32 + 0.5) / height as f32 * 2.0;
        (self.forward + self.right * (ndc_x * self.half_width)
            + self.up * (ndc_y * self.half_height))
            .normalize()
    }
}

/// Nearest positive hit distance of a ray against the origin-centered sphere.
fn intersect_sphere(origin: Vec3, dir: Vec3, radius: f32) -> Option<f32> {
    let b = origin.dot(dir);
    let c = origin.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let near = -b - sqrt_disc;
    if near > 1e-3 {
        return Some(near);
    }
    let far = -b + sqrt_disc;
    (far > 1e-3).then_some(far)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glaze_envmap::EnvironmentMap;
    use glaze_material::GlassMaterial;

    fn white_scene() -> SphereScene {
        SphereScene::new(
            GlassMaterial::default(),
            EnvironmentMap::constant(Vec3::ONE),
        )
    }

    #[test]
    fn center_ray_hits_corner_ray_misses() {
        let view = RenderView::default();
        let camera = CameraBasis::from_view(&view, 1.0);

        let center = camera.ray_direction(32, 32, 64, 64);
        assert!(intersect_sphere(view.eye, center, 1.0).is_some());

        let corner = camera.ray_direction(0, 0, 64, 64);
        assert!(intersect_sphere(view.eye, corner, 1.0).is_none());
    }

    #[test]
    fn hit_distance_is_eye_to_surface() {
        // Straight down the axis from z=4 onto a unit sphere: t = 3.
        let t = intersect_sphere(Vec3::new(0.0, 0.0, 4.0), Vec3::NEG_Z, 1.0).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn inside_sphere_uses_far_root() {
        let t = intersect_sphere(Vec3::ZERO, Vec3::Z, 1.0).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn face_on_center_is_tint_dominated() {
        let fb = CpuRenderer::new(33, 33).render(&white_scene(), &RenderView::default());
        let center = fb.get(16, 16);
        assert!(center.x > center.y && center.y > center.z, "got {center}");
        assert_eq!(center.w, 0.0);
    }

    #[test]
    fn misses_show_the_environment() {
        let fb = CpuRenderer::new(33, 33).render(&white_scene(), &RenderView::default());
        let corner = fb.get(0, 0);
        // Tone-mapped white: all channels equal, below 1, opaque alpha.
        assert!((corner.x - corner.y).abs() < 1e-6);
        assert!((corner.y - corner.z).abs() < 1e-6);
        assert!(corner.x > 0.0 && corner.x < 1.0);
        assert_eq!(corner.w, 1.0);
    }

    #[test]
    fn every_pixel_is_finite() {
        let scene = SphereScene::new(
            GlassMaterial::default(),
            EnvironmentMap::sky_gradient(32, 16),
        );
        let fb = CpuRenderer::new(16, 16).render(&scene, &RenderView::default());
        assert!(fb.pixels().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn view_from_inside_the_sphere_still_renders() {
        let view = RenderView {
            eye: Vec3::ZERO,
            target: Vec3::Z,
            fov_degrees: 60.0,
        };
        let fb = CpuRenderer::new(8, 8).render(&white_scene(), &view);
        assert!(fb.pixels().iter().all(|p| p.is_finite()));
    }
}
