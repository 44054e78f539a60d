use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Interpolated surface attributes for a single covered pixel.
///
/// Produced by the host (rasterizer or ray-caster) for every fragment the
/// material shades; consumed exactly once, with no identity beyond the
/// current invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentInput {
    /// Whether the fragment belongs to a front-facing primitive.
    pub front_facing: bool,
    /// Screen-space position: pixel center in x/y, hit depth in z.
    pub screen_position: Vec4,
    /// World-space position of the surface point.
    pub world_position: Vec3,
    /// World-space normal. Not necessarily unit length; the shading
    /// function renormalizes.
    pub world_normal: Vec3,
}

/// Per-frame view uniform shared by all fragment invocations of a draw.
///
/// Read-only to the shading function; the host repopulates it once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Camera position in world space.
    pub camera_position: Vec3,
}

impl ViewState {
    pub fn new(camera_position: Vec3) -> Self {
        Self { camera_position }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            camera_position: Vec3::new(0.0, 0.0, 4.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_state_default_is_off_origin() {
        let view = ViewState::default();
        assert!(view.camera_position.length() > 0.0);
    }

    #[test]
    fn fragment_input_is_plain_data() {
        let frag = FragmentInput {
            front_facing: true,
            screen_position: Vec4::new(0.5, 0.5, 1.0, 1.0),
            world_position: Vec3::ZERO,
            world_normal: Vec3::Y,
        };
        let copy = frag;
        assert_eq!(frag, copy);
    }
}
