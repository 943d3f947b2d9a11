//! Lighting and projection shared by every preview model.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use glam::{DMat4, DVec3};

use crate::consts::{BACKGROUND_COLOR, FAR_PLANE, FIELD_OF_VIEW_DEG, NEAR_PLANE};
use crate::orbit::CameraPose;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    /// Parallel light shining from `position` toward the origin.
    Directional { position: DVec3, casts_shadow: bool },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    /// 0xRRGGBB.
    pub color: u32,
    pub intensity: f64,
}

/// Everything about the scene that does not depend on the template.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStyle {
    pub background: u32,
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    /// Ambient fill plus a shadow-casting key light and a dimmer side fill.
    pub lights: Vec<Light>,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            background: BACKGROUND_COLOR,
            fov_y_deg: FIELD_OF_VIEW_DEG,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            lights: vec![
                Light { kind: LightKind::Ambient, color: 0x0040_4040, intensity: 0.6 },
                Light {
                    kind: LightKind::Directional { position: DVec3::new(5.0, 5.0, 5.0), casts_shadow: true },
                    color: 0x00ff_ffff,
                    intensity: 1.0,
                },
                Light {
                    kind: LightKind::Directional { position: DVec3::new(-5.0, 0.0, 2.0), casts_shadow: false },
                    color: 0x00ff_ffff,
                    intensity: 0.3,
                },
            ],
        }
    }
}

impl SceneStyle {
    /// Right-handed view-projection for `pose` on a surface of the given aspect ratio.
    #[must_use]
    pub fn view_proj(&self, pose: &CameraPose, aspect: f64) -> DMat4 {
        let aspect = if aspect.is_finite() { aspect.max(0.1) } else { 1.0 };
        let proj = DMat4::perspective_rh(self.fov_y_deg.to_radians(), aspect, self.near, self.far);
        let view = DMat4::look_at_rh(pose.position, pose.look_at, DVec3::Y);
        proj * view
    }
}
