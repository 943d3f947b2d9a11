//! Box templates: which canned geometry a template name selects.
//!
//! Sizes and positions are in scene units with +y up. Every model is centred
//! near the origin so the initial camera frames it without adjustment.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use std::f64::consts::FRAC_PI_6;

use glam::DVec3;

use crate::consts::CUBE_FACE_COLORS;

/// The box geometry shown for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxTemplate {
    /// Sleeve with a pull-out drawer.
    Drawer,
    /// Base with a deeper separate lid.
    LidAndBase,
    /// Body with a hinged lid shown slightly open.
    FlipTop,
    /// Plain cube for unrecognized templates; the only textured model.
    Cube,
}

impl BoxTemplate {
    /// Resolve a template library name. Unknown names fall back to the cube.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "抽屉盒" | "drawer" => Self::Drawer,
            "天地盖" | "lid-and-base" => Self::LidAndBase,
            "翻盖盒" | "flip-top" => Self::FlipTop,
            _ => Self::Cube,
        }
    }

    /// Stable ASCII identifier.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Drawer => "drawer",
            Self::LidAndBase => "lid-and-base",
            Self::FlipTop => "flip-top",
            Self::Cube => "cube",
        }
    }

    /// Part list for this template.
    #[must_use]
    pub fn model(self) -> BoxModel {
        let parts = match self {
            Self::Drawer => vec![
                BoxPart::solid("sleeve", DVec3::new(2.0, 1.5, 2.0), DVec3::ZERO, 0x00ff_ffff),
                BoxPart::solid("drawer", DVec3::new(1.8, 0.3, 1.8), DVec3::new(0.0, 0.6, 0.3), 0x00f0_f0f0),
            ],
            Self::LidAndBase => vec![
                BoxPart::solid("base", DVec3::new(2.0, 1.0, 2.0), DVec3::new(0.0, -0.3, 0.0), 0x00ff_ffff),
                BoxPart::solid("lid", DVec3::new(2.1, 0.6, 2.1), DVec3::new(0.0, 0.5, 0.0), 0x00f8_f8f8),
            ],
            Self::FlipTop => vec![
                BoxPart::solid("body", DVec3::new(2.0, 1.5, 2.0), DVec3::ZERO, 0x00ff_ffff),
                BoxPart {
                    tilt_x: -FRAC_PI_6,
                    ..BoxPart::solid("lid", DVec3::new(2.0, 0.1, 1.0), DVec3::new(0.0, 0.8, -0.5), 0x00f0_f0f0)
                },
            ],
            Self::Cube => vec![BoxPart {
                name: "cube",
                size: DVec3::splat(2.0),
                position: DVec3::ZERO,
                tilt_x: 0.0,
                surface: Surface::Faces(CUBE_FACE_COLORS),
                textured: true,
            }],
        };
        BoxModel { template: self, parts }
    }
}

/// How an untextured part is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// One 0xRRGGBB colour on every face.
    Solid(u32),
    /// Per-face colours in +x, -x, +y, -y, +z, -z order.
    Faces([u32; 6]),
}

/// One axis-aligned box of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPart {
    pub name: &'static str,
    /// Full extent along each axis.
    pub size: DVec3,
    /// Centre of the part.
    pub position: DVec3,
    /// Rotation about the part's own x axis, in radians.
    pub tilt_x: f64,
    pub surface: Surface,
    /// Whether the design texture is wrapped onto this part when available.
    pub textured: bool,
}

impl BoxPart {
    fn solid(name: &'static str, size: DVec3, position: DVec3, color: u32) -> Self {
        Self { name, size, position, tilt_x: 0.0, surface: Surface::Solid(color), textured: false }
    }
}

/// A complete model handed to the scene backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxModel {
    pub template: BoxTemplate,
    pub parts: Vec<BoxPart>,
}

impl BoxModel {
    /// Whether any part shows the design texture.
    #[must_use]
    pub fn accepts_texture(&self) -> bool {
        self.parts.iter().any(|p| p.textured)
    }

    /// Axis-aligned bounds of the untilted parts, as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        self.parts.iter().fold(None, |acc, part| {
            let half = part.size / 2.0;
            let (lo, hi) = (part.position - half, part.position + half);
            Some(match acc {
                None => (lo, hi),
                Some((min, max)) => (min.min(lo), max.max(hi)),
            })
        })
    }
}
