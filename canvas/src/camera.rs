#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// View state for the fixed-size design page.
///
/// `pan_x` / `pan_y` locate the page's top-left corner in CSS pixels.
/// `zoom_percent` is kept integral so stepping in and out never drifts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom_percent: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom_percent: 100 }
    }
}

impl Camera {
    /// Scale factor (1.0 = 100 %).
    #[must_use]
    pub fn zoom(&self) -> f64 {
        f64::from(self.zoom_percent) / 100.0
    }

    /// Convert a screen-space point (CSS pixels) to canvas units.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        let zoom = self.zoom();
        Point {
            x: (screen.x - self.pan_x) / zoom,
            y: (screen.y - self.pan_y) / zoom,
        }
    }

    /// Convert a screen-space distance (pixels) to canvas-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom()
    }

    /// Move the zoom by `delta` percent, clamped to `[min, max]`.
    ///
    /// Returns `true` when the zoom changed.
    pub fn step_zoom(&mut self, delta: i64, min: u32, max: u32) -> bool {
        let next = (i64::from(self.zoom_percent) + delta).clamp(i64::from(min), i64::from(max));
        let next = u32::try_from(next).unwrap_or(min);
        let changed = next != self.zoom_percent;
        self.zoom_percent = next;
        changed
    }

    /// Return to 100 %, respecting the configured bounds.
    pub fn reset_zoom(&mut self, min: u32, max: u32) -> bool {
        let next = 100_u32.clamp(min, max);
        let changed = next != self.zoom_percent;
        self.zoom_percent = next;
        changed
    }
}
