//! Damped orbit camera.
//!
//! The controller keeps two copies of the camera state. Input events edit
//! the authoritative state immediately; once per rendered frame the smoothed
//! state closes a fixed fraction of the gap to it. The rendered pose is
//! always derived from the smoothed state, which gives inertia-like motion
//! without tracking velocity.
//!
//! ```text
//! distance   = base_distance / zoom
//! position.x = target.x + distance * sin(yaw) * cos(pitch)
//! position.y = target.y + distance * sin(pitch)
//! position.z = target.z + distance * cos(yaw) * cos(pitch)
//! ```

#[cfg(test)]
#[path = "orbit_test.rs"]
mod orbit_test;

use glam::{DVec2, DVec3};

use crate::config::OrbitConfig;
use crate::consts::{CURSOR_IDLE, CURSOR_ORBIT, CURSOR_PAN, INITIAL_PITCH, INITIAL_YAW, INITIAL_ZOOM};

/// Spherical camera state around a look-at target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Elevation in radians; positive looks down from above.
    pub pitch: f64,
    /// Azimuth in radians around the vertical axis.
    pub yaw: f64,
    /// Look-at point.
    pub target: DVec3,
    /// Distance divisor; larger is closer.
    pub zoom: f64,
}

impl Default for OrbitState {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl OrbitState {
    /// Pose shown on open and after a reset.
    pub const INITIAL: Self = Self { pitch: INITIAL_PITCH, yaw: INITIAL_YAW, target: DVec3::ZERO, zoom: INITIAL_ZOOM };

    /// Move `prev` toward `target` by `factor` of the gap, componentwise.
    #[must_use]
    pub fn next(prev: &Self, target: &Self, factor: f64) -> Self {
        Self {
            pitch: prev.pitch + (target.pitch - prev.pitch) * factor,
            yaw: prev.yaw + (target.yaw - prev.yaw) * factor,
            target: prev.target + (target.target - prev.target) * factor,
            zoom: prev.zoom + (target.zoom - prev.zoom) * factor,
        }
    }

    /// Camera distance from the target.
    #[must_use]
    pub fn distance(&self, base_distance: f64) -> f64 {
        base_distance / self.zoom
    }

    /// Eye position for this state.
    #[must_use]
    pub fn position(&self, base_distance: f64) -> DVec3 {
        let distance = self.distance(base_distance);
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + DVec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * distance
    }
}

/// Where the rendered camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub look_at: DVec3,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Orbits.
    Primary,
    /// Ignored.
    Middle,
    /// Pans.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Orbit,
    Pan,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    mode: DragMode,
    last: DVec2,
}

/// User-steerable damped orbit camera.
#[derive(Debug, Clone)]
pub struct OrbitController {
    config: OrbitConfig,
    authoritative: OrbitState,
    smoothed: OrbitState,
    drag: Option<Drag>,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(OrbitConfig::default())
    }
}

impl OrbitController {
    /// Controller at the initial pose. An invalid `config` is replaced by the defaults.
    #[must_use]
    pub fn new(config: OrbitConfig) -> Self {
        Self { config: config.or_default(), authoritative: OrbitState::INITIAL, smoothed: OrbitState::INITIAL, drag: None }
    }

    #[must_use]
    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// State edited by input events.
    #[must_use]
    pub fn state(&self) -> OrbitState {
        self.authoritative
    }

    /// Damped state the pose is derived from.
    #[must_use]
    pub fn smoothed(&self) -> OrbitState {
        self.smoothed
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// CSS cursor for the preview surface.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        match self.drag.map(|d| d.mode) {
            None => CURSOR_IDLE,
            Some(DragMode::Orbit) => CURSOR_ORBIT,
            Some(DragMode::Pan) => CURSOR_PAN,
        }
    }

    // --- Input ---

    /// Start a drag. The middle button does nothing.
    pub fn on_pointer_down(&mut self, button: PointerButton, x: f64, y: f64) {
        let mode = match button {
            PointerButton::Primary => DragMode::Orbit,
            PointerButton::Secondary => DragMode::Pan,
            PointerButton::Middle => return,
        };
        self.drag = Some(Drag { mode, last: DVec2::new(x, y) });
    }

    /// Apply the pointer delta since the last event to the active drag.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let now = DVec2::new(x, y);
        let delta = now - drag.last;
        drag.last = now;
        if !delta.is_finite() {
            return;
        }
        match drag.mode {
            DragMode::Orbit => {
                let limit = self.config.pitch_limit();
                let state = &mut self.authoritative;
                state.yaw += delta.x * self.config.rotate_speed;
                state.pitch = (state.pitch + delta.y * self.config.rotate_speed).clamp(-limit, limit);
            }
            DragMode::Pan => {
                let speed = self.config.pan_speed * self.authoritative.distance(self.config.base_distance);
                self.authoritative.target.x -= delta.x * speed;
                self.authoritative.target.y += delta.y * speed;
            }
        }
    }

    /// End the drag. Also used when the pointer leaves the surface.
    pub fn on_pointer_up(&mut self) {
        self.drag = None;
    }

    /// Zoom one notch per wheel event; positive `delta_y` zooms in.
    pub fn on_wheel(&mut self, delta_y: f64) {
        let step = self.config.wheel_step;
        if delta_y > 0.0 {
            self.scale_zoom(1.0 + step);
        } else if delta_y < 0.0 {
            self.scale_zoom(1.0 - step);
        }
    }

    pub fn zoom_in(&mut self) {
        self.scale_zoom(self.config.zoom_in_factor);
    }

    pub fn zoom_out(&mut self) {
        self.scale_zoom(self.config.zoom_out_factor);
    }

    fn scale_zoom(&mut self, factor: f64) {
        let zoom = self.authoritative.zoom * factor;
        self.authoritative.zoom = zoom.clamp(self.config.zoom_min, self.config.zoom_max);
    }

    /// Snap both states to the initial pose and drop any drag.
    pub fn reset(&mut self) {
        self.authoritative = OrbitState::INITIAL;
        self.smoothed = OrbitState::INITIAL;
        self.drag = None;
    }

    // --- Frame ---

    /// One rendered frame of damping at the configured factor.
    pub fn tick(&mut self) {
        self.smoothed = OrbitState::next(&self.smoothed, &self.authoritative, self.config.damping);
    }

    /// Damping for `dt` seconds, matching `tick` exactly at 60 frames per second.
    pub fn advance(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let factor = (1.0 - (1.0 - self.config.damping).powf(dt * 60.0)).clamp(0.0, 1.0);
        self.smoothed = OrbitState::next(&self.smoothed, &self.authoritative, factor);
    }

    /// Pose to render, from the smoothed state.
    #[must_use]
    pub fn camera_pose(&self) -> CameraPose {
        CameraPose { position: self.smoothed.position(self.config.base_distance), look_at: self.smoothed.target }
    }
}
