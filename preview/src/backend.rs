//! Seam between the preview lifecycle and a graphics library.
//!
//! The host implements [`SceneBackend`] on top of whatever draws the scene
//! (a WebGL wrapper in the browser, a recording fake in tests). The session
//! drives it strictly as mount, then any number of texture updates, renders
//! and snapshots, then release.

use crate::orbit::CameraPose;
use crate::scene::SceneStyle;
use crate::template::BoxModel;

/// Rendering surface for one open preview.
pub trait SceneBackend {
    /// Backend failure, e.g. a browser exception.
    type Error: std::fmt::Debug;

    /// Acquire the surface and build the scene for `model`.
    ///
    /// `texture` is an encoded image URL for parts marked `textured`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the surface cannot be created.
    fn mount(&mut self, model: &BoxModel, style: &SceneStyle, texture: Option<&str>) -> Result<(), Self::Error>;

    /// Replace the texture on the mounted model's textured parts.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the image cannot be applied.
    fn set_texture(&mut self, data_url: &str) -> Result<(), Self::Error>;

    /// Draw one frame from `pose`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when drawing fails.
    fn render(&mut self, pose: &CameraPose) -> Result<(), Self::Error>;

    /// Encode the most recent frame as a PNG data URL.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the frame cannot be read back.
    fn snapshot(&mut self) -> Result<String, Self::Error>;

    /// Free every resource acquired by `mount`. Must tolerate repeat calls.
    fn release(&mut self);
}
