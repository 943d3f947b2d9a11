//! Preview window lifecycle.
//!
//! A session owns the orbit camera and one [`SceneBackend`]. Opening always
//! releases whatever the previous open acquired before mounting again, and
//! resets the camera. A mount failure leaves the session `Failed` with a
//! user-facing message; the host shows it with a retry button. A render
//! failure halts the frame loop (`Stopped`) and leaves the last good frame on
//! screen. Nothing here is fatal to the rest of the editor.
//!
//! ```text
//! Closed --open ok--> Running --render err--> Stopped
//!   ^   \--open err--> Failed --retry--> (open again)
//!   +------------------- close (from any state)
//! ```

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::backend::SceneBackend;
use crate::config::OrbitConfig;
use crate::consts::{EXPORT_SUFFIX, INIT_FAILED_MESSAGE};
use crate::error::PreviewError;
use crate::orbit::{OrbitController, PointerButton};
use crate::scene::SceneStyle;
use crate::template::{BoxModel, BoxTemplate};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewState {
    /// No resources held.
    #[default]
    Closed,
    /// Mounted; the host should call [`PreviewSession::frame`] every animation frame.
    Running,
    /// Mounted, but a frame failed and the loop is halted.
    Stopped,
    /// Mounting failed; `message` is shown to the user next to a retry action.
    Failed { message: String },
}

/// A captured still of the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewExport {
    /// Suggested download name.
    pub filename: String,
    pub data_url: String,
}

/// Model details shown beside the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    /// Template name as given by the library.
    pub template: String,
    /// Geometry the name resolved to.
    pub kind: BoxTemplate,
    /// Whether a design texture has been supplied.
    pub texture_applied: bool,
}

pub struct PreviewSession<B: SceneBackend> {
    backend: B,
    camera: OrbitController,
    style: SceneStyle,
    state: PreviewState,
    template: String,
    texture: Option<String>,
    model: Option<BoxModel>,
}

impl<B: SceneBackend> PreviewSession<B> {
    #[must_use]
    pub fn new(backend: B, config: OrbitConfig) -> Self {
        Self {
            backend,
            camera: OrbitController::new(config),
            style: SceneStyle::default(),
            state: PreviewState::Closed,
            template: String::new(),
            texture: None,
            model: None,
        }
    }

    // --- Lifecycle ---

    /// Open (or reopen) the preview for `template`, optionally textured.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Init`] when the backend cannot mount; the
    /// session is then `Failed` and [`retry`](Self::retry) may be used.
    pub fn open(&mut self, template: &str, texture: Option<String>) -> Result<(), PreviewError> {
        self.release();
        self.template = template.trim().to_owned();
        self.texture = texture;
        self.camera.reset();

        let model = BoxTemplate::from_name(&self.template).model();
        let texture = self.texture.as_deref().filter(|_| model.accepts_texture());
        match self.backend.mount(&model, &self.style, texture) {
            Ok(()) => {
                log::info!("preview opened: template={:?} kind={}", self.template, model.template.slug());
                self.model = Some(model);
                self.state = PreviewState::Running;
                Ok(())
            }
            Err(e) => {
                log::error!("preview init failed for {:?}: {e:?}", self.template);
                // A partial mount may still hold a context.
                self.backend.release();
                self.state = PreviewState::Failed { message: INIT_FAILED_MESSAGE.to_owned() };
                Err(PreviewError::Init(format!("{e:?}")))
            }
        }
    }

    /// Re-run [`open`](Self::open) with the last template and texture.
    ///
    /// Does nothing unless the session is `Failed`.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Init`] if mounting fails again.
    pub fn retry(&mut self) -> Result<(), PreviewError> {
        if !matches!(self.state, PreviewState::Failed { .. }) {
            log::debug!("retry ignored in state {:?}", self.state);
            return Ok(());
        }
        let template = self.template.clone();
        let texture = self.texture.clone();
        self.open(&template, texture)
    }

    /// Release all rendering resources. Safe to call in any state.
    pub fn close(&mut self) {
        if self.release() {
            log::info!("preview closed: template={:?}", self.template);
        }
        self.state = PreviewState::Closed;
    }

    /// Release the mounted scene, if any. Returns whether anything was held.
    fn release(&mut self) -> bool {
        self.camera.on_pointer_up();
        if self.model.take().is_some() {
            self.backend.release();
            return true;
        }
        false
    }

    // --- Frame loop ---

    /// Advance damping by one frame and draw.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::NotRunning`] unless `Running`, and
    /// [`PreviewError::Render`] when the frame fails; the session is then
    /// `Stopped` and the host should stop scheduling frames.
    pub fn frame(&mut self) -> Result<(), PreviewError> {
        if self.state != PreviewState::Running {
            return Err(PreviewError::NotRunning);
        }
        self.camera.tick();
        self.draw()
    }

    /// Like [`frame`](Self::frame), with damping scaled to `dt` seconds.
    ///
    /// # Errors
    ///
    /// As [`frame`](Self::frame).
    pub fn frame_elapsed(&mut self, dt: f64) -> Result<(), PreviewError> {
        if self.state != PreviewState::Running {
            return Err(PreviewError::NotRunning);
        }
        self.camera.advance(dt);
        self.draw()
    }

    fn draw(&mut self) -> Result<(), PreviewError> {
        let pose = self.camera.camera_pose();
        self.backend.render(&pose).map_err(|e| {
            log::error!("preview render failed, stopping loop: {e:?}");
            self.state = PreviewState::Stopped;
            PreviewError::Render(format!("{e:?}"))
        })
    }

    // --- Content ---

    /// Use `data_url` as the design texture, now if open and on later opens.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Texture`] when the backend rejects it. The
    /// texture is still remembered for the next open.
    pub fn set_texture(&mut self, data_url: String) -> Result<(), PreviewError> {
        let push = self.model.as_ref().is_some_and(BoxModel::accepts_texture);
        let result = if push {
            self.backend.set_texture(&data_url).map_err(|e| {
                log::warn!("preview texture update failed: {e:?}");
                PreviewError::Texture(format!("{e:?}"))
            })
        } else {
            Ok(())
        };
        self.texture = Some(data_url);
        result
    }

    /// Capture the current view for download.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::NotOpen`] unless a scene is mounted, and
    /// [`PreviewError::Export`] when the backend cannot read the frame.
    pub fn export(&mut self) -> Result<PreviewExport, PreviewError> {
        if self.model.is_none() {
            return Err(PreviewError::NotOpen);
        }
        let data_url = self.backend.snapshot().map_err(|e| {
            log::warn!("preview snapshot failed: {e:?}");
            PreviewError::Export(format!("{e:?}"))
        })?;
        let filename = format!("{}{EXPORT_SUFFIX}", self.file_stem());
        log::info!("preview exported as {filename}");
        Ok(PreviewExport { filename, data_url })
    }

    fn file_stem(&self) -> &str {
        if self.template.is_empty() {
            BoxTemplate::from_name(&self.template).slug()
        } else {
            &self.template
        }
    }

    // --- Camera input ---

    pub fn on_pointer_down(&mut self, button: PointerButton, x: f64, y: f64) {
        self.camera.on_pointer_down(button, x, y);
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.camera.on_pointer_move(x, y);
    }

    pub fn on_pointer_up(&mut self) {
        self.camera.on_pointer_up();
    }

    /// The pointer left the surface; ends any drag.
    pub fn on_pointer_leave(&mut self) {
        self.camera.on_pointer_up();
    }

    pub fn on_wheel(&mut self, delta_y: f64) {
        self.camera.on_wheel(delta_y);
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    /// Whether a scene is mounted (running or stopped).
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.model.is_some()
    }

    #[must_use]
    pub fn info(&self) -> PreviewInfo {
        PreviewInfo {
            template: self.template.clone(),
            kind: BoxTemplate::from_name(&self.template),
            texture_applied: self.texture.is_some(),
        }
    }

    #[must_use]
    pub fn camera(&self) -> &OrbitController {
        &self.camera
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.camera.cursor()
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: SceneBackend> Drop for PreviewSession<B> {
    fn drop(&mut self) {
        self.release();
    }
}
