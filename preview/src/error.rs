//! Preview error type.

/// Errors surfaced by [`crate::session::PreviewSession`].
///
/// Backend failures are carried as their debug rendering since backends
/// report browser exceptions that have no `Display` form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    /// The rendering surface could not be set up. Retryable.
    #[error("failed to initialize preview: {0}")]
    Init(String),
    /// A frame failed; the loop is halted and the last frame stays visible.
    #[error("preview render failed: {0}")]
    Render(String),
    /// The backend could not capture the current view.
    #[error("failed to capture preview: {0}")]
    Export(String),
    /// The backend rejected a new surface texture.
    #[error("failed to apply texture: {0}")]
    Texture(String),
    /// The operation needs an open preview.
    #[error("preview is not open")]
    NotOpen,
    /// Frames are only drawn while the loop is running.
    #[error("preview loop is not running")]
    NotRunning,
}
