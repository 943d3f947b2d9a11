//! Shared constants for the preview.

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

/// Pitch of the initial and reset pose, in radians.
pub const INITIAL_PITCH: f64 = 0.2;

/// Yaw of the initial and reset pose, in radians.
pub const INITIAL_YAW: f64 = 0.3;

pub const INITIAL_ZOOM: f64 = 1.0;

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Clear colour behind the model.
pub const BACKGROUND_COLOR: u32 = 0x00f5_f5f5;

pub const FIELD_OF_VIEW_DEG: f64 = 75.0;
pub const NEAR_PLANE: f64 = 0.1;
pub const FAR_PLANE: f64 = 1000.0;

/// Untextured cube faces, in +x, -x, +y, -y, +z, -z order.
pub const CUBE_FACE_COLORS: [u32; 6] = [0x00ff_ffff, 0x00f8_f8f8, 0x00f0_f0f0, 0x00e8_e8e8, 0x00f5_f5f5, 0x00fa_fafa];

// ---------------------------------------------------------------------------
// Cursors
// ---------------------------------------------------------------------------

pub const CURSOR_IDLE: &str = "grab";
pub const CURSOR_ORBIT: &str = "grabbing";
pub const CURSOR_PAN: &str = "move";

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Appended to the template name to form the export filename.
pub const EXPORT_SUFFIX: &str = "_3d_preview.png";

/// User-facing message for a failed initialization.
pub const INIT_FAILED_MESSAGE: &str = "3D preview failed to initialize";
