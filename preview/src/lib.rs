//! 3D box preview for the packaging-design editor.
//!
//! The preview shows the current design wrapped around one of a few canned
//! box geometries and lets the user orbit, pan and zoom around it. This crate
//! owns the parts that do not depend on a graphics library: the damped
//! orbit camera, the template catalogue, and the open/close/retry lifecycle
//! of a preview window. The actual scene is drawn by a host-provided
//! [`backend::SceneBackend`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Preview lifecycle, frame loop step, export |
//! | [`orbit`] | Damped spherical camera controller |
//! | [`template`] | Template names to box part lists |
//! | [`backend`] | Seam to the graphics library |
//! | [`scene`] | Lighting and projection shared by every model |
//! | [`config`] | Tunable camera parameters |
//! | [`error`] | Session error type |
//! | [`consts`] | Initial pose, colours, labels |

pub mod backend;
pub mod config;
pub mod consts;
pub mod error;
pub mod orbit;
pub mod scene;
pub mod session;
pub mod template;
